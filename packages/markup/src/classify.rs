use crate::entities::decode_entities;
use crate::segment::Segment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading1,
    Heading2,
    Paragraph,
}

impl BlockKind {
    pub fn is_heading(&self) -> bool {
        !matches!(self, BlockKind::Paragraph)
    }
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A classified block with its plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

/// Classify a segment and reduce it to decoded plain text.
///
/// Any `h1` tag anywhere in the segment makes it a level one heading, even when
/// nested inside other markup; otherwise any `h2` tag makes it level two.
pub fn classify(segment: &Segment<'_>) -> Block {
    let kind = detect_kind(segment);

    let stripped: String = segment.tokens.iter().map(|token| token.plain_text()).collect();
    let text = decode_entities(&stripped)
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .to_string();

    Block { kind, text }
}

fn detect_kind(segment: &Segment<'_>) -> BlockKind {
    let has_tag = |name: &str| {
        segment
            .tokens
            .iter()
            .filter_map(|token| token.tag_info())
            .any(|tag| tag.is_named(name))
    };

    if has_tag("h1") {
        BlockKind::Heading1
    } else if has_tag("h2") {
        BlockKind::Heading2
    } else {
        BlockKind::Paragraph
    }
}
