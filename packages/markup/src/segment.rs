use crate::lexer::{tokenize, Spanned, Token};

/// A run of markup between paragraph boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'src> {
    /// Source text of the segment, tags included
    pub raw: &'src str,
    pub tokens: Vec<Token<'src>>,
}

impl<'src> Segment<'src> {
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Split markup at every `<p ...>` and `</p>` tag.
///
/// Heading tags are not boundaries here; they stay inside their segment and
/// are picked up by classification. Blank segments are dropped.
pub fn segment(markup: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut tokens = Vec::new();

    for Spanned { token, span } in tokenize(markup) {
        if is_paragraph_boundary(&token) {
            push_segment(&mut segments, &markup[start..span.start], std::mem::take(&mut tokens));
            start = span.end;
        } else {
            tokens.push(token);
        }
    }
    push_segment(&mut segments, &markup[start..], tokens);

    segments
}

fn push_segment<'src>(segments: &mut Vec<Segment<'src>>, raw: &'src str, tokens: Vec<Token<'src>>) {
    let segment = Segment { raw, tokens };
    if !segment.is_blank() {
        segments.push(segment);
    }
}

fn is_paragraph_boundary(token: &Token<'_>) -> bool {
    token
        .tag_info()
        .map(|tag| tag.terminated && tag.is_named("p"))
        .unwrap_or(false)
}
