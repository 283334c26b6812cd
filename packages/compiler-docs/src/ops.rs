use docsync_markup::BlockKind;
use serde::{Deserialize, Serialize};

/// Length of `text` in UTF-16 code units, the unit document positions are counted in
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Named paragraph style applied to heading blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
}

impl HeadingLevel {
    pub fn for_block(kind: BlockKind) -> Option<Self> {
        match kind {
            BlockKind::Heading1 => Some(HeadingLevel::Heading1),
            BlockKind::Heading2 => Some(HeadingLevel::Heading2),
            BlockKind::Paragraph => None,
        }
    }

    pub fn named_style(&self) -> &'static str {
        match self {
            HeadingLevel::Heading1 => "HEADING_1",
            HeadingLevel::Heading2 => "HEADING_2",
        }
    }
}

/// Half-open `[start, end)` range of document positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    #[serde(rename = "startIndex")]
    pub start: usize,
    #[serde(rename = "endIndex")]
    pub end: usize,
}

impl TextRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One edit in a batch, applied strictly in list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "wire::Request", from = "wire::Request")]
pub enum Operation {
    InsertText { location: usize, text: String },
    UpdateParagraphStyle { range: TextRange, style: HeadingLevel },
}

impl Operation {
    pub fn inserted_text(&self) -> Option<&str> {
        match self {
            Operation::InsertText { text, .. } => Some(text),
            Operation::UpdateParagraphStyle { .. } => None,
        }
    }
}

/// A complete edit script for one document, in the batch-update request shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdate {
    pub requests: Vec<Operation>,
}

impl BatchUpdate {
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

/// Request records exactly as the remote batch-update endpoint spells them
mod wire {
    use super::{HeadingLevel, Operation, TextRange};
    use serde::{Deserialize, Serialize};

    const STYLE_FIELDS: &str = "namedStyleType";

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Request {
        InsertText {
            location: Location,
            text: String,
        },
        #[serde(rename_all = "camelCase")]
        UpdateParagraphStyle {
            range: TextRange,
            paragraph_style: ParagraphStyle,
            fields: String,
        },
    }

    #[derive(Serialize, Deserialize)]
    pub struct Location {
        pub index: usize,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ParagraphStyle {
        pub named_style_type: HeadingLevel,
    }

    impl From<Operation> for Request {
        fn from(op: Operation) -> Self {
            match op {
                Operation::InsertText { location, text } => Request::InsertText {
                    location: Location { index: location },
                    text,
                },
                Operation::UpdateParagraphStyle { range, style } => Request::UpdateParagraphStyle {
                    range,
                    paragraph_style: ParagraphStyle {
                        named_style_type: style,
                    },
                    fields: STYLE_FIELDS.to_string(),
                },
            }
        }
    }

    impl From<Request> for Operation {
        fn from(request: Request) -> Self {
            match request {
                Request::InsertText { location, text } => Operation::InsertText {
                    location: location.index,
                    text,
                },
                Request::UpdateParagraphStyle {
                    range,
                    paragraph_style,
                    ..
                } => Operation::UpdateParagraphStyle {
                    range,
                    style: paragraph_style.named_style_type,
                },
            }
        }
    }
}
