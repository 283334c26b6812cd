//! Lexer for docsync markup using logos
//!
//! The token set is deliberately tiny: tags, text runs and stray `<`.
//! Every byte of the input is covered by exactly one token, so lexing
//! never fails.

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Token types for markup
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'src> {
    /// `<` plus everything up to the next `>` (inclusive), the next `<`,
    /// or the end of input, whichever comes first
    #[regex(r"<[^<>]+>?", |lex| lex.slice())]
    Tag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    /// A `<` that cannot open a tag
    #[token("<")]
    Angle,
}

impl<'src> Token<'src> {
    /// The characters this token contributes to plain text once tags are stripped
    pub fn plain_text(&self) -> &'src str {
        match self {
            Token::Tag(_) => "",
            Token::Text(text) => text,
            Token::Angle => "<",
        }
    }

    pub fn tag_info(&self) -> Option<TagInfo> {
        match self {
            Token::Tag(slice) => Some(TagInfo::parse(slice)),
            _ => None,
        }
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Tag(s) => write!(f, "tag {}", s),
            Token::Text(s) => write!(f, "text {:?}", s),
            Token::Angle => write!(f, "<"),
        }
    }
}

/// Byte range of a token within the lexed source
pub type TokenSpan = Range<usize>;

/// Token paired with its byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<'src> {
    pub token: Token<'src>,
    pub span: TokenSpan,
}

/// Tokenize markup into a flat token stream
pub fn tokenize(source: &str) -> Vec<Spanned<'_>> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| {
            // The patterns cover every input byte; fall back to text regardless.
            let token = result.unwrap_or_else(|_| Token::Text(&source[span.clone()]));
            Spanned { token, span }
        })
        .collect()
}

/// What a tag token says about itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Lowercased ASCII tag name, empty when the tag has no name (`< p>`, `</>`)
    pub name: String,
    pub closing: bool,
    /// Whether the tag ended with `>`
    pub terminated: bool,
}

impl TagInfo {
    pub fn parse(slice: &str) -> Self {
        let inner = slice.strip_prefix('<').unwrap_or(slice);
        let terminated = inner.ends_with('>');
        let inner = inner.strip_suffix('>').unwrap_or(inner);

        let (closing, rest) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };

        let name = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self {
            name,
            closing,
            terminated,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
