pub mod classify;
pub mod entities;
pub mod lexer;
pub mod sanitize;
pub mod segment;


pub use classify::{classify, Block, BlockKind};
pub use entities::decode_entities;
pub use lexer::{tokenize, Spanned, TagInfo, Token, TokenSpan};
pub use sanitize::{contains_script, sanitize};
pub use segment::{segment, Segment};

/// Sanitize, segment and classify markup into ordered blocks.
///
/// Total over all inputs: malformed markup degrades to fewer or odder blocks,
/// never to an error.
pub fn parse_blocks(markup: &str) -> Vec<Block> {
    let sanitized = sanitize(markup);
    segment(&sanitized).iter().map(classify).collect()
}
