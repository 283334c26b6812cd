pub mod compiler;
pub mod ops;
pub mod tracker;


pub use compiler::{compile_batch, compile_blocks, compile_markup, plain_text};
pub use ops::{utf16_len, BatchUpdate, HeadingLevel, Operation, TextRange};
pub use tracker::IndexTracker;
