use crate::ops::TextRange;

/// Insertion cursor for one compilation.
///
/// Position 0 belongs to the destination document itself, so the first free
/// position is 1. Every reservation is followed by one line break, which the
/// cursor skips over as well. Not `Clone`; one tracker per compile call.
#[derive(Debug)]
pub struct IndexTracker {
    cursor: usize,
}

impl IndexTracker {
    pub const START: usize = 1;

    pub fn new() -> Self {
        Self {
            cursor: Self::START,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserve `[cursor, cursor + len)` and move past it and its line break
    pub fn reserve(&mut self, len: usize) -> TextRange {
        let range = TextRange {
            start: self.cursor,
            end: self.cursor + len,
        };
        self.cursor = range.end + 1;
        range
    }
}

impl Default for IndexTracker {
    fn default() -> Self {
        Self::new()
    }
}
