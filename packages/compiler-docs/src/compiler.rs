use crate::ops::{utf16_len, BatchUpdate, HeadingLevel, Operation};
use crate::tracker::IndexTracker;
use docsync_markup::{parse_blocks, Block};

/// Per-call compilation state; nothing here outlives one compile
struct Context {
    tracker: IndexTracker,
    operations: Vec<Operation>,
}

impl Context {
    fn new() -> Self {
        Self {
            tracker: IndexTracker::new(),
            operations: Vec::new(),
        }
    }

    fn add(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    fn emit_block(&mut self, block: &Block) {
        let range = self.tracker.reserve(utf16_len(&block.text));

        self.add(Operation::InsertText {
            location: range.start,
            text: format!("{}\n", block.text),
        });

        // The style must follow its own insertion and cover exactly that text
        if let Some(style) = HeadingLevel::for_block(block.kind) {
            self.add(Operation::UpdateParagraphStyle { range, style });
        }
    }

    fn get_output(self) -> Vec<Operation> {
        self.operations
    }
}

/// Emit the ordered edit script for already classified blocks
pub fn compile_blocks(blocks: &[Block]) -> Vec<Operation> {
    let mut ctx = Context::new();

    for block in blocks {
        ctx.emit_block(block);
    }

    tracing::debug!(
        blocks = blocks.len(),
        operations = ctx.operations.len(),
        end_index = ctx.tracker.cursor(),
        "compiled blocks"
    );

    ctx.get_output()
}

/// Compile raw markup into document edit operations
pub fn compile_markup(markup: &str) -> Vec<Operation> {
    compile_blocks(&parse_blocks(markup))
}

/// Compile raw markup into a batch ready for submission
pub fn compile_batch(markup: &str) -> BatchUpdate {
    BatchUpdate {
        requests: compile_markup(markup),
    }
}

/// The text the operations leave in the document, in order
pub fn plain_text(operations: &[Operation]) -> String {
    operations
        .iter()
        .filter_map(Operation::inserted_text)
        .collect()
}
