pub mod compile;

pub use compile::{compile, CompileArgs};
