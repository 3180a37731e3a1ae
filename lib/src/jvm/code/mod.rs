//! Bytecode, at the level of raw instruction bytes
//!
//! Nothing here builds an instruction AST. Method bodies are only ever walked to find where each
//! instruction starts and how many bytes it spans (see [`instruction_width`]), which is enough to
//! compare instructions against a synthesized target (see [`encode_static_invoke`]) byte for
//! byte. Switch instructions have a width depending on their alignment and contents; they are
//! reported as unsupported instead of being decoded.
//!
//! [0]: https://docs.oracle.com/javase/specs/jvms/se18/html/jvms-6.html#jvms-6.5

mod encoder;
mod instruction;
mod opcodes;
mod scanner;

pub use encoder::*;
pub use instruction::*;
pub use opcodes::*;
pub use scanner::*;
