//! Find the line right after a static call site in a compiled JVM method, so that
//! instrumentation can be spliced in there.
//!
//! The pipeline reads a class file ([`jvm::class_file`]), resolves the owner class of the
//! callee in the constant pool, synthesizes the `invokestatic` instruction that a real call would
//! compile to ([`jvm::code`]), scans the method's bytecode for it, and finally maps the matching
//! offset onto the line table. The [`patch`] module ties this together and hands the result to
//! an external weaver.

pub mod jvm;
pub mod patch;
pub mod report;
mod util;
