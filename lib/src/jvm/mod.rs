//! Read (and write back) JVM classes
//!
//! Only the parts of the [class file format][0] needed to find call sites are given a structured
//! representation: the constant pool, methods, and the `Code` and `LineNumberTable` attributes.
//! Everything else is kept as raw attribute bytes so that a class file can be written back out
//! unchanged.
//!
//! ### Simple example
//!
//! ```no_run
//! use callsite_patch::jvm::class_file::ClassFile;
//! use callsite_patch::jvm::*;
//! use std::fs::File;
//!
//! # fn find_lines() -> Result<(), Error> {
//! let mut file = File::open("com/wurmonline/server/skills/Skill.class").map_err(Error::IoError)?;
//! let class = ClassFile::read(&mut file)?;
//!
//! let method = class.method("checkAdvance").expect("method exists");
//! if let Some(code) = method.code(&class.constants)? {
//!     for entry in code.line_numbers(&class.constants)?.entries() {
//!         println!("pc {} -> line {}", entry.start_pc, entry.line_number);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html

mod access_flags;
pub mod class_file;
pub mod code;
mod descriptors;
mod errors;
mod names;

pub use access_flags::*;
pub use descriptors::*;
pub use errors::*;
pub use names::*;
