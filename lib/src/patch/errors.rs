use super::{LineMapError, RepositoryError, ResolveError, WeaveError};
use crate::jvm;
use crate::jvm::code::{EncodeError, ScanError};
use crate::jvm::UnqualifiedName;
use std::fmt::{Display, Error as FmtError, Formatter};

/// Why a method was left alone
#[derive(Debug)]
pub enum SkipReason {
    ClassUnavailable(RepositoryError),
    MethodNotFound(UnqualifiedName),

    /// The method is abstract or native
    MissingCode,

    /// The class was compiled without line numbers
    MissingLineNumbers,
    Malformed(jvm::Error),

    /// The callee's class or the member reference to it is not in the constant pool
    SymbolNotFound(String),

    /// The callee is never invoked statically from the method
    InstructionNotFound,
    UnsupportedOpcodeWidth {
        opcode: u8,
        offset: u16,
    },
    MalformedBytecode(ScanError),
    NoEnclosingLine {
        offset: u16,
    },
    LineMapExhausted {
        line: u16,
    },
    WeaveRejected(WeaveError),
}

impl From<RepositoryError> for SkipReason {
    fn from(err: RepositoryError) -> SkipReason {
        SkipReason::ClassUnavailable(err)
    }
}

impl From<jvm::Error> for SkipReason {
    fn from(err: jvm::Error) -> SkipReason {
        SkipReason::Malformed(err)
    }
}

impl From<ResolveError> for SkipReason {
    fn from(err: ResolveError) -> SkipReason {
        match err {
            ResolveError::NoCandidates(name) => {
                SkipReason::SymbolNotFound(format!("no class entry for {}", name))
            }
            ResolveError::NoLiveCandidate(name, count) => SkipReason::SymbolNotFound(format!(
                "none of the {} class entries for {} is referenced",
                count, name
            )),
            ResolveError::Malformed(err) => SkipReason::Malformed(err),
        }
    }
}

impl From<EncodeError> for SkipReason {
    fn from(err: EncodeError) -> SkipReason {
        match err {
            EncodeError::MemberNotFound {
                owner,
                name,
                descriptor,
            } => SkipReason::SymbolNotFound(format!(
                "no method reference for {}.{}{}",
                owner, name, descriptor
            )),
            EncodeError::Malformed(err) => SkipReason::Malformed(err),
        }
    }
}

impl From<ScanError> for SkipReason {
    fn from(err: ScanError) -> SkipReason {
        match err {
            ScanError::UnsupportedOpcodeWidth { opcode, offset } => {
                SkipReason::UnsupportedOpcodeWidth { opcode, offset }
            }
            other => SkipReason::MalformedBytecode(other),
        }
    }
}

impl From<LineMapError> for SkipReason {
    fn from(err: LineMapError) -> SkipReason {
        match err {
            LineMapError::NoEnclosingLine { offset } => SkipReason::NoEnclosingLine { offset },
            LineMapError::Exhausted { line } => SkipReason::LineMapExhausted { line },
        }
    }
}

impl From<WeaveError> for SkipReason {
    fn from(err: WeaveError) -> SkipReason {
        SkipReason::WeaveRejected(err)
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            SkipReason::ClassUnavailable(RepositoryError::NotFound(name)) => {
                write!(f, "class {} not found", name)
            }
            SkipReason::ClassUnavailable(err) => write!(f, "class could not be loaded: {:?}", err),
            SkipReason::MethodNotFound(name) => write!(f, "no method named {}", name),
            SkipReason::MissingCode => f.write_str("method has no code"),
            SkipReason::MissingLineNumbers => f.write_str("method has no line number table"),
            SkipReason::Malformed(err) => write!(f, "malformed class file: {:?}", err),
            SkipReason::SymbolNotFound(detail) => write!(f, "symbol not found: {}", detail),
            SkipReason::InstructionNotFound => f.write_str("call instruction not found"),
            SkipReason::UnsupportedOpcodeWidth { opcode, offset } => write!(
                f,
                "unsupported variable width opcode 0x{:02x} at offset {}",
                opcode, offset
            ),
            SkipReason::MalformedBytecode(err) => write!(f, "malformed bytecode: {:?}", err),
            SkipReason::NoEnclosingLine { offset } => {
                write!(f, "no line number covers offset {}", offset)
            }
            SkipReason::LineMapExhausted { line } => {
                write!(f, "no line number entry follows line {}", line)
            }
            SkipReason::WeaveRejected(WeaveError::Rejected(msg)) => {
                write!(f, "weaver rejected the snippet: {}", msg)
            }
        }
    }
}
