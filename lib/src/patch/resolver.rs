use crate::jvm::class_file::{ClassConstantIndex, Constant, ConstantPool};
use crate::jvm::{BinaryName, Error};
use std::collections::HashSet;

#[derive(Debug)]
pub enum ResolveError {
    /// No `CONSTANT_Class` entry has this name
    NoCandidates(String),

    /// Entries with this name exist (how many is the second field), but no member reference
    /// declares any of them
    NoLiveCandidate(String, usize),

    Malformed(Error),
}

impl From<Error> for ResolveError {
    fn from(err: Error) -> ResolveError {
        ResolveError::Malformed(err)
    }
}

/// `CONSTANT_Class` entry whose name matches a queried class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbolCandidate {
    pub index: ClassConstantIndex,

    /// Dotted name (`com.example.Foo`)
    pub class_name: String,

    /// Whether some `Fieldref`, `Methodref`, or `InterfaceMethodref` is declared by this entry
    pub is_live: bool,
}

/// All `CONSTANT_Class` entries naming `class_name`, in table order
///
/// Compilers and bytecode rewriters sometimes leave more than one entry for the same class in the
/// pool. Only an entry that member references point at can show up in an `invokestatic`.
pub fn class_candidates(
    constants: &ConstantPool,
    class_name: &BinaryName,
) -> Result<Vec<ClassSymbolCandidate>, Error> {
    let live: HashSet<ClassConstantIndex> = constants
        .iter()
        .filter_map(|(_, constant)| constant.declaring_class())
        .collect();

    let dotted = class_name.to_dotted();
    let mut candidates = vec![];
    for (index, constant) in constants.iter() {
        if let Constant::Class(_) = constant {
            let index = ClassConstantIndex(index);
            let found_name = constants.class_name(index)?;
            if found_name == dotted {
                candidates.push(ClassSymbolCandidate {
                    index,
                    class_name: found_name,
                    is_live: live.contains(&index),
                });
            }
        }
    }
    Ok(candidates)
}

/// Find the `CONSTANT_Class` entry for `class_name` that is actually referenced
///
/// If several entries are referenced, the first one in table order wins.
pub fn resolve_class(
    constants: &ConstantPool,
    class_name: &BinaryName,
) -> Result<ClassConstantIndex, ResolveError> {
    let candidates = class_candidates(constants, class_name)?;
    log::trace!("class entries for {}: {:?}", class_name, candidates);
    if candidates.is_empty() {
        return Err(ResolveError::NoCandidates(class_name.to_dotted()));
    }

    let mut live = candidates.iter().filter(|candidate| candidate.is_live);
    let first = match live.next() {
        Some(first) => first,
        None => {
            return Err(ResolveError::NoLiveCandidate(
                class_name.to_dotted(),
                candidates.len(),
            ))
        }
    };
    let others = live.count();
    if others > 0 {
        log::warn!(
            "{} referenced class entries for {}, using #{}",
            others + 1,
            class_name,
            (first.index.0).0
        );
    }
    Ok(first.index)
}
