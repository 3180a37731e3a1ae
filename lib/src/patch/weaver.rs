use crate::jvm::{BinaryName, UnqualifiedName};

#[derive(Debug, PartialEq, Eq)]
pub enum WeaveError {
    /// The weaver refused the snippet (eg. it does not compile against the class)
    Rejected(String),
}

/// Something able to compile a source snippet into a method at a given line
pub trait Weaver {
    fn insert_at(
        &mut self,
        class: &BinaryName,
        method: &UnqualifiedName,
        line: u16,
        snippet: &str,
    ) -> Result<(), WeaveError>;
}

/// One call to [`Weaver::insert_at`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub class: BinaryName,
    pub method: UnqualifiedName,
    pub line: u16,
    pub snippet: String,
}

/// Weaver that only remembers what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingWeaver {
    pub insertions: Vec<Insertion>,

    /// When set, every insertion is rejected with this message (and not recorded)
    pub reject_with: Option<String>,
}

impl RecordingWeaver {
    pub fn new() -> RecordingWeaver {
        RecordingWeaver::default()
    }

    pub fn rejecting(message: impl Into<String>) -> RecordingWeaver {
        RecordingWeaver {
            insertions: vec![],
            reject_with: Some(message.into()),
        }
    }
}

impl Weaver for RecordingWeaver {
    fn insert_at(
        &mut self,
        class: &BinaryName,
        method: &UnqualifiedName,
        line: u16,
        snippet: &str,
    ) -> Result<(), WeaveError> {
        if let Some(message) = &self.reject_with {
            return Err(WeaveError::Rejected(message.clone()));
        }
        self.insertions.push(Insertion {
            class: class.clone(),
            method: method.clone(),
            line,
            snippet: String::from(snippet),
        });
        Ok(())
    }
}
