use crate::jvm::class_file::ClassFile;
use crate::jvm::{BinaryName, Error};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::PathBuf;

#[derive(Debug)]
pub enum RepositoryError {
    NotFound(BinaryName),
    IoError(std::io::Error),
    Malformed(Error),
}

impl From<Error> for RepositoryError {
    fn from(err: Error) -> RepositoryError {
        RepositoryError::Malformed(err)
    }
}

/// Source of class files
pub trait ClassRepository {
    fn load(&self, name: &BinaryName) -> Result<ClassFile, RepositoryError>;
}

/// Classes laid out on disk as on a class path (`<root>/com/example/Foo.class`)
pub struct ClassPathDirectory {
    root: PathBuf,
}

impl ClassPathDirectory {
    pub fn new(root: impl Into<PathBuf>) -> ClassPathDirectory {
        ClassPathDirectory { root: root.into() }
    }

    pub fn path_of(&self, name: &BinaryName) -> PathBuf {
        self.root.join(name.class_file_path())
    }
}

impl ClassRepository for ClassPathDirectory {
    fn load(&self, name: &BinaryName) -> Result<ClassFile, RepositoryError> {
        let path = self.path_of(name);
        log::debug!("Reading '{}'", path.display());
        let file = File::open(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => RepositoryError::NotFound(name.clone()),
            _ => RepositoryError::IoError(err),
        })?;
        Ok(ClassFile::read(&mut BufReader::new(file))?)
    }
}

/// Class file bytes kept in memory
///
/// Classes are parsed afresh on every load, so the stored bytes are never altered.
#[derive(Default)]
pub struct InMemoryClasses {
    classes: HashMap<BinaryName, Vec<u8>>,
}

impl InMemoryClasses {
    pub fn new() -> InMemoryClasses {
        InMemoryClasses::default()
    }

    pub fn insert(&mut self, name: BinaryName, bytes: Vec<u8>) {
        self.classes.insert(name, bytes);
    }

    /// Serialize the class and store it under its own name
    pub fn insert_class(&mut self, class: &ClassFile) -> Result<BinaryName, Error> {
        let name = BinaryName::from_dotted(&class.name()?).map_err(Error::BadName)?;
        self.classes.insert(name.clone(), class.to_bytes()?);
        Ok(name)
    }

    pub fn bytes(&self, name: &BinaryName) -> Option<&[u8]> {
        self.classes.get(name).map(Vec::as_slice)
    }
}

impl ClassRepository for InMemoryClasses {
    fn load(&self, name: &BinaryName) -> Result<ClassFile, RepositoryError> {
        let mut bytes = self
            .bytes(name)
            .ok_or_else(|| RepositoryError::NotFound(name.clone()))?;
        Ok(ClassFile::read(&mut bytes)?)
    }
}
