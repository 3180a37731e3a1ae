use super::class_file::ConstantIndex;

#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),

    /// Constant pool index that is zero, past the end, or the unusable slot after a `long` or
    /// `double` constant
    MissingConstant(ConstantIndex),

    /// Constant pool entry exists, but has the wrong tag
    UnexpectedConstant {
        index: ConstantIndex,
        expected: &'static str,
        found: &'static str,
    },

    BadDescriptor(String),
    BadName(String),

    /// An attribute whose body does not match its declared layout
    MalformedAttribute {
        name: &'static str,
        reason: String,
    },
}
