use crate::jvm::class_file::{
    Attribute, ClassConstantIndex, ConstantIndex, ConstantPool, Deserialize, Field, Method,
    Serialize, Version,
};
use crate::jvm::{ClassAccessFlags, Error, RawAccessFlags};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{Error as IoError, ErrorKind, Read};

/// Representation of the [`class` file format of the JVM][0]
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    pub version: Version,
    pub constants: ConstantPool,
    pub access_flags: RawAccessFlags<ClassAccessFlags>,
    pub this_class: ClassConstantIndex,

    /// Zero only for `java/lang/Object`
    pub super_class: ConstantIndex,
    pub interfaces: Vec<ClassConstantIndex>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub attributes: Vec<Attribute>,
}

impl ClassFile {
    /// Magic header bytes that go at the front of the serialized class file
    const MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

    /// Read a whole class file
    pub fn read<R: Read>(reader: &mut R) -> Result<ClassFile, Error> {
        ClassFile::deserialize(reader).map_err(Error::IoError)
    }

    /// Encode the class back into bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = vec![];
        self.serialize(&mut bytes).map_err(Error::IoError)?;
        Ok(bytes)
    }

    /// Source-level name of the class itself
    pub fn name(&self) -> Result<String, Error> {
        self.constants.class_name(self.this_class)
    }

    /// First method with the given name, in declaration order
    ///
    /// Overloads are not distinguished: callers wanting a particular one should filter
    /// [`ClassFile::methods`] on the descriptor themselves. Methods whose name index is broken are
    /// skipped.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| matches!(method.name(&self.constants), Ok(found) if found == name))
    }
}

impl Serialize for ClassFile {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&ClassFile::MAGIC)?;
        self.version.serialize(writer)?;
        self.constants.serialize(writer)?;
        self.access_flags.serialize(writer)?;
        self.this_class.serialize(writer)?;
        self.super_class.serialize(writer)?;
        self.interfaces.serialize(writer)?;
        self.fields.serialize(writer)?;
        self.methods.serialize(writer)?;
        self.attributes.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for ClassFile {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != ClassFile::MAGIC {
            let msg = format!("Bad class file magic {:02x?}", magic);
            return Err(IoError::new(ErrorKind::InvalidData, msg));
        }

        let class_file = ClassFile {
            version: Version::deserialize(reader)?,
            constants: ConstantPool::deserialize(reader)?,
            access_flags: RawAccessFlags::deserialize(reader)?,
            this_class: ClassConstantIndex::deserialize(reader)?,
            super_class: ConstantIndex::deserialize(reader)?,
            interfaces: Vec::deserialize(reader)?,
            fields: Vec::deserialize(reader)?,
            methods: Vec::deserialize(reader)?,
            attributes: Vec::deserialize(reader)?,
        };

        // Trailing garbage after the last attribute is not a class file
        let mut rest = [0u8; 1];
        if reader.read(&mut rest)? != 0 {
            let msg = "Unexpected bytes after the end of the class file";
            return Err(IoError::new(ErrorKind::InvalidData, msg));
        }

        Ok(class_file)
    }
}
