use crate::jvm::class_file::{
    Attribute, Code, ConstantPool, Deserialize, Serialize, Utf8ConstantIndex,
};
use crate::jvm::{Error, MethodAccessFlags, MethodDescriptor, ParseDescriptor, RawAccessFlags};
use byteorder::{ReadBytesExt, WriteBytesExt};

/// Method declared by a class or interface
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub access_flags: RawAccessFlags<MethodAccessFlags>,
    pub name_index: Utf8ConstantIndex,
    pub descriptor_index: Utf8ConstantIndex,
    pub attributes: Vec<Attribute>,
}

impl Method {
    pub fn name<'p>(&self, constants: &'p ConstantPool) -> Result<&'p str, Error> {
        constants.utf8(self.name_index)
    }

    pub fn descriptor(&self, constants: &ConstantPool) -> Result<MethodDescriptor, Error> {
        let descriptor = constants.utf8(self.descriptor_index)?;
        MethodDescriptor::parse(descriptor)
            .map_err(|_| Error::BadDescriptor(descriptor.to_owned()))
    }

    /// Method body, if there is one (`abstract` and `native` methods have none)
    pub fn code(&self, constants: &ConstantPool) -> Result<Option<Code>, Error> {
        for attribute in &self.attributes {
            if let Some(code) = attribute.decode::<Code>(constants)? {
                return Ok(Some(code));
            }
        }
        Ok(None)
    }
}

impl Serialize for Method {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.access_flags.serialize(writer)?;
        self.name_index.serialize(writer)?;
        self.descriptor_index.serialize(writer)?;
        self.attributes.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for Method {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Method {
            access_flags: RawAccessFlags::deserialize(reader)?,
            name_index: Utf8ConstantIndex::deserialize(reader)?,
            descriptor_index: Utf8ConstantIndex::deserialize(reader)?,
            attributes: Vec::deserialize(reader)?,
        })
    }
}
