use crate::jvm::class_file::{
    read_bytes, ConstantIndex, ConstantPool, Deserialize, Serialize, Utf8ConstantIndex,
};
use crate::jvm::Error;
use byteorder::{ReadBytesExt, WriteBytesExt};

/// Attributes (used in classes, fields, methods, and even on some attributes)
///
/// Attributes are kept as raw bytes until someone asks for a particular one (see
/// [`Attribute::decode`]). This means attributes we know nothing about survive a read-write
/// round trip untouched.
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name_index: Utf8ConstantIndex,
    pub info: Vec<u8>,
}

impl Attribute {
    pub fn name<'p>(&self, constants: &'p ConstantPool) -> Result<&'p str, Error> {
        constants.utf8(self.name_index)
    }

    /// Decode the attribute body as `A`, provided the attribute is named `A::NAME`
    ///
    /// The whole body must be consumed: leftover bytes mean the attribute is malformed.
    pub fn decode<A: AttributeLike>(&self, constants: &ConstantPool) -> Result<Option<A>, Error> {
        if self.name(constants)? != A::NAME {
            return Ok(None);
        }
        let mut reader: &[u8] = &self.info;
        let decoded = A::deserialize(&mut reader).map_err(|err| Error::MalformedAttribute {
            name: A::NAME,
            reason: err.to_string(),
        })?;
        if !reader.is_empty() {
            return Err(Error::MalformedAttribute {
                name: A::NAME,
                reason: format!("{} trailing bytes", reader.len()),
            });
        }
        Ok(Some(decoded))
    }

    /// Encode an attribute body, given the index of a `CONSTANT_Utf8` holding `A::NAME`
    pub fn encode<A: AttributeLike>(
        name_index: Utf8ConstantIndex,
        attribute: &A,
    ) -> Result<Attribute, Error> {
        let mut info = vec![];
        attribute.serialize(&mut info).map_err(Error::IoError)?;
        Ok(Attribute { name_index, info })
    }
}

impl Serialize for Attribute {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.name_index.serialize(writer)?;

        // Attribute info length is 4 bytes
        (self.info.len() as u32).serialize(writer)?;
        writer.write_all(&self.info)?;

        Ok(())
    }
}

impl Deserialize for Attribute {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        let name_index = Utf8ConstantIndex::deserialize(reader)?;
        let len = u32::deserialize(reader)? as usize;
        let info = read_bytes(reader, len)?;
        Ok(Attribute { name_index, info })
    }
}

/// Attributes are all stored in the same way (see `Attribute`), but internally
/// they represent very different things. This trait is implemented by things
/// which can be decoded from (or encoded into) attributes.
pub trait AttributeLike: Serialize + Deserialize {
    /// Name of the attribute
    const NAME: &'static str;
}

/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7.3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code_array: BytecodeArray,
    pub exception_table: Vec<ExceptionHandler>,
    pub attributes: Vec<Attribute>,
}

impl Code {
    /// Line number table of the method body
    ///
    /// The JVMS allows several `LineNumberTable` attributes on one `Code` attribute, in which case
    /// they are concatenated in order. No table at all yields an empty table.
    pub fn line_numbers(&self, constants: &ConstantPool) -> Result<LineNumberTable, Error> {
        let mut entries = vec![];
        for attribute in &self.attributes {
            if let Some(LineNumberTable(more)) = attribute.decode::<LineNumberTable>(constants)? {
                entries.extend(more);
            }
        }
        Ok(LineNumberTable(entries))
    }
}

impl Serialize for Code {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.max_stack.serialize(writer)?;
        self.max_locals.serialize(writer)?;
        self.code_array.serialize(writer)?;
        self.exception_table.serialize(writer)?;
        self.attributes.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for Code {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Code {
            max_stack: u16::deserialize(reader)?,
            max_locals: u16::deserialize(reader)?,
            code_array: BytecodeArray::deserialize(reader)?,
            exception_table: Vec::deserialize(reader)?,
            attributes: Vec::deserialize(reader)?,
        })
    }
}

impl AttributeLike for Code {
    const NAME: &'static str = "Code";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// Start of exception handler range (inclusive)
    pub start_pc: u16,

    /// End of exception handler range (exclusive)
    pub end_pc: u16,

    /// Start of the exception handler
    pub handler_pc: u16,

    /// Zero catches everything (`finally`)
    pub catch_type: ConstantIndex,
}

impl Serialize for ExceptionHandler {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.start_pc.serialize(writer)?;
        self.end_pc.serialize(writer)?;
        self.handler_pc.serialize(writer)?;
        self.catch_type.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for ExceptionHandler {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        Ok(ExceptionHandler {
            start_pc: u16::deserialize(reader)?,
            end_pc: u16::deserialize(reader)?,
            handler_pc: u16::deserialize(reader)?,
            catch_type: ConstantIndex::deserialize(reader)?,
        })
    }
}

/// Encoded bytecode instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytecodeArray(pub Vec<u8>);

impl Serialize for BytecodeArray {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        let len = self.0.len() as u32;
        len.serialize(writer)?;
        writer.write_all(&self.0)?;
        Ok(())
    }
}

impl Deserialize for BytecodeArray {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        let len = u32::deserialize(reader)? as usize;
        Ok(BytecodeArray(read_bytes(reader, len)?))
    }
}

/// Mapping from bytecode offsets to source lines
///
/// Entries are kept in table order. Compilers emit them sorted by `start_pc`, but line numbers
/// themselves repeat and jump around (loops, inlined `finally` blocks), so anything that needs to
/// talk about "the next entry" has to work with positions in the table and not line numbers.
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7.12
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineNumberTable(pub Vec<LineNumber>);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineNumber {
    pub start_pc: u16,
    pub line_number: u16,
}

impl LineNumberTable {
    pub fn entries(&self) -> &[LineNumber] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Source line of the instruction at `offset`
    ///
    /// This is the line of the entry with the greatest `start_pc` not exceeding `offset`. Entries
    /// are walked in table order until one starts past `offset`; among entries sharing a
    /// `start_pc`, the later one wins. An offset before the first entry has no line.
    pub fn line_at(&self, offset: u16) -> Option<u16> {
        self.0
            .iter()
            .take_while(|entry| entry.start_pc <= offset)
            .last()
            .map(|entry| entry.line_number)
    }
}

impl Serialize for LineNumberTable {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Deserialize for LineNumberTable {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        Ok(LineNumberTable(Vec::deserialize(reader)?))
    }
}

impl AttributeLike for LineNumberTable {
    const NAME: &'static str = "LineNumberTable";
}

impl Serialize for LineNumber {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.start_pc.serialize(writer)?;
        self.line_number.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for LineNumber {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        Ok(LineNumber {
            start_pc: u16::deserialize(reader)?,
            line_number: u16::deserialize(reader)?,
        })
    }
}
