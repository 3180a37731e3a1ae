use crate::jvm::class_file::{read_bytes, Deserialize, Serialize};
use crate::jvm::{Error, FieldType, ParseDescriptor};
use crate::util::{Offset, OffsetVec, Width};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{Error as IoError, ErrorKind};

/// Class file constant pool, as read from a class file
///
/// Entries are addressed by their 1-based slot index (see [`Width`] for why slots and entries are
/// not the same thing). Reading never deduplicates anything: the same class or string may show up
/// at several indices, and code referring to the pool has to cope with that.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPool {
    constants: OffsetVec<Constant>,
}

impl ConstantPool {
    /// Make a fresh empty constants pool
    pub fn new() -> ConstantPool {
        ConstantPool {
            constants: OffsetVec::new_starting_at(Offset(1)),
        }
    }

    /// Number of slots in the pool, counting the reserved slot 0 (this is the value stored as
    /// `constant_pool_count` in the class file)
    pub fn slot_count(&self) -> u16 {
        self.constants.offset_len().0 as u16
    }

    /// Number of entries (wide constants count once)
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Append a constant, returning its index
    ///
    /// No check is made for an existing equal constant: pushing the same class twice produces two
    /// distinct `CONSTANT_Class` entries.
    pub fn push(&mut self, constant: Constant) -> ConstantIndex {
        ConstantIndex(self.constants.push(constant).0 as u16)
    }

    pub fn push_utf8(&mut self, utf8: impl Into<String>) -> Utf8ConstantIndex {
        Utf8ConstantIndex(self.push(Constant::Utf8(utf8.into())))
    }

    /// Append a `CONSTANT_Class` (and the `CONSTANT_Utf8` holding its internal name)
    pub fn push_class(&mut self, internal_name: &str) -> ClassConstantIndex {
        let name = self.push_utf8(internal_name);
        ClassConstantIndex(self.push(Constant::Class(name)))
    }

    pub fn push_name_and_type(&mut self, name: &str, descriptor: &str) -> NameAndTypeConstantIndex {
        let name = self.push_utf8(name);
        let descriptor = self.push_utf8(descriptor);
        NameAndTypeConstantIndex(self.push(Constant::NameAndType { name, descriptor }))
    }

    pub fn push_method_ref(
        &mut self,
        class: ClassConstantIndex,
        name: &str,
        descriptor: &str,
        is_interface: bool,
    ) -> MethodRefConstantIndex {
        let name_and_type = self.push_name_and_type(name, descriptor);
        MethodRefConstantIndex(self.push(Constant::MethodRef {
            class,
            name_and_type,
            is_interface,
        }))
    }

    pub fn push_field_ref(
        &mut self,
        class: ClassConstantIndex,
        name: &str,
        descriptor: &str,
    ) -> ConstantIndex {
        let name_and_type = self.push_name_and_type(name, descriptor);
        self.push(Constant::FieldRef(class, name_and_type))
    }

    /// Look up a constant
    ///
    /// Index 0 and the slot after a `long` or `double` are not valid indices.
    pub fn get(&self, index: ConstantIndex) -> Result<&Constant, Error> {
        self.constants
            .get_offset(Offset(index.0 as usize))
            .ok_or(Error::MissingConstant(index))
    }

    /// All constants, in table order
    pub fn iter(&self) -> impl Iterator<Item = (ConstantIndex, &Constant)> + '_ {
        self.constants
            .iter()
            .map(|(offset, constant)| (ConstantIndex(offset.0 as u16), constant))
    }

    pub fn utf8(&self, index: Utf8ConstantIndex) -> Result<&str, Error> {
        match self.get(index.0)? {
            Constant::Utf8(string) => Ok(string),
            other => Err(Error::UnexpectedConstant {
                index: index.0,
                expected: "Utf8",
                found: other.tag_name(),
            }),
        }
    }

    /// Internal name stored in a `CONSTANT_Class` (`java/lang/String` or `[I`)
    pub fn class_internal_name(&self, index: ClassConstantIndex) -> Result<&str, Error> {
        match self.get(index.0)? {
            Constant::Class(name) => self.utf8(*name),
            other => Err(Error::UnexpectedConstant {
                index: index.0,
                expected: "Class",
                found: other.tag_name(),
            }),
        }
    }

    /// Source-level name of a `CONSTANT_Class`
    ///
    /// Object classes come back dotted (`java.lang.String`), array classes in their Java form
    /// (`int[]`, `java.lang.String[][]`).
    pub fn class_name(&self, index: ClassConstantIndex) -> Result<String, Error> {
        let internal = self.class_internal_name(index)?;
        if internal.starts_with('[') {
            FieldType::parse(internal)
                .map(|array_type| array_type.java_name())
                .map_err(|_| Error::BadDescriptor(internal.to_owned()))
        } else {
            Ok(internal.replace('/', "."))
        }
    }

    /// Name and descriptor strings of a `CONSTANT_NameAndType`
    pub fn name_and_type(&self, index: NameAndTypeConstantIndex) -> Result<(&str, &str), Error> {
        match self.get(index.0)? {
            Constant::NameAndType { name, descriptor } => {
                Ok((self.utf8(*name)?, self.utf8(*descriptor)?))
            }
            other => Err(Error::UnexpectedConstant {
                index: index.0,
                expected: "NameAndType",
                found: other.tag_name(),
            }),
        }
    }
}

impl Default for ConstantPool {
    fn default() -> Self {
        ConstantPool::new()
    }
}

impl Serialize for ConstantPool {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.slot_count().serialize(writer)?;
        for (_, constant) in &self.constants {
            constant.serialize(writer)?;
        }
        Ok(())
    }
}

impl Deserialize for ConstantPool {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        let count = u16::deserialize(reader)? as usize;
        if count == 0 {
            let msg = "Constant pool count of zero leaves no room for the reserved slot 0";
            return Err(IoError::new(ErrorKind::InvalidData, msg));
        }
        let mut pool = ConstantPool::new();
        while pool.constants.offset_len().0 < count {
            pool.constants.push(Constant::deserialize(reader)?);
        }
        if pool.constants.offset_len().0 > count {
            let msg = "Wide constant overflows the constant pool";
            return Err(IoError::new(ErrorKind::InvalidData, msg));
        }
        Ok(pool)
    }
}

/// Constants as in the constant pool
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.4
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Class or an interface
    Class(Utf8ConstantIndex),

    /// Field
    FieldRef(ClassConstantIndex, NameAndTypeConstantIndex),

    /// Method (this combines `Methodref` and `InterfaceMethodref`
    MethodRef {
        class: ClassConstantIndex,
        name_and_type: NameAndTypeConstantIndex,
        is_interface: bool,
    },

    /// Constant object of type `java.lang.String`
    String(Utf8ConstantIndex),

    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),

    /// Name and a type (eg. for a field or a method)
    NameAndType {
        name: Utf8ConstantIndex,
        descriptor: Utf8ConstantIndex,
    },

    /// Constant UTF-8 encoded raw string value
    ///
    /// Despite the name, the encoding is not quite UTF-8 (see [`decode_modified_utf8`]).
    Utf8(String),

    /// Constant object of type `java.lang.invoke.MethodHandle`
    MethodHandle {
        handle_kind: HandleKind,
        member: ConstantIndex,
    },

    /// Method type
    MethodType { descriptor: Utf8ConstantIndex },

    /// Dynamically-computed constant
    Dynamic {
        bootstrap_method: u16,
        name_and_type: NameAndTypeConstantIndex,
    },

    /// Dynamically-computed call site
    InvokeDynamic {
        bootstrap_method: u16,
        name_and_type: NameAndTypeConstantIndex,
    },

    Module(Utf8ConstantIndex),
    Package(Utf8ConstantIndex),
}

impl Constant {
    /// Class referenced by a `Fieldref`, `Methodref`, or `InterfaceMethodref` entry
    pub fn declaring_class(&self) -> Option<ClassConstantIndex> {
        match self {
            Constant::FieldRef(class, _) | Constant::MethodRef { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Name of the tag, as in the JVMS (`CONSTANT_<tag>_info`)
    pub fn tag_name(&self) -> &'static str {
        match self {
            Constant::Class(_) => "Class",
            Constant::FieldRef(_, _) => "Fieldref",
            Constant::MethodRef {
                is_interface: false,
                ..
            } => "Methodref",
            Constant::MethodRef {
                is_interface: true, ..
            } => "InterfaceMethodref",
            Constant::String(_) => "String",
            Constant::Integer(_) => "Integer",
            Constant::Float(_) => "Float",
            Constant::Long(_) => "Long",
            Constant::Double(_) => "Double",
            Constant::NameAndType { .. } => "NameAndType",
            Constant::Utf8(_) => "Utf8",
            Constant::MethodHandle { .. } => "MethodHandle",
            Constant::MethodType { .. } => "MethodType",
            Constant::Dynamic { .. } => "Dynamic",
            Constant::InvokeDynamic { .. } => "InvokeDynamic",
            Constant::Module(_) => "Module",
            Constant::Package(_) => "Package",
        }
    }
}

impl Serialize for Constant {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            Constant::Utf8(string) => {
                1u8.serialize(writer)?;
                let buffer: Vec<u8> = encode_modified_utf8(string);
                (buffer.len() as u16).serialize(writer)?;
                writer.write_all(&buffer)?;
            }
            Constant::Integer(integer) => {
                3u8.serialize(writer)?;
                integer.serialize(writer)?;
            }
            Constant::Float(float) => {
                4u8.serialize(writer)?;
                float.serialize(writer)?;
            }
            Constant::Long(long) => {
                5u8.serialize(writer)?;
                long.serialize(writer)?;
            }
            Constant::Double(double) => {
                6u8.serialize(writer)?;
                double.serialize(writer)?;
            }
            Constant::Class(name) => {
                7u8.serialize(writer)?;
                name.serialize(writer)?;
            }
            Constant::String(bytes) => {
                8u8.serialize(writer)?;
                bytes.serialize(writer)?;
            }
            Constant::FieldRef(class, name_and_type) => {
                9u8.serialize(writer)?;
                class.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::MethodRef {
                class,
                name_and_type,
                is_interface,
            } => {
                (if !is_interface { 10u8 } else { 11u8 }).serialize(writer)?;
                class.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::NameAndType { name, descriptor } => {
                12u8.serialize(writer)?;
                name.serialize(writer)?;
                descriptor.serialize(writer)?;
            }
            Constant::MethodHandle {
                handle_kind,
                member,
            } => {
                15u8.serialize(writer)?;
                handle_kind.serialize(writer)?;
                member.serialize(writer)?;
            }
            Constant::MethodType { descriptor } => {
                16u8.serialize(writer)?;
                descriptor.serialize(writer)?;
            }
            Constant::Dynamic {
                bootstrap_method,
                name_and_type,
            } => {
                17u8.serialize(writer)?;
                bootstrap_method.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::InvokeDynamic {
                bootstrap_method,
                name_and_type,
            } => {
                18u8.serialize(writer)?;
                bootstrap_method.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::Module(name) => {
                19u8.serialize(writer)?;
                name.serialize(writer)?;
            }
            Constant::Package(name) => {
                20u8.serialize(writer)?;
                name.serialize(writer)?;
            }
        };
        Ok(())
    }
}

impl Deserialize for Constant {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        let constant = match u8::deserialize(reader)? {
            1 => {
                let len = u16::deserialize(reader)? as usize;
                let bytes = read_bytes(reader, len)?;
                let string = decode_modified_utf8(&bytes)
                    .map_err(|msg| IoError::new(ErrorKind::InvalidData, msg))?;
                Constant::Utf8(string)
            }
            3 => Constant::Integer(i32::deserialize(reader)?),
            4 => Constant::Float(f32::deserialize(reader)?),
            5 => Constant::Long(i64::deserialize(reader)?),
            6 => Constant::Double(f64::deserialize(reader)?),
            7 => Constant::Class(Utf8ConstantIndex::deserialize(reader)?),
            8 => Constant::String(Utf8ConstantIndex::deserialize(reader)?),
            9 => Constant::FieldRef(
                ClassConstantIndex::deserialize(reader)?,
                NameAndTypeConstantIndex::deserialize(reader)?,
            ),
            tag @ (10 | 11) => Constant::MethodRef {
                class: ClassConstantIndex::deserialize(reader)?,
                name_and_type: NameAndTypeConstantIndex::deserialize(reader)?,
                is_interface: tag == 11,
            },
            12 => Constant::NameAndType {
                name: Utf8ConstantIndex::deserialize(reader)?,
                descriptor: Utf8ConstantIndex::deserialize(reader)?,
            },
            15 => Constant::MethodHandle {
                handle_kind: HandleKind::deserialize(reader)?,
                member: ConstantIndex::deserialize(reader)?,
            },
            16 => Constant::MethodType {
                descriptor: Utf8ConstantIndex::deserialize(reader)?,
            },
            17 => Constant::Dynamic {
                bootstrap_method: u16::deserialize(reader)?,
                name_and_type: NameAndTypeConstantIndex::deserialize(reader)?,
            },
            18 => Constant::InvokeDynamic {
                bootstrap_method: u16::deserialize(reader)?,
                name_and_type: NameAndTypeConstantIndex::deserialize(reader)?,
            },
            19 => Constant::Module(Utf8ConstantIndex::deserialize(reader)?),
            20 => Constant::Package(Utf8ConstantIndex::deserialize(reader)?),
            tag => {
                let msg = format!("Unknown constant pool tag {}", tag);
                return Err(IoError::new(ErrorKind::InvalidData, msg));
            }
        };
        Ok(constant)
    }
}

/// Modified UTF-8 format used in class files.
///
/// See [this `DataInput` section for details][0]. Quoting from that section:
///
/// > The differences between this format and the standard UTF-8 format are the following:
/// >
/// >  * The null byte `\u0000` is encoded in 2-byte format rather than 1-byte, so that the encoded
/// >    strings never have embedded nulls.
/// >  * Only the 1-byte, 2-byte, and 3-byte formats are used.
/// >  * Supplementary characters are represented in the form of surrogate pairs.
///
/// [0]: https://docs.oracle.com/en/java/javase/17/docs/api/java.base/java/io/DataInput.html#modified-utf-8
pub fn encode_modified_utf8(string: &str) -> Vec<u8> {
    let mut buffer: Vec<u8> = vec![];
    for unit in string.encode_utf16() {
        let code = unit as u32;
        if code != 0 && code < 0x80 {
            buffer.push(code as u8);
        } else if code < 0x800 {
            buffer.push((code >> 6 & 0x1F) as u8 | 0b1100_0000);
            buffer.push((code & 0x3F) as u8 | 0b1000_0000);
        } else {
            buffer.push((code >> 12 & 0x0F) as u8 | 0b1110_0000);
            buffer.push((code >> 6 & 0x3F) as u8 | 0b1000_0000);
            buffer.push((code & 0x3F) as u8 | 0b1000_0000);
        }
    }
    buffer
}

/// Inverse of [`encode_modified_utf8`]
///
/// Each 1-3 byte group decodes to one UTF-16 code unit; surrogate pairs are then joined. Anything
/// [`encode_modified_utf8`] would not produce is rejected: bare null bytes, overlong groups (other
/// than `C0 80` for null), 4-byte forms, truncated groups, and unpaired surrogates.
pub fn decode_modified_utf8(bytes: &[u8]) -> Result<String, String> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    let continuation = |byte: Option<u8>| -> Result<u16, String> {
        match byte {
            Some(b) if b & 0b1100_0000 == 0b1000_0000 => Ok((b & 0x3F) as u16),
            Some(b) => Err(format!("Invalid continuation byte 0x{:02x}", b)),
            None => Err(String::from("Truncated modified UTF-8 sequence")),
        }
    };

    while let Some(a) = iter.next() {
        let unit = match a {
            0 => return Err(String::from("Unexpected null byte")),
            0x01..=0x7F => a as u16,
            0xC0..=0xDF => {
                let unit = ((a & 0x1F) as u16) << 6 | continuation(iter.next())?;
                if unit != 0 && unit < 0x80 {
                    return Err(format!("Overlong encoding of 0x{:02x}", unit));
                }
                unit
            }
            0xE0..=0xEF => {
                let b = continuation(iter.next())?;
                let c = continuation(iter.next())?;
                let unit = ((a & 0x0F) as u16) << 12 | b << 6 | c;
                if unit < 0x800 {
                    return Err(format!("Overlong encoding of 0x{:04x}", unit));
                }
                unit
            }
            _ => return Err(format!("Invalid leading byte 0x{:02x}", a)),
        };
        units.push(unit);
    }

    String::from_utf16(&units).map_err(|_| String::from("Unpaired surrogate"))
}

#[cfg(test)]
mod modified_utf8_tests {
    use super::*;

    #[test]
    fn containing_null_byte() {
        assert_eq!(encode_modified_utf8("a\x00a"), vec![97, 192, 128, 97]);
        assert_eq!(decode_modified_utf8(&[97, 192, 128, 97]).unwrap(), "a\x00a");
    }

    #[test]
    fn simple_ascii() {
        assert_eq!(encode_modified_utf8("Skill"), vec![83, 107, 105, 108, 108]);
        assert_eq!(decode_modified_utf8(b"checkAdvance").unwrap(), "checkAdvance");
    }

    #[test]
    fn two_and_three_byte_encodings() {
        assert_eq!(encode_modified_utf8("ĄǍ"), vec![196, 132, 199, 141]);
        assert_eq!(encode_modified_utf8("ऄअ"), vec![224, 164, 132, 224, 164, 133]);
        assert_eq!(decode_modified_utf8(&[224, 164, 132, 196, 132]).unwrap(), "ऄĄ");
    }

    #[test]
    fn supplementary_characters() {
        let encoded = vec![237, 160, 128, 237, 176, 128, 237, 175, 191, 237, 191, 191];
        assert_eq!(encode_modified_utf8("\u{10000}\u{10FFFF}"), encoded);
        assert_eq!(decode_modified_utf8(&encoded).unwrap(), "\u{10000}\u{10FFFF}");
    }

    #[test]
    fn malformed_input() {
        assert!(decode_modified_utf8(&[0]).is_err());
        assert!(decode_modified_utf8(&[0xC4]).is_err());
        assert!(decode_modified_utf8(&[0xE0, 0x41, 0x80]).is_err());
        assert!(decode_modified_utf8(&[0xF0, 0x90, 0x80, 0x80]).is_err());
        assert!(decode_modified_utf8(&[237, 160, 128]).is_err());
    }

    #[test]
    fn overlong_forms() {
        assert!(decode_modified_utf8(&[0xC1, 0x81]).is_err());
        assert!(decode_modified_utf8(&[0xE0, 0x81, 0x81]).is_err());
        assert!(decode_modified_utf8(&[0xE0, 0x9F, 0xBF]).is_err());
        assert_eq!(decode_modified_utf8(&[0xC0, 0x80]).unwrap(), "\x00");
        assert_eq!(decode_modified_utf8(&[0xC2, 0x80]).unwrap(), "\u{80}");
        assert_eq!(decode_modified_utf8(&[0xE0, 0xA0, 0x80]).unwrap(), "\u{800}");
    }
}

/// Almost all constants have width 1, except for `Constant::Long` and `Constant::Double`. Quoting
/// the JVMS:
///
/// > All 8-byte constants take up two entries in the constant_pool table of the class file. If a
/// > CONSTANT_Long_info or CONSTANT_Double_info structure is the item in the constant_pool table
/// > at index n, then the next usable item in the pool is located at index n+2. The constant_pool
/// > index n+1 must be valid but is considered unusable.
impl Width for Constant {
    fn width(&self) -> usize {
        match self {
            Constant::Long(_) | Constant::Double(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ConstantIndex(pub u16);

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct Utf8ConstantIndex(pub ConstantIndex);

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct NameAndTypeConstantIndex(pub ConstantIndex);

#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ClassConstantIndex(pub ConstantIndex);

/// Index of a `CONSTANT_Methodref` or `CONSTANT_InterfaceMethodref`
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct MethodRefConstantIndex(pub ConstantIndex);

impl Serialize for ConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Deserialize for ConstantIndex {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        Ok(ConstantIndex(u16::deserialize(reader)?))
    }
}

macro_rules! typed_constant_index {
    ($index:ident) => {
        impl From<$index> for ConstantIndex {
            fn from(index: $index) -> ConstantIndex {
                index.0
            }
        }

        impl Serialize for $index {
            fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
                self.0.serialize(writer)
            }
        }

        impl Deserialize for $index {
            fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
                Ok($index(ConstantIndex::deserialize(reader)?))
            }
        }
    };
}

typed_constant_index!(Utf8ConstantIndex);
typed_constant_index!(NameAndTypeConstantIndex);
typed_constant_index!(ClassConstantIndex);
typed_constant_index!(MethodRefConstantIndex);

/// Type of method handle
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-5.html#jvms-5.4.3.5-220
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum HandleKind {
    GetField,
    GetStatic,
    PutField,
    PutStatic,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    NewInvokeSpecial,
    InvokeInterface,
}

impl Serialize for HandleKind {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        let byte: u8 = match self {
            HandleKind::GetField => 1,
            HandleKind::GetStatic => 2,
            HandleKind::PutField => 3,
            HandleKind::PutStatic => 4,
            HandleKind::InvokeVirtual => 5,
            HandleKind::InvokeStatic => 6,
            HandleKind::InvokeSpecial => 7,
            HandleKind::NewInvokeSpecial => 8,
            HandleKind::InvokeInterface => 9,
        };
        byte.serialize(writer)
    }
}

impl Deserialize for HandleKind {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<Self> {
        let kind = match u8::deserialize(reader)? {
            1 => HandleKind::GetField,
            2 => HandleKind::GetStatic,
            3 => HandleKind::PutField,
            4 => HandleKind::PutStatic,
            5 => HandleKind::InvokeVirtual,
            6 => HandleKind::InvokeStatic,
            7 => HandleKind::InvokeSpecial,
            8 => HandleKind::NewInvokeSpecial,
            9 => HandleKind::InvokeInterface,
            other => {
                let msg = format!("Unknown method handle kind {}", other);
                return Err(IoError::new(ErrorKind::InvalidData, msg));
            }
        };
        Ok(kind)
    }
}
