use crate::jvm::class_file::{Deserialize, Serialize};
use bitflags::bitflags;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::io::Result;
use std::marker::PhantomData;

bitflags! {
    /// Access flags on classes
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.1-200-E.1
    pub struct ClassAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

bitflags! {
    /// Access flags on methods
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.6-200-A.1
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

bitflags! {
    /// Access flags on fields
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.5-200-A.1
    pub struct FieldAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM = 0x4000;
    }
}

/// Access flags exactly as stored in a class file
///
/// Bits left unassigned by the JVMS are kept, so that writing a class back reproduces its input.
/// Use [`RawAccessFlags::flags`] to work with the named flags.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawAccessFlags<F> {
    bits: u16,
    named: PhantomData<F>,
}

/// Named flags that can be viewed from [`RawAccessFlags`]
pub trait AccessFlags: Copy + Debug {
    fn from_raw(bits: u16) -> Self;
    fn raw(&self) -> u16;
}

impl<F: AccessFlags> RawAccessFlags<F> {
    pub fn from_bits(bits: u16) -> RawAccessFlags<F> {
        RawAccessFlags {
            bits,
            named: PhantomData,
        }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Named flags, without the unassigned bits
    pub fn flags(&self) -> F {
        F::from_raw(self.bits)
    }

    pub fn contains(&self, flags: F) -> bool {
        self.bits & flags.raw() == flags.raw()
    }
}

impl<F: AccessFlags> From<F> for RawAccessFlags<F> {
    fn from(flags: F) -> RawAccessFlags<F> {
        RawAccessFlags::from_bits(flags.raw())
    }
}

impl<F: AccessFlags> Debug for RawAccessFlags<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?} ({:#06x})", self.flags(), self.bits)
    }
}

impl<F> Serialize for RawAccessFlags<F> {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        self.bits.serialize(writer)
    }
}

impl<F> Deserialize for RawAccessFlags<F> {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self> {
        Ok(RawAccessFlags {
            bits: u16::deserialize(reader)?,
            named: PhantomData,
        })
    }
}

macro_rules! access_flags {
    ($flags:ty) => {
        impl AccessFlags for $flags {
            fn from_raw(bits: u16) -> Self {
                <$flags>::from_bits_truncate(bits)
            }

            fn raw(&self) -> u16 {
                self.bits()
            }
        }
    };
}

access_flags!(ClassAccessFlags);
access_flags!(MethodAccessFlags);
access_flags!(FieldAccessFlags);
