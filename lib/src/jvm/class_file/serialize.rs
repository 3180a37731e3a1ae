use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Error, ErrorKind, Read, Result};

/// Utility trait for serializing data inside class files
///
/// Java class files have some peculiarities that make it useful to define an extra trait (instead
/// of just using `serde`):
///
///   - tags are always `u8`
///   - when serializing a sequence, the length of the sequence is usually `u16`
///
pub trait Serialize: Sized {
    /// Serialize construct into a binary output stream
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()>;
}

/// Inverse of [`Serialize`], following the same conventions
pub trait Deserialize: Sized {
    /// Read the construct from a binary input stream
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self>;
}

macro_rules! big_endian_binary_format {
    ($typ:ty, $write:ident, $read:ident) => {
        impl Serialize for $typ {
            fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
                writer.$write::<BigEndian>(*self)
            }
        }

        impl Deserialize for $typ {
            fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self> {
                reader.$read::<BigEndian>()
            }
        }
    };
}

impl Serialize for u8 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(*self)
    }
}

impl Deserialize for u8 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self> {
        reader.read_u8()
    }
}

big_endian_binary_format!(u16, write_u16, read_u16);
big_endian_binary_format!(u32, write_u32, read_u32);
big_endian_binary_format!(i32, write_i32, read_i32);
big_endian_binary_format!(i64, write_i64, read_i64);
big_endian_binary_format!(f32, write_f32, read_f32);
big_endian_binary_format!(f64, write_f64, read_f64);

/// Size in `u16` is the first thing serialized/deserialized
impl<A: Serialize> Serialize for Vec<A> {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        (self.len() as u16).serialize(writer)?;
        for elem in self {
            elem.serialize(writer)?;
        }
        Ok(())
    }
}

impl<A: Deserialize> Deserialize for Vec<A> {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self> {
        let len = u16::deserialize(reader)?;
        let mut elems = Vec::with_capacity(len as usize);
        for _ in 0..len {
            elems.push(A::deserialize(reader)?);
        }
        Ok(elems)
    }
}

/// Read exactly `len` raw bytes
///
/// Lengths come straight from the input, so memory only grows with the bytes actually read.
pub fn read_bytes<R: ReadBytesExt>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![];
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        let msg = format!("Expected {} bytes, found only {}", len, bytes.len());
        return Err(Error::new(ErrorKind::UnexpectedEof, msg));
    }
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn big_endian_layout() {
        let mut bytes = vec![];
        0xCAFEu16.serialize(&mut bytes).unwrap();
        0x0102_0304u32.serialize(&mut bytes).unwrap();
        assert_eq!(bytes, vec![0xCA, 0xFE, 0x01, 0x02, 0x03, 0x04]);

        let mut reader = &bytes[..];
        assert_eq!(u16::deserialize(&mut reader).unwrap(), 0xCAFE);
        assert_eq!(u32::deserialize(&mut reader).unwrap(), 0x0102_0304);
        assert!(u8::deserialize(&mut reader).is_err());
    }

    #[test]
    fn length_prefixed_vectors() {
        let mut reader: &[u8] = &[0x00, 0x02, 0x00, 0x07, 0x00, 0x09, 0xFF];
        let elems: Vec<u16> = Vec::deserialize(&mut reader).unwrap();
        assert_eq!(elems, vec![7, 9]);
        assert_eq!(reader, &[0xFF]);
    }

    #[test]
    fn raw_bytes_claimed_but_missing() {
        let mut reader: &[u8] = &[1, 2, 3];
        let err = read_bytes(&mut reader, u32::MAX as usize).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let mut reader: &[u8] = &[1, 2, 3, 4];
        assert_eq!(read_bytes(&mut reader, 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(reader, &[4]);
    }
}
