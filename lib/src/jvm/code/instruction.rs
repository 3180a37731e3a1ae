use byteorder::{BigEndian, ByteOrder};
use std::fmt::{Debug, Error as FmtError, Formatter};

/// Raw bytes of exactly one instruction (opcode followed by its operands)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedInstruction(Vec<u8>);

impl EncodedInstruction {
    pub fn new(bytes: Vec<u8>) -> EncodedInstruction {
        EncodedInstruction(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn key(&self) -> Option<InstructionKey> {
        InstructionKey::from_bytes(&self.0)
    }

    /// Whether `bytes` (one instruction's worth) are exactly this instruction
    pub fn matches(&self, bytes: &[u8]) -> bool {
        self.0.len() == bytes.len()
            && self.key().is_some()
            && self.key() == InstructionKey::from_bytes(bytes)
    }
}

impl Debug for EncodedInstruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{:02x?}", self.0)
    }
}

/// Instruction bytes packed into a `u64` for equality tests
///
/// The bytes are left-padded with zeroes up to 8 bytes and read as a big-endian integer. The value
/// means nothing numerically. Since the padding hides the length, keys of instructions of
/// different widths should not be compared (see [`EncodedInstruction::matches`]).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct InstructionKey(pub u64);

impl InstructionKey {
    /// Pack up to 8 bytes (no JVM instruction is longer than 6)
    pub fn from_bytes(bytes: &[u8]) -> Option<InstructionKey> {
        if bytes.len() > 8 {
            return None;
        }
        let mut padded = [0u8; 8];
        padded[8 - bytes.len()..].copy_from_slice(bytes);
        Some(InstructionKey(BigEndian::read_u64(&padded)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keys_are_left_padded() {
        assert_eq!(
            InstructionKey::from_bytes(&[0xb8, 0x00, 0x2a]),
            Some(InstructionKey(0x00b8_002a))
        );
        assert_eq!(InstructionKey::from_bytes(&[]), Some(InstructionKey(0)));
        assert_eq!(InstructionKey::from_bytes(&[1; 9]), None);
    }

    #[test]
    fn matching_takes_width_into_account() {
        let invoke = EncodedInstruction::new(vec![0xb8, 0x00, 0x2a]);
        assert!(invoke.matches(&[0xb8, 0x00, 0x2a]));
        assert!(!invoke.matches(&[0xb8, 0x00, 0x2b]));
        assert!(!invoke.matches(&[0x00, 0xb8, 0x00, 0x2a]));

        let too_long = EncodedInstruction::new(vec![0; 9]);
        assert!(!too_long.matches(&[0; 9]));
    }
}
