use super::{instruction_width, opcode, EncodedInstruction, InstructionWidth};

/// Reasons the instruction stream could not be walked to the end
#[derive(Debug, PartialEq, Eq)]
pub enum ScanError {
    /// `tableswitch` or `lookupswitch`, whose width is not determined by the opcode
    UnsupportedOpcodeWidth { opcode: u8, offset: u16 },

    /// Opcode not assigned by the JVMS
    InvalidOpcode { opcode: u8, offset: u16 },

    /// Instruction at `offset` runs past the end of the code array
    Truncated { offset: u16 },

    /// Code arrays are limited to 65535 bytes
    CodeTooLong(usize),
}

/// Iterator over the instructions of a code array, as `(offset, bytes)` pairs
///
/// Iteration stops after the first error.
pub struct Instructions<'a> {
    code: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Instructions<'a> {
    pub fn new(code: &'a [u8]) -> Result<Instructions<'a>, ScanError> {
        if code.len() > u16::MAX as usize {
            return Err(ScanError::CodeTooLong(code.len()));
        }
        Ok(Instructions {
            code,
            offset: 0,
            failed: false,
        })
    }

    fn next_instruction(&self) -> Result<&'a [u8], ScanError> {
        let rest = &self.code[self.offset..];
        let offset = self.offset as u16;
        let opcode = rest[0];
        let width = match instruction_width(opcode) {
            InstructionWidth::Fixed(width) => width as usize,
            InstructionWidth::Wide => match rest.get(1) {
                Some(&opcode::IINC) => 6,
                Some(_) => 4,
                None => return Err(ScanError::Truncated { offset }),
            },
            InstructionWidth::Variable => {
                return Err(ScanError::UnsupportedOpcodeWidth { opcode, offset })
            }
            InstructionWidth::Invalid => return Err(ScanError::InvalidOpcode { opcode, offset }),
        };
        rest.get(..width).ok_or(ScanError::Truncated { offset })
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<(u16, &'a [u8]), ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.code.len() {
            return None;
        }
        match self.next_instruction() {
            Ok(bytes) => {
                let offset = self.offset as u16;
                self.offset += bytes.len();
                Some(Ok((offset, bytes)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<'a> std::iter::FusedIterator for Instructions<'a> {}

/// Offset of the last instruction in `code` identical to any of `needles`
///
/// The needles are the equivalent encodings of one call, so whichever of them comes last wins.
/// The whole code array is always walked, so an unsupported instruction anywhere fails the scan,
/// even after a match.
pub fn find_last_occurrence(
    code: &[u8],
    needles: &[EncodedInstruction],
) -> Result<Option<u16>, ScanError> {
    let mut found = None;
    for instruction in Instructions::new(code)? {
        let (offset, bytes) = instruction?;
        if let Some(needle) = needles.iter().find(|needle| needle.matches(bytes)) {
            log::trace!("match for {:?} at offset {}", needle, offset);
            found = Some(offset);
        }
    }
    Ok(found)
}
