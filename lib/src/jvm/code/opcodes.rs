/// Opcodes this crate needs to refer to by name
pub mod opcode {
    pub const IINC: u8 = 0x84;
    pub const TABLESWITCH: u8 = 0xaa;
    pub const LOOKUPSWITCH: u8 = 0xab;
    pub const INVOKESTATIC: u8 = 0xb8;
    pub const INVOKEINTERFACE: u8 = 0xb9;
    pub const WIDE: u8 = 0xc4;
    pub const MULTIANEWARRAY: u8 = 0xc5;
    pub const GOTO_W: u8 = 0xc8;
}

/// How many bytes an instruction spans, as far as can be told from its opcode
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InstructionWidth {
    /// Opcode plus a fixed number of operand bytes (1 to 5 bytes in total)
    Fixed(u8),

    /// `wide` prefix: 6 bytes when modifying `iinc`, 4 bytes otherwise
    Wide,

    /// `tableswitch` and `lookupswitch`, whose width depends on padding and on their operands
    Variable,

    /// Opcode not assigned by the JVMS
    Invalid,
}

const fn width_of(opcode: u8) -> InstructionWidth {
    use InstructionWidth::*;
    match opcode {
        // constants, `*load_<n>`, array loads, `*store_<n>`, array stores, stack, arithmetic
        0x00..=0x0f => Fixed(1),
        0x10 => Fixed(2), // bipush
        0x11 => Fixed(3), // sipush
        0x12 => Fixed(2), // ldc
        0x13 | 0x14 => Fixed(3), // ldc_w, ldc2_w
        0x15..=0x19 => Fixed(2), // *load
        0x1a..=0x35 => Fixed(1),
        0x36..=0x3a => Fixed(2), // *store
        0x3b..=0x83 => Fixed(1),
        0x84 => Fixed(3), // iinc
        0x85..=0x98 => Fixed(1), // conversions and comparisons
        0x99..=0xa8 => Fixed(3), // if*, goto, jsr
        0xa9 => Fixed(2), // ret
        0xaa | 0xab => Variable,
        0xac..=0xb1 => Fixed(1), // *return
        0xb2..=0xb8 => Fixed(3), // field access, invokevirtual/special/static
        0xb9 | 0xba => Fixed(5), // invokeinterface, invokedynamic
        0xbb => Fixed(3), // new
        0xbc => Fixed(2), // newarray
        0xbd => Fixed(3), // anewarray
        0xbe | 0xbf => Fixed(1), // arraylength, athrow
        0xc0 | 0xc1 => Fixed(3), // checkcast, instanceof
        0xc2 | 0xc3 => Fixed(1), // monitorenter, monitorexit
        0xc4 => Wide,
        0xc5 => Fixed(4), // multianewarray
        0xc6 | 0xc7 => Fixed(3), // ifnull, ifnonnull
        0xc8 | 0xc9 => Fixed(5), // goto_w, jsr_w
        0xca => Fixed(1), // breakpoint
        0xfe | 0xff => Fixed(1), // impdep1, impdep2
        _ => Invalid,
    }
}

const fn width_table() -> [InstructionWidth; 256] {
    let mut table = [InstructionWidth::Invalid; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = width_of(opcode as u8);
        opcode += 1;
    }
    table
}

static WIDTHS: [InstructionWidth; 256] = width_table();

/// Look up the width of an instruction from its opcode
pub fn instruction_width(opcode: u8) -> InstructionWidth {
    WIDTHS[opcode as usize]
}
