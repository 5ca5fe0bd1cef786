use super::*;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum ArithmeticOp {
    /// Op Codes: 0x80..0x88, 0xC6
    #[display("ADD A, {_0}")]
    Add(SomeByte),
    /// Op Codes: 0x09, 0x19, 0x29, 0x39
    #[display("ADD HL, {_0}")]
    Add16(WideReg),
    /// Op Code: 0xE8
    /// Add the signed value e8 to SP.
    #[display("ADD SP, e8")]
    AddSP,
    /// Op Codes: 0x88..0x90, 0xCE
    #[display("ADC A, {_0}")]
    Adc(SomeByte),
    /// Op Codes: 0x90..0x98, 0xD6
    #[display("SUB A, {_0}")]
    Sub(SomeByte),
    /// Op Codes: 0x98..0xA0, 0xDE
    #[display("SBC A, {_0}")]
    Sbc(SomeByte),
    /// Op Codes: 0xA0..0xA8, 0xE6
    #[display("AND A, {_0}")]
    And(SomeByte),
    /// Op Codes: 0xA8..0xB0, 0xEE
    #[display("XOR A, {_0}")]
    Xor(SomeByte),
    /// Op Codes: 0xB0..0xB8, 0xF6
    #[display("OR A, {_0}")]
    Or(SomeByte),
    /// Op Codes: 0xB8..0xC0, 0xFE
    #[display("CP A, {_0}")]
    Cp(SomeByte),
    /// Used for opcodes 0x_4 and 0x_C
    #[display("INC {_0}")]
    Inc(RegOrPointer),
    /// Used for opcodes 0x_3
    #[display("INC {_0}")]
    Inc16(WideReg),
    /// Used for opcodes 0x_5 and 0x_D
    #[display("DEC {_0}")]
    Dec(RegOrPointer),
    /// Used for opcodes 0x_B
    #[display("DEC {_0}")]
    Dec16(WideReg),
}

impl ArithmeticOp {
    /// Returns the number of ticks to will take to complete this instruction.
    pub const fn cycles(&self) -> u8 {
        match self {
            ArithmeticOp::Add16(_) => 8,
            ArithmeticOp::Add(byte)
            | ArithmeticOp::Adc(byte)
            | ArithmeticOp::Sub(byte)
            | ArithmeticOp::Sbc(byte)
            | ArithmeticOp::And(byte)
            | ArithmeticOp::Xor(byte)
            | ArithmeticOp::Or(byte)
            | ArithmeticOp::Cp(byte) => match byte {
                SomeByte::Referenced(RegOrPointer::Reg(_)) => 4,
                SomeByte::Referenced(RegOrPointer::Pointer) | SomeByte::Direct => 8,
            },
            ArithmeticOp::Inc(RegOrPointer::Pointer) => 12,
            ArithmeticOp::Inc(RegOrPointer::Reg(_)) => 4,
            ArithmeticOp::Dec(RegOrPointer::Pointer) => 12,
            ArithmeticOp::Dec(RegOrPointer::Reg(_)) => 4,
            ArithmeticOp::Inc16(_) => 8,
            ArithmeticOp::Dec16(_) => 8,
            ArithmeticOp::AddSP => 16,
        }
    }

    /// Returns the size of the bytes to took to construct this instruction
    pub const fn size(&self) -> u8 {
        match self {
            ArithmeticOp::Add(SomeByte::Direct)
            | ArithmeticOp::Adc(SomeByte::Direct)
            | ArithmeticOp::Sub(SomeByte::Direct)
            | ArithmeticOp::Sbc(SomeByte::Direct)
            | ArithmeticOp::And(SomeByte::Direct)
            | ArithmeticOp::Xor(SomeByte::Direct)
            | ArithmeticOp::Or(SomeByte::Direct)
            | ArithmeticOp::Cp(SomeByte::Direct)
            | ArithmeticOp::AddSP => 2,
            _ => 1,
        }
    }

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            ArithmeticOp::Add(_) | ArithmeticOp::Add16(_) | ArithmeticOp::AddSP => "ADD",
            ArithmeticOp::Adc(_) => "ADC",
            ArithmeticOp::Sub(_) => "SUB",
            ArithmeticOp::Sbc(_) => "SBC",
            ArithmeticOp::And(_) => "AND",
            ArithmeticOp::Xor(_) => "XOR",
            ArithmeticOp::Or(_) => "OR",
            ArithmeticOp::Cp(_) => "CP",
            ArithmeticOp::Inc(_) | ArithmeticOp::Inc16(_) => "INC",
            ArithmeticOp::Dec(_) | ArithmeticOp::Dec16(_) => "DEC",
        }
    }
}
