use super::*;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum LoadOp {
    /// Used for opcodes in 0x40..0x80 (sans 0x76)
    #[display("LD {dest}, {src}")]
    Basic {
        dest: RegOrPointer,
        src: RegOrPointer,
    },
    /// Used for opcodes 0x_1
    #[display("LD {_0}, n16")]
    Direct16(WideReg),
    /// Used for opcodes 0x_6 and 0x_E
    #[display("LD {_0}, n8")]
    Direct(RegOrPointer),
    /// Used for opcodes 0x_A
    #[display("LD A, {_0}")]
    LoadIntoA(LoadAPointer),
    /// Used for opcodes 0x_2
    #[display("LD {_0}, A")]
    StoreFromA(LoadAPointer),
    /// Opcode: 0x08
    /// Store SP & $FF at address n16 and SP >> 8 at address n16 + 1.
    #[display("LD (a16), SP")]
    StoreSP,
    /// Opcode: 0xF9
    #[display("LD SP, HL")]
    HLIntoSP,
    /// Opcode: 0xF8
    /// Add the signed value e8 to SP and store the result in HL.
    #[display("LD HL, SP + e8")]
    SPIntoHL,
    /// Used for opcodes 0x_1
    #[display("POP {_0}")]
    Pop(WideRegWithoutSP),
    /// Used for opcodes 0x_5
    #[display("PUSH {_0}")]
    Push(WideRegWithoutSP),
    /// Used for opcode 0xE0
    #[display("LDH (a8), A")]
    StoreHigh,
    /// Used for opcode 0xF0
    #[display("LDH A, (a8)")]
    LoadHigh,
    /// Used for opcode 0xE2
    #[display("LDH (C), A")]
    Ldhca,
    /// Used for opcode 0xF2
    #[display("LDH A, (C)")]
    Ldhac,
    /// Used for opcode 0xEA
    #[display("LD (a16), A")]
    StoreAbsolute,
    /// Used for opcode 0xFA
    #[display("LD A, (a16)")]
    LoadAbsolute,
}

impl LoadOp {
    /// Returns the number of ticks to will take to complete this instruction.
    pub const fn cycles(&self) -> u8 {
        match self {
            LoadOp::Basic {
                dest: RegOrPointer::Pointer,
                ..
            }
            | LoadOp::Basic {
                src: RegOrPointer::Pointer,
                ..
            } => 8,
            LoadOp::Basic { .. } => 4,
            LoadOp::Direct16(_) => 12,
            LoadOp::Direct(RegOrPointer::Pointer) => 12,
            LoadOp::Direct(RegOrPointer::Reg(_)) => 8,
            LoadOp::LoadIntoA(_) => 8,
            LoadOp::StoreFromA(_) => 8,
            LoadOp::StoreSP => 20,
            LoadOp::HLIntoSP => 8,
            LoadOp::SPIntoHL => 12,
            LoadOp::Pop(_) => 12,
            LoadOp::Push(_) => 16,
            LoadOp::StoreHigh => 12,
            LoadOp::LoadHigh => 12,
            LoadOp::Ldhca => 8,
            LoadOp::Ldhac => 8,
            LoadOp::StoreAbsolute => 16,
            LoadOp::LoadAbsolute => 16,
        }
    }

    /// Returns the size of the bytes to took to construct this instruction
    pub const fn size(&self) -> u8 {
        match self {
            LoadOp::Basic { .. } => 1,
            LoadOp::Direct16(_) => 3,
            LoadOp::Direct(_) => 2,
            LoadOp::LoadIntoA(_) => 1,
            LoadOp::StoreFromA(_) => 1,
            LoadOp::StoreSP => 3,
            LoadOp::HLIntoSP => 1,
            LoadOp::SPIntoHL => 2,
            LoadOp::Pop(_) => 1,
            LoadOp::Push(_) => 1,
            LoadOp::StoreHigh => 2,
            LoadOp::LoadHigh => 2,
            LoadOp::Ldhca => 1,
            LoadOp::Ldhac => 1,
            LoadOp::StoreAbsolute => 3,
            LoadOp::LoadAbsolute => 3,
        }
    }

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            LoadOp::Pop(_) => "POP",
            LoadOp::Push(_) => "PUSH",
            LoadOp::StoreHigh | LoadOp::LoadHigh | LoadOp::Ldhca | LoadOp::Ldhac => "LDH",
            _ => "LD",
        }
    }
}
