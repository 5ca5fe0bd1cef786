use super::*;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum JumpOp {
    /// Op Codes: 0x20, 0x30, 0x28, 0x38
    #[display("JR {_0}, e8")]
    ConditionalRelative(Condition),
    /// Op Code: 0x18
    #[display("JR e8")]
    Relative,
    /// Op Codes: 0xC2, 0xD2, 0xCA, 0xDA
    #[display("JP {_0}, a16")]
    ConditionalAbsolute(Condition),
    /// Op Code: 0xC3
    #[display("JP a16")]
    Absolute,
    /// Op Code: 0xE9
    #[display("JP HL")]
    JumpToHL,
    /// Op Code: 0xCD
    #[display("CALL a16")]
    Call,
    /// Op Codes: 0xC4, 0xD4, 0xCC, 0xDC
    #[display("CALL {_0}, a16")]
    ConditionalCall(Condition),
    /// Op Code: 0xC9
    #[display("RET")]
    Return,
    /// Op Codes: 0xC0, 0xD0, 0xC8, 0xD8
    #[display("RET {_0}")]
    ConditionalReturn(Condition),
    /// Op Code: 0xD9
    /// Return from the subroutine and enable intrupts
    #[display("RETI")]
    ReturnAndEnable,
    /// Op Codes: 0xC7, 0xCF, 0xD7, 0xDF, 0xE7, 0xEF, 0xF7, 0xFF
    /// Calls the fixed vector held by this op, one of 0x00, 0x08, ..., 0x38.
    #[display("RST 0x{_0:0>2X}")]
    Restart(u8),
}

impl JumpOp {
    /// Returns the number of ticks to will take to complete this instruction if no branch is taken.
    pub const fn cycles(&self) -> u8 {
        match self {
            JumpOp::ConditionalRelative(_) => 8,
            JumpOp::Relative => 12,
            JumpOp::ConditionalAbsolute(_) => 12,
            JumpOp::Absolute => 16,
            JumpOp::JumpToHL => 4,
            JumpOp::Call => 24,
            JumpOp::ConditionalCall(_) => 12,
            JumpOp::Return => 16,
            JumpOp::ConditionalReturn(_) => 8,
            JumpOp::ReturnAndEnable => 16,
            JumpOp::Restart(_) => 16,
        }
    }

    /// The additional ticks a conditional op takes when its condition passes.
    pub const fn taken_penalty(&self) -> u8 {
        match self {
            JumpOp::ConditionalRelative(_) | JumpOp::ConditionalAbsolute(_) => 4,
            JumpOp::ConditionalCall(_) | JumpOp::ConditionalReturn(_) => 12,
            _ => 0,
        }
    }

    /// Returns the size of the bytes to took to construct this instruction
    pub const fn size(&self) -> u8 {
        match self {
            JumpOp::ConditionalRelative(_) | JumpOp::Relative => 2,
            JumpOp::ConditionalAbsolute(_)
            | JumpOp::Absolute
            | JumpOp::Call
            | JumpOp::ConditionalCall(_) => 3,
            JumpOp::JumpToHL
            | JumpOp::Return
            | JumpOp::ConditionalReturn(_)
            | JumpOp::ReturnAndEnable
            | JumpOp::Restart(_) => 1,
        }
    }

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            JumpOp::ConditionalRelative(_) | JumpOp::Relative => "JR",
            JumpOp::ConditionalAbsolute(_) | JumpOp::Absolute | JumpOp::JumpToHL => "JP",
            JumpOp::Call | JumpOp::ConditionalCall(_) => "CALL",
            JumpOp::Return | JumpOp::ConditionalReturn(_) => "RET",
            JumpOp::ReturnAndEnable => "RETI",
            JumpOp::Restart(_) => "RST",
        }
    }
}
