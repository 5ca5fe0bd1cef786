use super::*;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum ControlOp {
    /// Op Code: 0x76
    #[display("HALT")]
    Halt,
    /// Op Code: 0x00
    #[display("NOP")]
    Noop,
    /// Op Code: 0x10
    /// The op code is followed by a padding byte that is skipped.
    #[display("STOP")]
    Stop,
}

impl ControlOp {
    /// Returns the number of ticks to will take to complete this instruction.
    pub const fn cycles(&self) -> u8 {
        match self {
            ControlOp::Noop => 4,
            ControlOp::Stop => 4,
            ControlOp::Halt => 4,
        }
    }

    /// Returns the size of the bytes to took to construct this instruction
    pub const fn size(&self) -> u8 {
        match self {
            ControlOp::Noop => 1,
            ControlOp::Stop => 2,
            ControlOp::Halt => 1,
        }
    }

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            ControlOp::Noop => "NOP",
            ControlOp::Stop => "STOP",
            ControlOp::Halt => "HALT",
        }
    }
}
