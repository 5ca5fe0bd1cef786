use super::*;

/// The BIT, RES, and SET ops. These make up the back three quarters of the prefixed op table.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{op} {bit}, {reg}")]
pub struct BitOp {
    pub bit: u8,
    pub reg: RegOrPointer,
    pub op: BitOpInner,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum BitOpInner {
    /// Test the bit, only flags are affected.
    #[display("BIT")]
    Bit,
    /// Reset the bit to 0.
    #[display("RES")]
    Res,
    /// Set the bit to 1.
    #[display("SET")]
    Set,
}

impl BitOpInner {
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            BitOpInner::Bit => "BIT",
            BitOpInner::Res => "RES",
            BitOpInner::Set => "SET",
        }
    }
}

impl BitOp {
    /// Returns the number of ticks to will take to complete this instruction, prefix included.
    pub const fn cycles(&self) -> u8 {
        match (self.op, self.reg) {
            (_, RegOrPointer::Reg(_)) => 8,
            (BitOpInner::Bit, RegOrPointer::Pointer) => 12,
            (_, RegOrPointer::Pointer) => 16,
        }
    }
}
