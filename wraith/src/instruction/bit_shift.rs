use super::*;

/// The rotate, shift, and swap ops. These make up the first quarter of the prefixed op table.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum BitShiftOp {
    #[display("RLC {_0}")]
    Rlc(RegOrPointer),
    #[display("RRC {_0}")]
    Rrc(RegOrPointer),
    #[display("RL {_0}")]
    Rl(RegOrPointer),
    #[display("RR {_0}")]
    Rr(RegOrPointer),
    #[display("SLA {_0}")]
    Sla(RegOrPointer),
    #[display("SRA {_0}")]
    Sra(RegOrPointer),
    #[display("SWAP {_0}")]
    Swap(RegOrPointer),
    #[display("SRL {_0}")]
    Srl(RegOrPointer),
}

impl BitShiftOp {
    /// The register (or pointer) that is being shifted.
    pub const fn target(&self) -> RegOrPointer {
        match self {
            BitShiftOp::Rlc(reg)
            | BitShiftOp::Rrc(reg)
            | BitShiftOp::Rl(reg)
            | BitShiftOp::Rr(reg)
            | BitShiftOp::Sla(reg)
            | BitShiftOp::Sra(reg)
            | BitShiftOp::Swap(reg)
            | BitShiftOp::Srl(reg) => *reg,
        }
    }

    /// Returns the number of ticks to will take to complete this instruction, prefix included.
    pub const fn cycles(&self) -> u8 {
        match self.target() {
            RegOrPointer::Pointer => 16,
            RegOrPointer::Reg(_) => 8,
        }
    }

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            BitShiftOp::Rlc(_) => "RLC",
            BitShiftOp::Rrc(_) => "RRC",
            BitShiftOp::Rl(_) => "RL",
            BitShiftOp::Rr(_) => "RR",
            BitShiftOp::Sla(_) => "SLA",
            BitShiftOp::Sra(_) => "SRA",
            BitShiftOp::Swap(_) => "SWAP",
            BitShiftOp::Srl(_) => "SRL",
        }
    }
}
