use derive_more::From;
use derive_more::IsVariant;

use crate::cpu::Cpu;

mod arithmetic;
mod bit;
mod bit_shift;
mod control;
mod jump;
mod load;

pub use arithmetic::*;
pub use bit::*;
pub use bit_shift::*;
pub use control::*;
pub use jump::*;
pub use load::*;

/// Every operation the CPU knows how to perform. An instruction is constructed from its op code
/// alone. Literal operands are not part of the instruction; they are read from the bytes that
/// follow the op code according to the descriptor's addressing mode.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display, IsVariant)]
#[display("{_variant}")]
pub enum Instruction {
    #[display("{_0}")]
    Load(LoadOp),
    #[display("{_0}")]
    Control(ControlOp),
    #[display("{_0}")]
    Jump(JumpOp),
    #[display("{_0}")]
    Arithmetic(ArithmeticOp),
    #[display("{_0}")]
    Bit(BitOp),
    #[display("{_0}")]
    BitShift(BitShiftOp),
    #[display("DAA")]
    Daa,
    /// Set Carry.
    #[display("SCF")]
    Scf,
    /// ComPLement accumulator.
    #[display("CPL")]
    Cpl,
    /// CompLement carry flag.
    #[display("CCF")]
    Ccf,
    /// Disable interupts
    #[display("DI")]
    Di,
    /// Enable interupts
    #[display("EI")]
    Ei,
    /// The RLA, RLCA, RRA, RRCA are, in a sense, bit shift operations. However, they are the only
    /// shifting ops that are not prefixed, so they are classified as misc. Unlike their prefixed
    /// counterparts, they always clear the zero flag.
    #[display("RLA")]
    Rla,
    #[display("RLCA")]
    Rlca,
    #[display("RRA")]
    Rra,
    #[display("RRCA")]
    Rrca,
    /// Load the next byte as an op code for a prefixed instruction
    #[display("PREFIX CB")]
    Prefixed,
}

impl Instruction {
    /// Returns the number of ticks it will take to complete this instruction. For conditional
    /// instructions, this is the cost of the branch not being taken.
    pub const fn cycles(&self) -> u8 {
        match self {
            Instruction::Load(op) => op.cycles(),
            Instruction::Control(op) => op.cycles(),
            Instruction::Jump(op) => op.cycles(),
            Instruction::Arithmetic(op) => op.cycles(),
            Instruction::Bit(op) => op.cycles(),
            Instruction::BitShift(op) => op.cycles(),
            Instruction::Daa
            | Instruction::Scf
            | Instruction::Cpl
            | Instruction::Ccf
            | Instruction::Di
            | Instruction::Ei
            | Instruction::Rla
            | Instruction::Rlca
            | Instruction::Rra
            | Instruction::Rrca
            | Instruction::Prefixed => 4,
        }
    }

    /// Returns the number of bytes that encode this instruction, op code(s) included.
    pub const fn size(&self) -> u8 {
        match self {
            Instruction::Load(op) => op.size(),
            Instruction::Control(op) => op.size(),
            Instruction::Jump(op) => op.size(),
            Instruction::Arithmetic(op) => op.size(),
            // Prefixed ops are two bytes, the prefix and the op code.
            Instruction::Bit(_) | Instruction::BitShift(_) => 2,
            Instruction::Daa
            | Instruction::Scf
            | Instruction::Cpl
            | Instruction::Ccf
            | Instruction::Di
            | Instruction::Ei
            | Instruction::Rla
            | Instruction::Rlca
            | Instruction::Rra
            | Instruction::Rrca
            | Instruction::Prefixed => 1,
        }
    }

    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Load(op) => op.mnemonic(),
            Instruction::Control(op) => op.mnemonic(),
            Instruction::Jump(op) => op.mnemonic(),
            Instruction::Arithmetic(op) => op.mnemonic(),
            Instruction::Bit(op) => op.op.mnemonic(),
            Instruction::BitShift(op) => op.mnemonic(),
            Instruction::Daa => "DAA",
            Instruction::Scf => "SCF",
            Instruction::Cpl => "CPL",
            Instruction::Ccf => "CCF",
            Instruction::Di => "DI",
            Instruction::Ei => "EI",
            Instruction::Rla => "RLA",
            Instruction::Rlca => "RLCA",
            Instruction::Rra => "RRA",
            Instruction::Rrca => "RRCA",
            Instruction::Prefixed => "PREFIX",
        }
    }

    pub const fn addressing_mode(&self) -> AddressingMode {
        match self {
            Instruction::Load(LoadOp::LoadAbsolute | LoadOp::StoreAbsolute) => {
                AddressingMode::Absolute
            }
            // Prefixed ops carry no operand past their own op code
            Instruction::Bit(_) | Instruction::BitShift(_) => AddressingMode::None,
            op if op.size() > 1 => AddressingMode::Immediate,
            _ => AddressingMode::None,
        }
    }
}

/// Describes how an instruction's operand is located.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
pub enum AddressingMode {
    /// The operand(s) directly follow the op code.
    Immediate,
    /// A 16-bit pointer follows the op code. The operand lives at the address it points to.
    Absolute,
    /// The instruction has no operand in memory.
    None,
}

/// The immutable metadata of a single op code. These are built once, at compile time, into the
/// lookup tables.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("0x{code:0>2X} {op}")]
pub struct OpDescriptor {
    /// The op code. For prefixed instructions, this is the byte after the prefix.
    pub code: u8,
    pub mnemonic: &'static str,
    /// The number of bytes the instruction occupies.
    pub length: u8,
    /// The number of clock cycles the instruction takes. Conditional instructions add
    /// [`JumpOp::taken_penalty`] to this if the branch is taken.
    pub cycles: u8,
    pub mode: AddressingMode,
    pub op: Instruction,
}

impl OpDescriptor {
    pub const fn new(code: u8, op: Instruction) -> Self {
        Self {
            code,
            mnemonic: op.mnemonic(),
            length: op.size(),
            cycles: op.cycles(),
            mode: op.addressing_mode(),
            op,
        }
    }

    /// True for the ops that live behind the 0xCB prefix. `code` is then the byte after the
    /// prefix.
    pub const fn is_cb_prefixed(&self) -> bool {
        matches!(self.op, Instruction::Bit(_) | Instruction::BitShift(_))
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
pub enum HalfRegister {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, From, IsVariant, derive_more::Display)]
#[display("{_variant}")]
pub enum RegOrPointer {
    #[display("{_0}")]
    Reg(HalfRegister),
    /// The byte pointed to by HL.
    #[display("(HL)")]
    Pointer,
}

/// The operand of the accumulator ops. These operate on either a register (or the byte that HL
/// points to) or an immediate byte.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, From, derive_more::Display)]
#[display("{_variant}")]
pub enum SomeByte {
    #[display("{_0}")]
    Referenced(RegOrPointer),
    #[display("n8")]
    Direct,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
pub enum WideReg {
    BC,
    DE,
    HL,
    SP,
}

/// The wide registers that can be pushed to and popped from the stack.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
pub enum WideRegWithoutSP {
    BC,
    DE,
    HL,
    AF,
}

/// The pointers that can be used to load into and store from the A register.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum LoadAPointer {
    #[display("(BC)")]
    BC,
    #[display("(DE)")]
    DE,
    /// Use HL as the pointer and increment it afterwards.
    #[display("(HL+)")]
    Hli,
    /// Use HL as the pointer and decrement it afterwards.
    #[display("(HL-)")]
    Hld,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display)]
#[display("{_variant}")]
pub enum Condition {
    #[display("Z")]
    Zero,
    #[display("NZ")]
    NotZero,
    #[display("C")]
    Carry,
    #[display("NC")]
    NotCarry,
}

impl Condition {
    pub fn passed(&self, cpu: &Cpu) -> bool {
        match self {
            Condition::Zero => cpu.f.z,
            Condition::NotZero => !cpu.f.z,
            Condition::Carry => cpu.f.c,
            Condition::NotCarry => !cpu.f.c,
        }
    }
}
