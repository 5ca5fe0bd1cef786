use std::num::Wrapping;
use std::ops::Index;
use std::ops::IndexMut;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::error;

use crate::error::CpuError;
use crate::instruction::AddressingMode;
use crate::instruction::ArithmeticOp;
use crate::instruction::BitOp;
use crate::instruction::BitOpInner;
use crate::instruction::BitShiftOp;
use crate::instruction::ControlOp;
use crate::instruction::HalfRegister;
use crate::instruction::Instruction;
use crate::instruction::JumpOp;
use crate::instruction::LoadAPointer;
use crate::instruction::LoadOp;
use crate::instruction::RegOrPointer;
use crate::instruction::SomeByte;
use crate::instruction::WideReg;
use crate::instruction::WideRegWithoutSP;
use crate::interrupt::Interrupt;
use crate::lookup::lookup_op;
use crate::lookup::lookup_prefixed_op;
use crate::mem::MemoryLikeExt;
use crate::trace::ProcessorContext;
use crate::trace::TraceObserver;


/// The number of clock cycles the CPU runs per second.
pub const CLOCK_SPEED: u64 = 4_194_304;

/// The number of cycles spent dispatching to an interrupt handler.
pub const INTERRUPT_CYCLES: u8 = 20;

#[derive(
    Debug, Default, Hash, Clone, PartialEq, Eq, derive_more::Display, Serialize, Deserialize,
)]
#[display(
    "CPU {{ A=0x{:0>2X} F={} B=0x{:0>2X} C=0x{:0>2X} D=0x{:0>2X} E=0x{:0>2X} H=0x{:0>2X} L=0x{:0>2X} SP=0x{:0>4X} PC=0x{:0>4X} IME={} State={} Cycles={} }}",
    a,
    f,
    b,
    c,
    d,
    e,
    h,
    l,
    sp,
    pc,
    ime,
    state,
    cycles
)]
pub struct Cpu {
    pub a: Wrapping<u8>,
    pub f: Flags,
    pub b: Wrapping<u8>,
    pub c: Wrapping<u8>,
    pub d: Wrapping<u8>,
    pub e: Wrapping<u8>,
    pub h: Wrapping<u8>,
    pub l: Wrapping<u8>,
    /// The SP register
    pub sp: Wrapping<u16>,
    /// The PC register
    pub pc: Wrapping<u16>,
    /// The live interrupt master enable.
    pub ime: bool,
    /// A change to the IME requested by EI or DI that has yet to take effect.
    pub ime_switch: ImeSwitch,
    pub state: CpuState,
    /// The total number of clock cycles that have been executed since the last reset.
    pub cycles: u64,
}

#[derive(
    Debug, Default, Hash, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize, Deserialize,
)]
pub enum CpuState {
    #[default]
    Running,
    /// Entered via HALT. Any enabled, pending interrupt wakes the CPU back up.
    Halted,
    /// Entered via STOP. Only a joypad interrupt wakes the CPU back up.
    Stopped,
}

/// EI and DI do not change the IME right away. The change is committed once the instruction that
/// follows them has retired.
#[derive(Debug, Default, Hash, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImeSwitch {
    #[default]
    Idle,
    Pending { target: bool, remaining: u8 },
}

impl ImeSwitch {
    pub fn arm(&mut self, target: bool) {
        *self = ImeSwitch::Pending {
            target,
            remaining: 1,
        };
    }

    /// Called as each instruction retires. Returns the new IME value once it is time to commit it.
    pub fn retire(&mut self) -> Option<bool> {
        match self {
            ImeSwitch::Idle => None,
            ImeSwitch::Pending {
                target,
                remaining: 0,
            } => {
                let digest = *target;
                *self = ImeSwitch::Idle;
                Some(digest)
            }
            ImeSwitch::Pending { remaining, .. } => {
                *remaining -= 1;
                None
            }
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Hash, derive_more::Display, Serialize, Deserialize,
)]
#[display(
    "Flags(Z={} N={} H={} C={})",
    *z as u8,
    *n as u8,
    *h as u8,
    *c as u8
)]
pub struct Flags {
    /// The zero flag
    pub z: bool,
    /// The substraction flag
    pub n: bool,
    /// The half-carry flag
    pub h: bool,
    /// The full carry flag
    pub c: bool,
}

impl From<u8> for Flags {
    fn from(value: u8) -> Self {
        Self {
            z: check_bit_const::<7>(value),
            n: check_bit_const::<6>(value),
            h: check_bit_const::<5>(value),
            c: check_bit_const::<4>(value),
        }
    }
}

impl Flags {
    pub fn set_from_byte(&mut self, val: u8) {
        *self = val.into();
    }

    pub fn set_for_byte_shift_op(&mut self, z: bool, c: bool) {
        self.z = z;
        self.n = false;
        self.h = false;
        self.c = c;
    }

    /// The F register as it is seen by the rest of the system. The lower nibble always reads 0.
    pub fn as_byte(&self) -> u8 {
        bool_to_mask::<7>(self.z)
            | bool_to_mask::<6>(self.n)
            | bool_to_mask::<5>(self.h)
            | bool_to_mask::<4>(self.c)
    }
}

const fn bit_select<const B: u8>() -> u8 {
    const {
        match B {
            n @ 0..=7 => 0x1 << n,
            _ => panic!("You must select between the 0th and 7th bit!"),
        }
    }
}

const fn bool_to_mask<const B: u8>(val: bool) -> u8 {
    (val as u8) << B
}

pub(crate) const fn check_bit(bit: u8, src: u8) -> bool {
    let bit = 0x1 << bit;
    (src & bit) == bit
}

pub const fn check_bit_const<const B: u8>(src: u8) -> bool {
    (src & bit_select::<B>()) == bit_select::<B>()
}

fn addition_operation(val: &mut u8, op: u8, carry: bool, flags: &mut Flags) {
    let carry = carry as u8;
    let (a, c1) = val.overflowing_add(op);
    let (a, c2) = a.overflowing_add(carry);
    flags.z = a == 0;
    flags.n = false;
    flags.h = (*val & 0x0F) + (op & 0x0F) + carry > 0x0F;
    flags.c = c1 | c2;
    *val = a;
}

fn subtraction_operation(val: &mut u8, op: u8, carry: bool, flags: &mut Flags) {
    let carry = carry as u8;
    let (a, c1) = val.overflowing_sub(op);
    let (a, c2) = a.overflowing_sub(carry);
    flags.z = a == 0;
    flags.n = true;
    flags.h = (*val & 0x0F) < (op & 0x0F) + carry;
    flags.c = c1 | c2;
    *val = a;
}

/// Adjusts the result of the last addition or subtraction so that A holds a binary coded decimal.
fn to_bcd(mut val: u8, flags: &mut Flags) -> u8 {
    if !flags.n {
        // after an addition, adjust if (half-)carry occurred or if result is out of bounds
        if flags.c || val > 0x99 {
            val = val.wrapping_add(0x60);
            flags.c = true;
        }
        if flags.h || (val & 0x0F) > 0x09 {
            val = val.wrapping_add(0x06);
        }
    } else {
        if flags.c {
            val = val.wrapping_sub(0x60);
        }
        if flags.h {
            val = val.wrapping_sub(0x06);
        }
    }
    flags.z = val == 0;
    flags.h = false;
    val
}

impl Cpu {
    /// Constructs a new CPU with each register set to 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the CPU into the state it is in once the boot ROM hands control to the cartridge.
    pub fn reset(&mut self) {
        *self = Self {
            pc: Wrapping(0x0100),
            sp: Wrapping(0xFFFE),
            ..Self::default()
        };
    }

    /// Returns the value of the Z flag
    pub fn zero_flag(&self) -> bool {
        self.f.z
    }

    /// Returns the value of the N flag
    pub fn subtraction_flag(&self) -> bool {
        self.f.n
    }

    /// Returns the value of the H flag
    pub fn half_carry_flag(&self) -> bool {
        self.f.h
    }

    /// Returns the value of the C flag
    pub fn carry_flag(&self) -> bool {
        self.f.c
    }

    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }

    /// Takes a snapshot of the registers.
    pub fn context(&self) -> ProcessorContext {
        ProcessorContext {
            pc: self.pc.0,
            sp: self.sp.0,
            af: self.af(),
            bc: self.bc(),
            de: self.de(),
            hl: self.hl(),
            cycles: self.cycles,
        }
    }

    /// Converts the elapsed time into a number of clock cycles and runs instructions until that
    /// many cycles have been executed. The last instruction may overshoot the budget; the next tick
    /// picks up from wherever the counter ended up.
    pub fn tick(
        &mut self,
        elapsed: Duration,
        mem: &mut impl MemoryLikeExt,
        observer: &mut impl TraceObserver,
    ) -> Result<(), CpuError> {
        let budget = elapsed.as_nanos() * CLOCK_SPEED as u128 / 1_000_000_000;
        let target = self.cycles.saturating_add(budget as u64);
        while self.cycles < target {
            self.step(mem, observer)?;
        }
        Ok(())
    }

    /// Performs one unit of work: services an interrupt, idles while halted, or executes exactly
    /// one instruction. Returns the number of cycles consumed.
    pub fn step(
        &mut self,
        mem: &mut impl MemoryLikeExt,
        observer: &mut impl TraceObserver,
    ) -> Result<u8, CpuError> {
        let active = mem.pending_interrupts();
        if active != 0 {
            match self.state {
                CpuState::Halted => self.state = CpuState::Running,
                CpuState::Stopped if active & Interrupt::Joypad.mask() != 0 => {
                    self.state = CpuState::Running
                }
                _ => {}
            }
            if self.ime && self.is_running() {
                if let Some(int) = Interrupt::highest_priority(active) {
                    self.service_interrupt(int, mem);
                    return Ok(INTERRUPT_CYCLES);
                }
            }
        }
        if !self.is_running() {
            self.cycles += 4;
            return Ok(4);
        }

        let pc = self.pc.0;
        let opcode = mem.read_byte(pc);
        let Some(mut desc) = lookup_op(opcode) else {
            error!("Unknown op code 0x{opcode:0>2X} @ 0x{pc:0>4X}");
            return Err(CpuError::UnknownOpcode { opcode, pc });
        };
        if desc.op.is_prefixed() {
            desc = lookup_prefixed_op(mem.read_byte(pc.wrapping_add(1)));
        }
        observer.observe(&self.context(), &desc);

        let operand = match (desc.mode, desc.length) {
            (AddressingMode::None, _) => 0,
            (_, 2) => mem.read_byte(pc.wrapping_add(1)) as u16,
            (_, 3) => mem.read_word(pc.wrapping_add(1)),
            _ => 0,
        };
        // PC is moved past the instruction (and its operands) before it executes, so relative
        // jumps and return addresses are based on the following instruction.
        self.pc += Wrapping(desc.length as u16);
        let cycles = self.execute(desc.op, operand, mem);
        self.cycles += cycles as u64;
        if let Some(ime) = self.ime_switch.retire() {
            self.ime = ime;
        }
        Ok(cycles)
    }

    fn service_interrupt(&mut self, int: Interrupt, mem: &mut impl MemoryLikeExt) {
        debug!(
            "Servicing {int} interrupt, jumping from 0x{:0>4X} to 0x{:0>4X}",
            self.pc,
            int.vector()
        );
        mem.clear_interrupt_req(int);
        self.ime = false;
        self.push_word(mem, self.pc.0);
        self.pc = Wrapping(int.vector());
        self.cycles += INTERRUPT_CYCLES as u64;
    }

    /// Executes the given instruction, whose operand has already been read. PC is expected to
    /// point at the following instruction. Returns the number of cycles the instruction took.
    pub fn execute(
        &mut self,
        instr: Instruction,
        operand: u16,
        mem: &mut impl MemoryLikeExt,
    ) -> u8 {
        let cycles = instr.cycles();
        match instr {
            Instruction::Load(op) => self.execute_load_op(op, operand, mem),
            Instruction::Control(op) => self.execute_control_op(op),
            Instruction::Jump(op) => {
                if self.execute_jump_op(op, operand, mem) {
                    return cycles + op.taken_penalty();
                }
            }
            Instruction::Arithmetic(op) => self.execute_arithmetic_op(op, operand, mem),
            Instruction::Bit(op) => self.execute_bit_op(op, mem),
            Instruction::BitShift(op) => self.execute_bit_shift_op(op, mem),
            Instruction::Daa => self.a = Wrapping(to_bcd(self.a.0, &mut self.f)),
            Instruction::Scf => {
                self.f.n = false;
                self.f.h = false;
                self.f.c = true;
            }
            Instruction::Cpl => {
                self.a = !self.a;
                self.f.n = true;
                self.f.h = true;
            }
            Instruction::Ccf => {
                self.f.n = false;
                self.f.h = false;
                self.f.c = !self.f.c;
            }
            Instruction::Di => self.ime_switch.arm(false),
            Instruction::Ei => self.ime_switch.arm(true),
            Instruction::Rla => self.rotate_a(BitShiftOp::Rl(HalfRegister::A.into()), mem),
            Instruction::Rlca => self.rotate_a(BitShiftOp::Rlc(HalfRegister::A.into()), mem),
            Instruction::Rra => self.rotate_a(BitShiftOp::Rr(HalfRegister::A.into()), mem),
            Instruction::Rrca => self.rotate_a(BitShiftOp::Rrc(HalfRegister::A.into()), mem),
            // Resolved into the prefixed op during decoding
            Instruction::Prefixed => {}
        }
        cycles
    }

    fn execute_control_op(&mut self, op: ControlOp) {
        match op {
            ControlOp::Noop => {}
            ControlOp::Halt => self.state = CpuState::Halted,
            ControlOp::Stop => self.state = CpuState::Stopped,
        }
    }

    /// Returns whether or not the jump was taken.
    fn execute_jump_op(&mut self, op: JumpOp, operand: u16, mem: &mut impl MemoryLikeExt) -> bool {
        match op {
            JumpOp::ConditionalRelative(cond) => {
                let taken = cond.passed(self);
                if taken {
                    self.relative_jump(operand as u8);
                }
                taken
            }
            JumpOp::Relative => {
                self.relative_jump(operand as u8);
                true
            }
            JumpOp::ConditionalAbsolute(cond) => {
                let taken = cond.passed(self);
                if taken {
                    self.pc = Wrapping(operand);
                }
                taken
            }
            JumpOp::Absolute => {
                self.pc = Wrapping(operand);
                true
            }
            JumpOp::JumpToHL => {
                self.pc = Wrapping(self.hl());
                true
            }
            JumpOp::Call => {
                self.call(operand, mem);
                true
            }
            JumpOp::ConditionalCall(cond) => {
                let taken = cond.passed(self);
                if taken {
                    self.call(operand, mem);
                }
                taken
            }
            JumpOp::Return => {
                self.pc = Wrapping(self.pop_word(mem));
                true
            }
            JumpOp::ConditionalReturn(cond) => {
                let taken = cond.passed(self);
                if taken {
                    self.pc = Wrapping(self.pop_word(mem));
                }
                taken
            }
            JumpOp::ReturnAndEnable => {
                self.ime = true;
                self.pc = Wrapping(self.pop_word(mem));
                true
            }
            JumpOp::Restart(vector) => {
                self.call(vector as u16, mem);
                true
            }
        }
    }

    fn relative_jump(&mut self, offset: u8) {
        self.pc = Wrapping(self.pc.0.wrapping_add_signed(offset as i8 as i16));
    }

    fn call(&mut self, dest: u16, mem: &mut impl MemoryLikeExt) {
        self.push_word(mem, self.pc.0);
        self.pc = Wrapping(dest);
    }

    fn execute_load_op(&mut self, op: LoadOp, operand: u16, mem: &mut impl MemoryLikeExt) {
        match op {
            LoadOp::Basic { dest, src } => {
                let byte = self.copy_byte(mem, src);
                self.store_byte(dest, mem, byte);
            }
            LoadOp::Direct16(reg) => self.write_wide_reg(reg, operand),
            LoadOp::Direct(reg) => self.store_byte(reg, mem, operand as u8),
            LoadOp::LoadIntoA(ptr) => {
                let addr = self.load_a_pointer(ptr);
                self.a = Wrapping(mem.read_byte(addr));
            }
            LoadOp::StoreFromA(ptr) => {
                let addr = self.load_a_pointer(ptr);
                mem.write_byte(addr, self.a.0);
            }
            LoadOp::StoreSP => mem.write_word(operand, self.sp.0),
            LoadOp::HLIntoSP => self.sp = Wrapping(self.hl()),
            LoadOp::SPIntoHL => {
                let val = self.offset_sp(operand as u8);
                self.write_hl(val);
            }
            LoadOp::Pop(reg) => {
                let val = self.pop_word(mem);
                self.write_wide_reg_without_sp(reg, val);
            }
            LoadOp::Push(reg) => {
                let val = self.read_wide_reg_without_sp(reg);
                self.push_word(mem, val);
            }
            LoadOp::StoreHigh => mem.write_byte(high_addr(operand as u8), self.a.0),
            LoadOp::LoadHigh => self.a = Wrapping(mem.read_byte(high_addr(operand as u8))),
            LoadOp::Ldhca => mem.write_byte(high_addr(self.c.0), self.a.0),
            LoadOp::Ldhac => self.a = Wrapping(mem.read_byte(high_addr(self.c.0))),
            LoadOp::StoreAbsolute => mem.write_byte(operand, self.a.0),
            LoadOp::LoadAbsolute => self.a = Wrapping(mem.read_byte(operand)),
        }
    }

    /// Resolves the address for the loads to and from A, adjusting HL if needed.
    fn load_a_pointer(&mut self, ptr: LoadAPointer) -> u16 {
        match ptr {
            LoadAPointer::BC => self.bc(),
            LoadAPointer::DE => self.de(),
            LoadAPointer::Hli => {
                let digest = self.hl();
                self.write_hl(digest.wrapping_add(1));
                digest
            }
            LoadAPointer::Hld => {
                let digest = self.hl();
                self.write_hl(digest.wrapping_sub(1));
                digest
            }
        }
    }

    /// Computes SP plus a signed byte, setting the flags as ADD SP,e8 and LD HL,SP+e8 do. The
    /// half-carry and carry come from the addition of the low byte.
    fn offset_sp(&mut self, offset: u8) -> u16 {
        let sp = self.sp.0;
        let delta = offset as i8 as i16 as u16;
        self.f.z = false;
        self.f.n = false;
        self.f.h = (sp & 0x000F) + (delta & 0x000F) > 0x000F;
        self.f.c = (sp & 0x00FF) + (delta & 0x00FF) > 0x00FF;
        sp.wrapping_add(delta)
    }

    fn execute_arithmetic_op(
        &mut self,
        op: ArithmeticOp,
        operand: u16,
        mem: &mut impl MemoryLikeExt,
    ) {
        let direct = operand as u8;
        match op {
            ArithmeticOp::Add(byte) => {
                let byte = self.some_byte(mem, byte, direct);
                addition_operation(&mut self.a.0, byte, false, &mut self.f);
            }
            ArithmeticOp::Adc(byte) => {
                let byte = self.some_byte(mem, byte, direct);
                addition_operation(&mut self.a.0, byte, self.f.c, &mut self.f);
            }
            ArithmeticOp::Sub(byte) => {
                let byte = self.some_byte(mem, byte, direct);
                subtraction_operation(&mut self.a.0, byte, false, &mut self.f);
            }
            ArithmeticOp::Sbc(byte) => {
                let byte = self.some_byte(mem, byte, direct);
                subtraction_operation(&mut self.a.0, byte, self.f.c, &mut self.f);
            }
            ArithmeticOp::Cp(byte) => {
                let byte = self.some_byte(mem, byte, direct);
                let mut a = self.a.0;
                subtraction_operation(&mut a, byte, false, &mut self.f);
            }
            ArithmeticOp::And(byte) => {
                self.a.0 &= self.some_byte(mem, byte, direct);
                self.f.z = self.a.0 == 0;
                self.f.n = false;
                self.f.h = true;
                self.f.c = false;
            }
            ArithmeticOp::Xor(byte) => {
                self.a.0 ^= self.some_byte(mem, byte, direct);
                self.f.z = self.a.0 == 0;
                self.f.n = false;
                self.f.h = false;
                self.f.c = false;
            }
            ArithmeticOp::Or(byte) => {
                self.a.0 |= self.some_byte(mem, byte, direct);
                self.f.z = self.a.0 == 0;
                self.f.n = false;
                self.f.h = false;
                self.f.c = false;
            }
            ArithmeticOp::Inc(reg) => {
                let mut h = false;
                let val = self.update_byte(reg, mem, |byte| {
                    h = *byte & 0x0F == 0x0F;
                    *byte = byte.wrapping_add(1);
                });
                self.f.z = val == 0;
                self.f.n = false;
                self.f.h = h;
            }
            ArithmeticOp::Dec(reg) => {
                let mut h = false;
                let val = self.update_byte(reg, mem, |byte| {
                    h = *byte & 0x0F == 0;
                    *byte = byte.wrapping_sub(1);
                });
                self.f.z = val == 0;
                self.f.n = true;
                self.f.h = h;
            }
            ArithmeticOp::Add16(reg) => {
                let value = self.read_wide_reg(reg);
                let hl = self.hl();
                self.f.n = false;
                self.f.h = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
                let (hl, carry) = hl.overflowing_add(value);
                self.f.c = carry;
                self.write_hl(hl);
            }
            ArithmeticOp::AddSP => self.sp = Wrapping(self.offset_sp(direct)),
            ArithmeticOp::Inc16(reg) => {
                let val = self.read_wide_reg(reg).wrapping_add(1);
                self.write_wide_reg(reg, val);
            }
            ArithmeticOp::Dec16(reg) => {
                let val = self.read_wide_reg(reg).wrapping_sub(1);
                self.write_wide_reg(reg, val);
            }
        }
    }

    fn some_byte(&self, mem: &impl MemoryLikeExt, byte: SomeByte, direct: u8) -> u8 {
        match byte {
            SomeByte::Direct => direct,
            SomeByte::Referenced(reg) => self.copy_byte(mem, reg),
        }
    }

    fn execute_bit_op(&mut self, op: BitOp, mem: &mut impl MemoryLikeExt) {
        let BitOp { bit, reg, op } = op;
        debug_assert!(bit < 8);
        match op {
            BitOpInner::Bit => {
                let byte = self.copy_byte(mem, reg);
                self.f.z = !check_bit(bit, byte);
                self.f.n = false;
                self.f.h = true;
            }
            BitOpInner::Res => {
                self.update_byte(reg, mem, |byte| *byte &= !(0x1 << bit));
            }
            BitOpInner::Set => {
                self.update_byte(reg, mem, |byte| *byte |= 0x1 << bit);
            }
        }
    }

    fn execute_bit_shift_op(&mut self, op: BitShiftOp, mem: &mut impl MemoryLikeExt) {
        let carry_in = self.f.c as u8;
        let mut carry = false;
        let byte = self.update_byte(op.target(), mem, |byte| {
            let b = *byte;
            let (new, out) = match op {
                BitShiftOp::Rlc(_) => (b.rotate_left(1), check_bit_const::<7>(b)),
                BitShiftOp::Rrc(_) => (b.rotate_right(1), check_bit_const::<0>(b)),
                BitShiftOp::Rl(_) => ((b << 1) | carry_in, check_bit_const::<7>(b)),
                BitShiftOp::Rr(_) => ((b >> 1) | (carry_in << 7), check_bit_const::<0>(b)),
                BitShiftOp::Sla(_) => (b << 1, check_bit_const::<7>(b)),
                BitShiftOp::Sra(_) => ((b >> 1) | (b & 0x80), check_bit_const::<0>(b)),
                BitShiftOp::Swap(_) => (b.rotate_left(4), false),
                BitShiftOp::Srl(_) => (b >> 1, check_bit_const::<0>(b)),
            };
            carry = out;
            *byte = new;
        });
        self.f.set_for_byte_shift_op(byte == 0, carry);
    }

    /// The unprefixed rotates of A behave like their prefixed versions but always clear Z.
    fn rotate_a(&mut self, op: BitShiftOp, mem: &mut impl MemoryLikeExt) {
        self.execute_bit_shift_op(op, mem);
        self.f.z = false;
    }

    pub fn copy_byte(&self, mem: &impl MemoryLikeExt, reg: RegOrPointer) -> u8 {
        match reg {
            RegOrPointer::Reg(reg) => self[reg].0,
            RegOrPointer::Pointer => mem.read_byte(self.hl()),
        }
    }

    #[track_caller]
    fn update_byte(
        &mut self,
        reg: RegOrPointer,
        mem: &mut impl MemoryLikeExt,
        update: impl FnOnce(&mut u8),
    ) -> u8 {
        match reg {
            RegOrPointer::Reg(reg) => {
                update(&mut self[reg].0);
                self[reg].0
            }
            RegOrPointer::Pointer => mem.update_byte(self.hl(), update),
        }
    }

    /// Stores the given byte into either a (half) register or into memory using the HL register as
    /// an index.
    fn store_byte(&mut self, reg: RegOrPointer, mem: &mut impl MemoryLikeExt, val: u8) {
        match reg {
            RegOrPointer::Reg(reg) => self[reg].0 = val,
            RegOrPointer::Pointer => mem.write_byte(self.hl(), val),
        }
    }

    /// Decrements SP by two and stores the word at the new SP.
    pub fn push_word(&mut self, mem: &mut impl MemoryLikeExt, val: u16) {
        self.sp -= Wrapping(2);
        mem.write_word(self.sp.0, val);
    }

    /// Reads the word at SP and then increments SP by two.
    pub fn pop_word(&mut self, mem: &mut impl MemoryLikeExt) -> u16 {
        let digest = mem.read_word(self.sp.0);
        self.sp += Wrapping(2);
        digest
    }

    fn read_wide_reg(&self, reg: WideReg) -> u16 {
        match reg {
            WideReg::BC => self.bc(),
            WideReg::DE => self.de(),
            WideReg::HL => self.hl(),
            WideReg::SP => self.sp.0,
        }
    }

    fn write_wide_reg(&mut self, reg: WideReg, val: u16) {
        match reg {
            WideReg::BC => self.write_bc(val),
            WideReg::DE => self.write_de(val),
            WideReg::HL => self.write_hl(val),
            WideReg::SP => self.sp = Wrapping(val),
        }
    }

    fn read_wide_reg_without_sp(&self, reg: WideRegWithoutSP) -> u16 {
        match reg {
            WideRegWithoutSP::BC => self.bc(),
            WideRegWithoutSP::DE => self.de(),
            WideRegWithoutSP::HL => self.hl(),
            WideRegWithoutSP::AF => self.af(),
        }
    }

    fn write_wide_reg_without_sp(&mut self, reg: WideRegWithoutSP, val: u16) {
        match reg {
            WideRegWithoutSP::BC => self.write_bc(val),
            WideRegWithoutSP::DE => self.write_de(val),
            WideRegWithoutSP::HL => self.write_hl(val),
            WideRegWithoutSP::AF => self.write_af(val),
        }
    }

    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a.0, self.f.as_byte()])
    }

    /// Writes A and F. The lower nibble of F does not exist, so it is dropped.
    pub fn write_af(&mut self, val: u16) {
        let [a, f] = val.to_be_bytes();
        self.a = Wrapping(a);
        self.f.set_from_byte(f);
    }

    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b.0, self.c.0])
    }

    pub fn write_bc(&mut self, val: u16) {
        let [b, c] = val.to_be_bytes().map(Wrapping);
        self.b = b;
        self.c = c;
    }

    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d.0, self.e.0])
    }

    pub fn write_de(&mut self, val: u16) {
        let [d, e] = val.to_be_bytes().map(Wrapping);
        self.d = d;
        self.e = e;
    }

    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h.0, self.l.0])
    }

    pub fn write_hl(&mut self, val: u16) {
        let [h, l] = val.to_be_bytes().map(Wrapping);
        self.h = h;
        self.l = l;
    }
}

const fn high_addr(low: u8) -> u16 {
    u16::from_be_bytes([0xFF, low])
}

impl Index<HalfRegister> for Cpu {
    type Output = Wrapping<u8>;

    fn index(&self, index: HalfRegister) -> &Self::Output {
        match index {
            HalfRegister::A => &self.a,
            HalfRegister::B => &self.b,
            HalfRegister::C => &self.c,
            HalfRegister::D => &self.d,
            HalfRegister::E => &self.e,
            HalfRegister::H => &self.h,
            HalfRegister::L => &self.l,
        }
    }
}

impl IndexMut<HalfRegister> for Cpu {
    fn index_mut(&mut self, index: HalfRegister) -> &mut Self::Output {
        match index {
            HalfRegister::A => &mut self.a,
            HalfRegister::B => &mut self.b,
            HalfRegister::C => &mut self.c,
            HalfRegister::D => &mut self.d,
            HalfRegister::E => &mut self.e,
            HalfRegister::H => &mut self.h,
            HalfRegister::L => &mut self.l,
        }
    }
}
