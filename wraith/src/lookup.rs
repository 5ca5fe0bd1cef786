use array_concat::concat_arrays;

use crate::instruction::*;

type OpArray<const N: usize> = [Option<Instruction>; N];

/// Looks up the descriptor of an (unprefixed) op code. The handful of op codes that do not
/// correspond to any operation return `None`.
pub fn lookup_op(code: u8) -> Option<OpDescriptor> {
    OP_LOOKUP[code as usize]
}

/// Looks up the descriptor of the op code that follows a 0xCB prefix. Every byte is a valid
/// prefixed op.
pub fn lookup_prefixed_op(code: u8) -> OpDescriptor {
    PREFIXED_OP_LOOKUP[code as usize]
}

const fn describe<const N: usize>(ops: OpArray<N>) -> [Option<OpDescriptor>; N] {
    let mut digest = [None; N];
    let mut i = 0;
    while i < N {
        digest[i] = match ops[i] {
            Some(op) => Some(OpDescriptor::new(i as u8, op)),
            None => None,
        };
        i += 1;
    }
    digest
}

const fn describe_prefixed(ops: OpArray<0x100>) -> [OpDescriptor; 0x100] {
    let mut digest = [OpDescriptor::new(0, Instruction::Prefixed); 0x100];
    let mut i = 0;
    while i < 0x100 {
        digest[i] = match ops[i] {
            Some(op) => OpDescriptor::new(i as u8, op),
            None => panic!("Every prefixed op code must be defined"),
        };
        i += 1;
    }
    digest
}

macro_rules! reg {
    (Pointer) => {
        RegOrPointer::Pointer
    };
    ($r: ident) => {
        RegOrPointer::Reg(HalfRegister::$r)
    };
}

macro_rules! define_op {
    () => {
        None
    };
    (NOOP) => {
        Some(Instruction::Control(ControlOp::Noop))
    };
    (STOP) => {
        Some(Instruction::Control(ControlOp::Stop))
    };
    (HALT) => {
        Some(Instruction::Control(ControlOp::Halt))
    };
    (DAA) => {
        Some(Instruction::Daa)
    };
    (SCF) => {
        Some(Instruction::Scf)
    };
    (CPL) => {
        Some(Instruction::Cpl)
    };
    (CCF) => {
        Some(Instruction::Ccf)
    };
    (DI) => {
        Some(Instruction::Di)
    };
    (EI) => {
        Some(Instruction::Ei)
    };
    (RLCA) => {
        Some(Instruction::Rlca)
    };
    (RLA) => {
        Some(Instruction::Rla)
    };
    (RRCA) => {
        Some(Instruction::Rrca)
    };
    (RRA) => {
        Some(Instruction::Rra)
    };
    (PREFIX) => {
        Some(Instruction::Prefixed)
    };
    (JR) => {
        Some(Instruction::Jump(JumpOp::Relative))
    };
    (JR, $c: ident) => {
        Some(Instruction::Jump(JumpOp::ConditionalRelative(Condition::$c)))
    };
    (JP) => {
        Some(Instruction::Jump(JumpOp::Absolute))
    };
    (JP, HL) => {
        Some(Instruction::Jump(JumpOp::JumpToHL))
    };
    (JP, $c: ident) => {
        Some(Instruction::Jump(JumpOp::ConditionalAbsolute(Condition::$c)))
    };
    (CALL) => {
        Some(Instruction::Jump(JumpOp::Call))
    };
    (CALL, $c: ident) => {
        Some(Instruction::Jump(JumpOp::ConditionalCall(Condition::$c)))
    };
    (RET) => {
        Some(Instruction::Jump(JumpOp::Return))
    };
    (RETI) => {
        Some(Instruction::Jump(JumpOp::ReturnAndEnable))
    };
    (RET, $c: ident) => {
        Some(Instruction::Jump(JumpOp::ConditionalReturn(Condition::$c)))
    };
    (RST, $v: literal) => {
        Some(Instruction::Jump(JumpOp::Restart($v)))
    };
    (LD16, $r: ident) => {
        Some(Instruction::Load(LoadOp::Direct16(WideReg::$r)))
    };
    (LD, a16, SP) => {
        Some(Instruction::Load(LoadOp::StoreSP))
    };
    (LD, HL, SP) => {
        Some(Instruction::Load(LoadOp::SPIntoHL))
    };
    (LD, SP, HL) => {
        Some(Instruction::Load(LoadOp::HLIntoSP))
    };
    (LD, a16, A) => {
        Some(Instruction::Load(LoadOp::StoreAbsolute))
    };
    (LD, A, a16) => {
        Some(Instruction::Load(LoadOp::LoadAbsolute))
    };
    (LD, Ptr, $p: ident, A) => {
        Some(Instruction::Load(LoadOp::StoreFromA(LoadAPointer::$p)))
    };
    (LD, A, Ptr, $p: ident) => {
        Some(Instruction::Load(LoadOp::LoadIntoA(LoadAPointer::$p)))
    };
    (LD, $r: ident) => {
        Some(Instruction::Load(LoadOp::Direct(reg!($r))))
    };
    // The would-be `LD (HL), (HL)` is where HALT lives.
    (LD, Pointer, Pointer,) => {
        define_op!(HALT)
    };
    (LD, $d: ident, $s: ident,) => {
        Some(Instruction::Load(LoadOp::Basic {
            dest: reg!($d),
            src: reg!($s),
        }))
    };
    (LDH, a8, A) => {
        Some(Instruction::Load(LoadOp::StoreHigh))
    };
    (LDH, A, a8) => {
        Some(Instruction::Load(LoadOp::LoadHigh))
    };
    (LDH, C, A) => {
        Some(Instruction::Load(LoadOp::Ldhca))
    };
    (LDH, A, C) => {
        Some(Instruction::Load(LoadOp::Ldhac))
    };
    (POP, $r: ident) => {
        Some(Instruction::Load(LoadOp::Pop(WideRegWithoutSP::$r)))
    };
    (PUSH, $r: ident) => {
        Some(Instruction::Load(LoadOp::Push(WideRegWithoutSP::$r)))
    };
    (INC, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Inc(reg!($r))))
    };
    (DEC, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Dec(reg!($r))))
    };
    (INC16, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Inc16(WideReg::$r)))
    };
    (DEC16, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Dec16(WideReg::$r)))
    };
    (ADD16, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Add16(WideReg::$r)))
    };
    (ADD, SP) => {
        Some(Instruction::Arithmetic(ArithmeticOp::AddSP))
    };
    (ADD) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Add(SomeByte::Direct)))
    };
    (ADC) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Adc(SomeByte::Direct)))
    };
    (SUB) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Sub(SomeByte::Direct)))
    };
    (SBC) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Sbc(SomeByte::Direct)))
    };
    (AND) => {
        Some(Instruction::Arithmetic(ArithmeticOp::And(SomeByte::Direct)))
    };
    (XOR) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Xor(SomeByte::Direct)))
    };
    (OR) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Or(SomeByte::Direct)))
    };
    (CP) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Cp(SomeByte::Direct)))
    };
    (ADD, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Add(SomeByte::Referenced(reg!($r)))))
    };
    (ADC, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Adc(SomeByte::Referenced(reg!($r)))))
    };
    (SUB, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Sub(SomeByte::Referenced(reg!($r)))))
    };
    (SBC, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Sbc(SomeByte::Referenced(reg!($r)))))
    };
    (AND, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::And(SomeByte::Referenced(reg!($r)))))
    };
    (XOR, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Xor(SomeByte::Referenced(reg!($r)))))
    };
    (OR, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Or(SomeByte::Referenced(reg!($r)))))
    };
    (CP, $r: ident) => {
        Some(Instruction::Arithmetic(ArithmeticOp::Cp(SomeByte::Referenced(reg!($r)))))
    };
    (RLC, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Rlc(reg!($r))))
    };
    (RRC, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Rrc(reg!($r))))
    };
    (RL, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Rl(reg!($r))))
    };
    (RR, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Rr(reg!($r))))
    };
    (SLA, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Sla(reg!($r))))
    };
    (SRA, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Sra(reg!($r))))
    };
    (SWAP, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Swap(reg!($r))))
    };
    (SRL, $r: ident) => {
        Some(Instruction::BitShift(BitShiftOp::Srl(reg!($r))))
    };
    (BIT, $b: literal, $r: ident) => {
        Some(Instruction::Bit(BitOp {
            bit: $b,
            reg: reg!($r),
            op: BitOpInner::Bit,
        }))
    };
    (RES, $b: literal, $r: ident) => {
        Some(Instruction::Bit(BitOp {
            bit: $b,
            reg: reg!($r),
            op: BitOpInner::Res,
        }))
    };
    (SET, $b: literal, $r: ident) => {
        Some(Instruction::Bit(BitOp {
            bit: $b,
            reg: reg!($r),
            op: BitOpInner::Set,
        }))
    };
}

macro_rules! define_op_chunk {
    (LD) => {{
        const OPS: OpArray<0x40> = concat_arrays!(
            define_op_chunk!(LD, B),
            define_op_chunk!(LD, C),
            define_op_chunk!(LD, D),
            define_op_chunk!(LD, E),
            define_op_chunk!(LD, H),
            define_op_chunk!(LD, L),
            define_op_chunk!(LD, Pointer),
            define_op_chunk!(LD, A)
        );
        OPS
    }};
    ($x: ident, NUM) => {{
        const OPS: OpArray<0x40> = concat_arrays!(
            define_op_chunk!($x, 0,),
            define_op_chunk!($x, 1,),
            define_op_chunk!($x, 2,),
            define_op_chunk!($x, 3,),
            define_op_chunk!($x, 4,),
            define_op_chunk!($x, 5,),
            define_op_chunk!($x, 6,),
            define_op_chunk!($x, 7,)
        );
        OPS
    }};
    ($x: ident, $i: literal,) => {{
        const OPS: OpArray<0x08> = [
            define_op!($x, $i, B),
            define_op!($x, $i, C),
            define_op!($x, $i, D),
            define_op!($x, $i, E),
            define_op!($x, $i, H),
            define_op!($x, $i, L),
            define_op!($x, $i, Pointer),
            define_op!($x, $i, A),
        ];
        OPS
    }};
    ($x: ident) => {{
        const OPS: OpArray<8> = [
            define_op!($x, B),
            define_op!($x, C),
            define_op!($x, D),
            define_op!($x, E),
            define_op!($x, H),
            define_op!($x, L),
            define_op!($x, Pointer),
            define_op!($x, A),
        ];
        OPS
    }};
    ($x: ident, $r: ident) => {{
        const OPS: OpArray<8> = [
            define_op!($x, $r, B,),
            define_op!($x, $r, C,),
            define_op!($x, $r, D,),
            define_op!($x, $r, E,),
            define_op!($x, $r, H,),
            define_op!($x, $r, L,),
            define_op!($x, $r, Pointer,),
            define_op!($x, $r, A,),
        ];
        OPS
    }};
}

macro_rules! define_op_lookup_table {
    () => {
        concat_arrays!(
            define_op_lookup_table!(CHUNK_ONE),
            define_op_lookup_table!(CHUNK_TWO),
            define_op_lookup_table!(CHUNK_THREE),
            define_op_lookup_table!(CHUNK_FOUR)
        )
    };
    (PREFIXED) => {
        concat_arrays!(
            define_op_chunk!(RLC),
            define_op_chunk!(RRC),
            define_op_chunk!(RL),
            define_op_chunk!(RR),
            define_op_chunk!(SLA),
            define_op_chunk!(SRA),
            define_op_chunk!(SWAP),
            define_op_chunk!(SRL),
            define_op_chunk!(BIT, NUM),
            define_op_chunk!(RES, NUM),
            define_op_chunk!(SET, NUM)
        )
    };
    // The top and bottom rows-of-four of the op table are defined by column (i.e. each inner
    // array holds the ops for 0x0N, 0x1N, 0x2N, and 0x3N), then transposed and concatenated.
    (CHUNK_ONE) => {{
        const TO_TRANSPOSED: [OpArray<4>; 0x10] = [
            [
                define_op!(NOOP),
                define_op!(STOP),
                define_op!(JR, NotZero),
                define_op!(JR, NotCarry),
            ],
            [
                define_op!(LD16, BC),
                define_op!(LD16, DE),
                define_op!(LD16, HL),
                define_op!(LD16, SP),
            ],
            [
                define_op!(LD, Ptr, BC, A),
                define_op!(LD, Ptr, DE, A),
                define_op!(LD, Ptr, Hli, A),
                define_op!(LD, Ptr, Hld, A),
            ],
            [
                define_op!(INC16, BC),
                define_op!(INC16, DE),
                define_op!(INC16, HL),
                define_op!(INC16, SP),
            ],
            [
                define_op!(INC, B),
                define_op!(INC, D),
                define_op!(INC, H),
                define_op!(INC, Pointer),
            ],
            [
                define_op!(DEC, B),
                define_op!(DEC, D),
                define_op!(DEC, H),
                define_op!(DEC, Pointer),
            ],
            [
                define_op!(LD, B),
                define_op!(LD, D),
                define_op!(LD, H),
                define_op!(LD, Pointer),
            ],
            [
                define_op!(RLCA),
                define_op!(RLA),
                define_op!(DAA),
                define_op!(SCF),
            ],
            [
                define_op!(LD, a16, SP),
                define_op!(JR),
                define_op!(JR, Zero),
                define_op!(JR, Carry),
            ],
            [
                define_op!(ADD16, BC),
                define_op!(ADD16, DE),
                define_op!(ADD16, HL),
                define_op!(ADD16, SP),
            ],
            [
                define_op!(LD, A, Ptr, BC),
                define_op!(LD, A, Ptr, DE),
                define_op!(LD, A, Ptr, Hli),
                define_op!(LD, A, Ptr, Hld),
            ],
            [
                define_op!(DEC16, BC),
                define_op!(DEC16, DE),
                define_op!(DEC16, HL),
                define_op!(DEC16, SP),
            ],
            [
                define_op!(INC, C),
                define_op!(INC, E),
                define_op!(INC, L),
                define_op!(INC, A),
            ],
            [
                define_op!(DEC, C),
                define_op!(DEC, E),
                define_op!(DEC, L),
                define_op!(DEC, A),
            ],
            [
                define_op!(LD, C),
                define_op!(LD, E),
                define_op!(LD, L),
                define_op!(LD, A),
            ],
            [
                define_op!(RRCA),
                define_op!(RRA),
                define_op!(CPL),
                define_op!(CCF),
            ],
        ];
        const TRANSPOSED: [OpArray<16>; 4] = transpose!(TO_TRANSPOSED);
        const CHUNK: OpArray<0x40> =
            concat_arrays!(TRANSPOSED[0], TRANSPOSED[1], TRANSPOSED[2], TRANSPOSED[3]);
        CHUNK
    }};
    (CHUNK_TWO) => {
        define_op_chunk!(LD)
    };
    (CHUNK_THREE) => {{
        const CHUNK: OpArray<0x40> = concat_arrays!(
            define_op_chunk!(ADD),
            define_op_chunk!(ADC),
            define_op_chunk!(SUB),
            define_op_chunk!(SBC),
            define_op_chunk!(AND),
            define_op_chunk!(XOR),
            define_op_chunk!(OR),
            define_op_chunk!(CP)
        );
        CHUNK
    }};
    (CHUNK_FOUR) => {{
        const TO_TRANSPOSED: [OpArray<4>; 0x10] = [
            [
                define_op!(RET, NotZero),
                define_op!(RET, NotCarry),
                define_op!(LDH, a8, A),
                define_op!(LDH, A, a8),
            ],
            [
                define_op!(POP, BC),
                define_op!(POP, DE),
                define_op!(POP, HL),
                define_op!(POP, AF),
            ],
            [
                define_op!(JP, NotZero),
                define_op!(JP, NotCarry),
                define_op!(LDH, C, A),
                define_op!(LDH, A, C),
            ],
            [define_op!(JP), define_op!(), define_op!(), define_op!(DI)],
            [
                define_op!(CALL, NotZero),
                define_op!(CALL, NotCarry),
                define_op!(),
                define_op!(),
            ],
            [
                define_op!(PUSH, BC),
                define_op!(PUSH, DE),
                define_op!(PUSH, HL),
                define_op!(PUSH, AF),
            ],
            [
                define_op!(ADD),
                define_op!(SUB),
                define_op!(AND),
                define_op!(OR),
            ],
            [
                define_op!(RST, 0x00),
                define_op!(RST, 0x10),
                define_op!(RST, 0x20),
                define_op!(RST, 0x30),
            ],
            [
                define_op!(RET, Zero),
                define_op!(RET, Carry),
                define_op!(ADD, SP),
                define_op!(LD, HL, SP),
            ],
            [
                define_op!(RET),
                define_op!(RETI),
                define_op!(JP, HL),
                define_op!(LD, SP, HL),
            ],
            [
                define_op!(JP, Zero),
                define_op!(JP, Carry),
                define_op!(LD, a16, A),
                define_op!(LD, A, a16),
            ],
            [define_op!(PREFIX), define_op!(), define_op!(), define_op!(EI)],
            [
                define_op!(CALL, Zero),
                define_op!(CALL, Carry),
                define_op!(),
                define_op!(),
            ],
            [define_op!(CALL), define_op!(), define_op!(), define_op!()],
            [
                define_op!(ADC),
                define_op!(SBC),
                define_op!(XOR),
                define_op!(CP),
            ],
            [
                define_op!(RST, 0x08),
                define_op!(RST, 0x18),
                define_op!(RST, 0x28),
                define_op!(RST, 0x38),
            ],
        ];
        const TRANSPOSED: [OpArray<16>; 4] = transpose!(TO_TRANSPOSED);
        const CHUNK: OpArray<0x40> =
            concat_arrays!(TRANSPOSED[0], TRANSPOSED[1], TRANSPOSED[2], TRANSPOSED[3]);
        CHUNK
    }};
}

macro_rules! transpose {
    ($arr: ident) => {{
        const TRANSPOSED: [OpArray<16>; 4] = [
            transpose!($arr, 0),
            transpose!($arr, 1),
            transpose!($arr, 2),
            transpose!($arr, 3),
        ];
        TRANSPOSED
    }};
    ($arr: ident, $i: literal) => {{
        const INNER: OpArray<16> = [
            $arr[0][$i],
            $arr[1][$i],
            $arr[2][$i],
            $arr[3][$i],
            $arr[4][$i],
            $arr[5][$i],
            $arr[6][$i],
            $arr[7][$i],
            $arr[8][$i],
            $arr[9][$i],
            $arr[10][$i],
            $arr[11][$i],
            $arr[12][$i],
            $arr[13][$i],
            $arr[14][$i],
            $arr[15][$i],
        ];
        INNER
    }};
}

// TODO: Fix this once array_concat doesn't emit it anymore
#[allow(unexpected_cfgs)]
static OP_LOOKUP: [Option<OpDescriptor>; 0x100] = {
    const OPS: OpArray<0x100> = define_op_lookup_table!();
    describe(OPS)
};
#[allow(unexpected_cfgs)]
static PREFIXED_OP_LOOKUP: [OpDescriptor; 0x100] = {
    const OPS: OpArray<0x100> = define_op_lookup_table!(PREFIXED);
    describe_prefixed(OPS)
};
