use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

use crate::instruction::OpDescriptor;

/// A snapshot of the registers, taken right before an instruction executes.
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display, Serialize, Deserialize,
)]
#[display(
    "PC=0x{pc:0>4X} SP=0x{sp:0>4X} AF=0x{af:0>4X} BC=0x{bc:0>4X} DE=0x{de:0>4X} HL=0x{hl:0>4X} cycles={cycles}"
)]
pub struct ProcessorContext {
    /// Points at the op code of the instruction about to execute.
    pub pc: u16,
    pub sp: u16,
    pub af: u16,
    pub bc: u16,
    pub de: u16,
    pub hl: u16,
    /// The number of cycles executed so far.
    pub cycles: u64,
}

impl ProcessorContext {
    /// Formats the canonical trace line for this snapshot and the instruction about to execute.
    /// Prefixed ops show both bytes, e.g. `CB7E`.
    pub fn trace_line(&self, desc: &OpDescriptor) -> String {
        let prefix = if desc.is_cb_prefixed() { "CB" } else { "" };
        format!(
            "{:04X}  {prefix}{:02X}\t{:>6}\t{:04X} {:04X} {:04X} {:04X} {}",
            self.pc,
            desc.code,
            desc.mnemonic,
            self.af,
            self.bc,
            self.de,
            self.hl,
            self.cycles
        )
    }
}

/// A hook that is called right before each instruction is executed. Observers only watch; they
/// have no way to affect the CPU.
pub trait TraceObserver {
    fn observe(&mut self, ctx: &ProcessorContext, desc: &OpDescriptor);
}

/// Observes nothing.
impl TraceObserver for () {
    fn observe(&mut self, _: &ProcessorContext, _: &OpDescriptor) {}
}

impl<F> TraceObserver for F
where
    F: FnMut(&ProcessorContext, &OpDescriptor),
{
    fn observe(&mut self, ctx: &ProcessorContext, desc: &OpDescriptor) {
        self(ctx, desc)
    }
}

/// Emits one trace line per instruction through `tracing` on the `wraith::trace` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TraceObserver for TracingObserver {
    fn observe(&mut self, ctx: &ProcessorContext, desc: &OpDescriptor) {
        trace!(target: "wraith::trace", "{}", ctx.trace_line(desc));
    }
}

#[cfg(test)]
mod tests {
    use super::ProcessorContext;
    use super::TraceObserver;
    use crate::lookup::lookup_op;
    use crate::lookup::lookup_prefixed_op;

    #[test]
    fn trace_line_format() {
        let ctx = ProcessorContext {
            pc: 0x0150,
            sp: 0xFFFE,
            af: 0x01B0,
            bc: 0x0013,
            de: 0x00D8,
            hl: 0x014D,
            cycles: 1234,
        };
        let desc = lookup_op(0xC3).unwrap();
        assert_eq!(
            ctx.trace_line(&desc),
            "0150  C3\t    JP\t01B0 0013 00D8 014D 1234"
        );
    }

    #[test]
    fn prefixed_ops_show_both_bytes() {
        let ctx = ProcessorContext {
            pc: 0x0150,
            ..Default::default()
        };
        assert_eq!(
            ctx.trace_line(&lookup_prefixed_op(0x7E)),
            "0150  CB7E\t   BIT\t0000 0000 0000 0000 0"
        );
        // The unprefixed op with the same code is unambiguous
        assert_eq!(
            ctx.trace_line(&lookup_op(0x7E).unwrap()),
            "0150  7E\t    LD\t0000 0000 0000 0000 0"
        );
    }

    #[test]
    fn closures_observe() {
        let mut seen = Vec::new();
        let mut observer = |ctx: &ProcessorContext, desc: &crate::instruction::OpDescriptor| {
            seen.push((ctx.pc, desc.code))
        };
        let desc = lookup_op(0x00).unwrap();
        observer.observe(&ProcessorContext::default(), &desc);
        observer.observe(
            &ProcessorContext {
                pc: 1,
                ..Default::default()
            },
            &desc,
        );
        assert_eq!(seen, [(0, 0x00), (1, 0x00)]);
    }
}
