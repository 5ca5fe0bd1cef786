use std::time::Duration;

use wraith::instruction::OpDescriptor;
use wraith::Gameboy;
use wraith::ProcessorContext;
use wraith::TracingObserver;

mod common;
use common::build_rom;

#[test_log::test]
fn trace_lines_are_emitted() {
    // NOP ; JP 0x0150 (from the header) then JR -2
    let mut gb = Gameboy::new(build_rom(0x00, 0, 0, &[0x18, 0xFE])).unwrap();
    let mut lines = Vec::new();
    let mut observer =
        |ctx: &ProcessorContext, desc: &OpDescriptor| lines.push(ctx.trace_line(desc));
    gb.tick(Duration::from_micros(10), &mut observer).unwrap();
    assert_eq!(lines[0], "0100  00\t   NOP\t0000 0000 0000 0000 0");
    assert_eq!(lines[1], "0101  C3\t    JP\t0000 0000 0000 0000 4");
    assert_eq!(lines[2], "0150  18\t    JR\t0000 0000 0000 0000 20");

    // The tracing observer only logs, so ticking through it behaves the same
    let mut other = Gameboy::new(build_rom(0x00, 0, 0, &[0x18, 0xFE])).unwrap();
    other.tick(Duration::from_micros(10), &mut TracingObserver).unwrap();
    assert_eq!(gb.cpu, other.cpu);
}
