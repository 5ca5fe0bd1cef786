use std::time::Duration;

use wraith::error::CpuError;
use wraith::instruction::OpDescriptor;
use wraith::mem::vram::OAM_SIZE;
use wraith::ConsoleMode;
use wraith::Error;
use wraith::Gameboy;
use wraith::Interrupt;
use wraith::MemoryLike;
use wraith::MemoryMap;
use wraith::ProcessorContext;
use wraith::VideoDevice;

mod common;
use common::build_rom;

#[test_log::test]
fn stores_through_the_bus() {
    let program = [
        0x3E, 0x42, // LD A,0x42
        0xEA, 0x00, 0xC0, // LD (0xC000),A
        0xE0, 0x80, // LDH (0x80),A
        0x21, 0x00, 0x80, // LD HL,0x8000
        0x77, // LD (HL),A
        0x18, 0xFE, // JR -2
    ];
    let mut gb = Gameboy::new(build_rom(0x00, 0, 0, &program)).unwrap();
    gb.tick(Duration::from_millis(1), &mut ()).unwrap();
    assert_eq!(gb.mem.read_byte(0xC000), 0x42);
    assert_eq!(gb.mem.read_byte(0xFF80), 0x42);
    assert_eq!(gb.mem.read_byte(0x8000), 0x42);
    assert_eq!(gb.cpu.pc.0, 0x015B);
    // Writes to the ROM are ignored by cartridges without a controller
    gb.mem.write_byte(0x0150, 0xFF);
    assert_eq!(gb.mem.read_byte(0x0150), 0x3E);
}

#[test_log::test]
fn switches_rom_and_ram_banks() {
    let program = [
        0x3E, 0x02, // LD A,2
        0xEA, 0x00, 0x20, // LD (0x2000),A
        0xFA, 0x00, 0x40, // LD A,(0x4000)
        0xEA, 0x00, 0xC0, // LD (0xC000),A
        0x3E, 0x0A, // LD A,0x0A
        0xEA, 0x00, 0x00, // LD (0x0000),A
        0x3E, 0x55, // LD A,0x55
        0xEA, 0x00, 0xA0, // LD (0xA000),A
        0x76, // HALT
    ];
    // Four 16 KiB banks and 8 KiB of RAM
    let mut rom = build_rom(0x03, 1, 2, &program);
    rom[2 * 0x4000] = 0xAB;
    let mut gb = Gameboy::new(rom).unwrap();
    // Two steps to get through the entry point, nine for the program
    for _ in 0..11 {
        gb.step(&mut ()).unwrap();
    }
    assert!(!gb.cpu.is_running());
    assert_eq!(gb.mem.read_byte(0xC000), 0xAB);
    assert_eq!(gb.mem.read_byte(0xA000), 0x55);
    assert_eq!(gb.mem.cartridge().mbc().ram()[0], 0x55);
    // Disabling the RAM hides it again
    gb.mem.write_byte(0x0000, 0x00);
    assert_eq!(gb.mem.read_byte(0xA000), 0xFF);
}

#[test_log::test]
fn services_requested_interrupts() {
    let program = [
        0x3E, 0x01, // LD A,0x01
        0xE0, 0xFF, // LDH (0xFF),A
        0xFB, // EI
        0x76, // HALT
        0x18, 0xFE, // JR -2
    ];
    let mut rom = build_rom(0x00, 0, 0, &program);
    // The VBlank handler: LD A,0x77 ; LD (0xC000),A ; RETI
    rom[0x40..0x46].copy_from_slice(&[0x3E, 0x77, 0xEA, 0x00, 0xC0, 0xD9]);
    let mut gb = Gameboy::new(rom).unwrap();
    gb.tick(Duration::from_micros(100), &mut ()).unwrap();
    assert!(!gb.cpu.is_running());
    assert_eq!(gb.mem.read_byte(0xC000), 0x00);

    gb.request_interrupt(Interrupt::VBlank);
    assert_eq!(gb.mem.read_byte(0xFF0F), 0xE1);
    let mut pcs = Vec::new();
    let mut observer = |ctx: &ProcessorContext, _: &OpDescriptor| pcs.push(ctx.pc);
    gb.tick(Duration::from_micros(20), &mut observer).unwrap();
    assert_eq!(gb.mem.read_byte(0xC000), 0x77);
    assert_eq!(gb.mem.read_byte(0xFF0F), 0xE0);
    assert!(pcs.starts_with(&[0x0040, 0x0042, 0x0045]));
    // RETI returns to the instruction after HALT and turns the IME back on
    assert_eq!(pcs[3], 0x0156);
    assert!(gb.cpu.ime);
}

#[test_log::test]
fn unknown_op_code_is_fatal() {
    let mut gb = Gameboy::new(build_rom(0x00, 0, 0, &[0x00, 0xDD])).unwrap();
    let err = gb.tick(Duration::from_millis(1), &mut ()).unwrap_err();
    assert!(matches!(
        err,
        Error::Cpu(CpuError::UnknownOpcode {
            opcode: 0xDD,
            pc: 0x0151
        })
    ));
}

#[test_log::test]
fn rejects_bad_cartridges() {
    assert!(matches!(Gameboy::new(vec![0; 0x100]), Err(Error::Cartridge(_))));
    assert!(matches!(
        Gameboy::new(build_rom(0x19, 0, 0, &[])),
        Err(Error::Cartridge(_))
    ));
}

#[test_log::test]
fn reset_returns_to_entry_point() {
    let mut gb = Gameboy::new(build_rom(0x00, 0, 0, &[0x18, 0xFE])).unwrap();
    gb.tick(Duration::from_micros(50), &mut ()).unwrap();
    assert_eq!(gb.cpu.pc.0, 0x0150);
    gb.mem.write_byte(0xC000, 0x12);
    gb.reset();
    assert_eq!(gb.cpu.pc.0, 0x0100);
    assert_eq!(gb.cpu.sp.0, 0xFFFE);
    assert_eq!(gb.cpu.cycles, 0);
    assert_eq!(gb.mem.read_byte(0xC000), 0x12);
}

/// A video device that records what the bus hands it.
#[derive(Default)]
struct Recorder {
    writes: Vec<(u16, u8)>,
    oam: Option<[u8; OAM_SIZE]>,
    bank: u8,
}

impl VideoDevice for Recorder {
    fn read_vram(&self, _addr: u16) -> u8 {
        0x5A
    }

    fn write_vram(&mut self, addr: u16, val: u8) {
        self.writes.push((addr, val));
    }

    fn read_scanline(&self) -> u8 {
        0x90
    }

    fn write_oam(&mut self, data: [u8; OAM_SIZE]) {
        self.oam = Some(data);
    }

    fn switch_vram_bank(&mut self, bank: u8) {
        self.bank = bank;
    }
}

#[test_log::test]
fn custom_video_device() {
    let program = [
        0x3E, 0xC0, // LD A,0xC0
        0xE0, 0x46, // LDH (0x46),A
        0x3E, 0x01, // LD A,0x01
        0xE0, 0x4F, // LDH (0x4F),A
        0xEA, 0x34, 0x92, // LD (0x9234),A
        0xF0, 0x44, // LDH A,(0x44)
        0xEA, 0x00, 0xC0, // LD (0xC000),A
        0x76, // HALT
    ];
    let cart = wraith::Cartridge::new(build_rom(0x00, 0, 0, &program)).unwrap();
    let mem = MemoryMap::with_video(cart, Recorder::default(), ConsoleMode::Cgb);
    let mut gb = Gameboy::with_memory(mem);
    for _ in 0..9 {
        gb.step(&mut ()).unwrap();
    }
    assert_eq!(gb.mem.video.bank, 1);
    assert_eq!(gb.mem.video.writes, [(0x9234, 0x01)]);
    assert_eq!(gb.mem.read_byte(0x8000), 0x5A);
    assert_eq!(gb.mem.read_byte(0xC000), 0x90);
    // The DMA copied the (still empty) start of WRAM
    assert_eq!(gb.mem.video.oam, Some([0; OAM_SIZE]));
}
