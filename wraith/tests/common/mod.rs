use wraith::rom::checksum;

/// Where the programs handed to [`build_rom`] are placed.
const PROGRAM_START: usize = 0x0150;

/// Builds a ROM image with a valid header. The entry point jumps straight over the header to the
/// given program.
pub fn build_rom(cart_type: u8, rom_code: u8, ram_code: u8, program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0; 0x8000 << rom_code];
    // NOP ; JP 0x0150
    rom[0x100..0x104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
    rom[0x134..0x13F].copy_from_slice(b"WRAITH TEST");
    rom[0x147] = cart_type;
    rom[0x148] = rom_code;
    rom[0x149] = ram_code;
    rom[0x14D] = checksum(&rom[0x134..0x14D]);
    rom[PROGRAM_START..PROGRAM_START + program.len()].copy_from_slice(program);
    rom
}
