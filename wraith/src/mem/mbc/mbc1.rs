use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

use crate::mem::mbc::RAM_BANK_SIZE;
use crate::mem::mbc::ROM_BANK_SIZE;

/// The most RAM an MBC1 can address, four 8 KiB banks.
const MAX_RAM_SIZE: usize = 4 * RAM_BANK_SIZE;

#[derive(Debug, Hash, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MBC1 {
    ram: Vec<u8>,
    /// The bank that is visible through 0x4000..=0x7FFF. Never 0.
    rom_bank: u8,
    ram_bank: u8,
    /// Determines if RAM can be read from and written to. The actual hardware uses a 4-bit
    /// register, so RAM is enabled only when 0xA is written to it.
    ///
    /// Initially set to `false`, any writes to the memory addresses 0x0000 through 0x1FFF write to
    /// this register.
    ram_enabled: bool,
}

impl Display for MBC1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MBC1 {{")?;
        writeln!(f, "  RAMG:  {}", self.ram_enabled)?;
        writeln!(f, "  BANK1: 0b{:0>8b}", self.rom_bank)?;
        writeln!(f, "  BANK2: 0b{:0>8b}", self.ram_bank)?;
        writeln!(f, "  RAM size: {}", self.ram.len())?;
        writeln!(f, "}}")
    }
}

impl MBC1 {
    pub fn new(ram_size: usize) -> Self {
        Self {
            ram: vec![0; ram_size.min(MAX_RAM_SIZE)],
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
        }
    }

    pub fn rom_bank(&self) -> u8 {
        self.rom_bank
    }

    pub fn ram_bank(&self) -> u8 {
        self.ram_bank
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Returns `None` if RAM is disabled or the cartridge does not have the selected bank.
    fn ram_index(&self, index: u16) -> Option<usize> {
        let index = self.ram_bank as usize * RAM_BANK_SIZE + (index - 0xA000) as usize;
        (self.ram_enabled && index < self.ram.len()).then_some(index)
    }

    /// Reads from either ROM window or from RAM. Anything that is not backed by the cartridge reads
    /// as 0xFF, which is what the open bus of a real MBC1 cartridge returns. Cartridges without a
    /// controller have no RAM-enable gate, so their missing RAM reads as 0 instead.
    pub fn read_byte(&self, rom: &[u8], index: u16) -> u8 {
        let byte = match index {
            0x0000..=0x3FFF => rom.get(index as usize),
            0x4000..=0x7FFF => {
                rom.get(self.rom_bank as usize * ROM_BANK_SIZE + (index - 0x4000) as usize)
            }
            0xA000..=0xBFFF => self.ram_index(index).map(|i| &self.ram[i]),
            _ => None,
        };
        byte.copied().unwrap_or(0xFF)
    }

    /// Writes to a register or RAM bank
    pub fn write_byte(&mut self, index: u16, value: u8) {
        match index {
            0x0000..=0x1FFF => self.ram_enabled = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                // Bank 0 can not be mapped into the upper window, so the chip selects bank 1
                self.rom_bank = std::cmp::max(value & 0x1F, 1);
                trace!("MBC1 switched to ROM bank {}", self.rom_bank);
            }
            0x4000..=0x5FFF => self.ram_bank = value & 0x03,
            0x6000..=0x7FFF => trace!("Ignoring MBC1 banking mode select: 0x{value:0>2X}"),
            0xA000..=0xBFFF => {
                if let Some(i) = self.ram_index(index) {
                    self.ram[i] = value;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MBC1;
    use crate::mem::mbc::RAM_BANK_SIZE;
    use crate::mem::mbc::ROM_BANK_SIZE;

    /// Builds a ROM where every byte holds the index of its bank.
    fn banked_rom(banks: usize) -> Vec<u8> {
        (0..banks)
            .flat_map(|i| std::iter::repeat(i as u8).take(ROM_BANK_SIZE))
            .collect()
    }

    #[test]
    fn switchable_rom_window() {
        let rom = banked_rom(8);
        let mut mbc = MBC1::new(0);
        assert_eq!(mbc.read_byte(&rom, 0x0000), 0);
        assert_eq!(mbc.read_byte(&rom, 0x3FFF), 0);
        assert_eq!(mbc.read_byte(&rom, 0x4000), 1);

        mbc.write_byte(0x2000, 3);
        assert_eq!(mbc.read_byte(&rom, 0x4000), rom[3 * ROM_BANK_SIZE]);
        assert_eq!(mbc.read_byte(&rom, 0x7FFF), 3);
        // Bank 0 is unaffected
        assert_eq!(mbc.read_byte(&rom, 0x3FFF), 0);

        // Only the lower 5 bits select the bank
        mbc.write_byte(0x3FFF, 0xE5);
        assert_eq!(mbc.rom_bank(), 5);
        assert_eq!(mbc.read_byte(&rom, 0x5000), 5);
    }

    #[test]
    fn zero_bank_selects_bank_one() {
        let rom = banked_rom(4);
        let mut mbc = MBC1::new(0);
        mbc.write_byte(0x2000, 2);
        mbc.write_byte(0x2000, 0);
        assert_eq!(mbc.rom_bank(), 1);
        assert_eq!(mbc.read_byte(&rom, 0x4000), 1);
        mbc.write_byte(0x2000, 0x20);
        assert_eq!(mbc.rom_bank(), 1);
    }

    #[test]
    fn missing_rom_bank_reads_high() {
        let rom = banked_rom(4);
        let mut mbc = MBC1::new(0);
        mbc.write_byte(0x2000, 0x1F);
        assert_eq!(mbc.read_byte(&rom, 0x4000), 0xFF);
    }

    #[test]
    fn ram_enable() {
        let rom = banked_rom(2);
        let mut mbc = MBC1::new(RAM_BANK_SIZE);
        assert!(!mbc.ram_enabled());
        mbc.write_byte(0xA000, 0x42);
        assert_eq!(mbc.read_byte(&rom, 0xA000), 0xFF);

        mbc.write_byte(0x0000, 0x0A);
        assert!(mbc.ram_enabled());
        mbc.write_byte(0xA000, 0x42);
        assert_eq!(mbc.read_byte(&rom, 0xA000), 0x42);

        // Only the low nibble matters
        mbc.write_byte(0x1FFF, 0xFA);
        assert!(mbc.ram_enabled());
        mbc.write_byte(0x1000, 0x0B);
        assert!(!mbc.ram_enabled());
        assert_eq!(mbc.read_byte(&rom, 0xA000), 0xFF);
        assert_eq!(mbc.ram()[0], 0x42);
    }

    #[test]
    fn ram_banks() {
        let rom = banked_rom(2);
        let mut mbc = MBC1::new(4 * RAM_BANK_SIZE);
        mbc.write_byte(0x0000, 0x0A);
        for bank in 0..4 {
            mbc.write_byte(0x4000, bank);
            mbc.write_byte(0xA123, bank + 0x10);
        }
        for bank in 0..4 {
            mbc.write_byte(0x5FFF, bank);
            assert_eq!(mbc.read_byte(&rom, 0xA123), bank + 0x10);
        }
        assert_eq!(mbc.ram()[3 * RAM_BANK_SIZE + 0x123], 0x13);
    }

    #[test]
    fn missing_ram_bank_reads_high() {
        let rom = banked_rom(2);
        let mut mbc = MBC1::new(RAM_BANK_SIZE);
        mbc.write_byte(0x0000, 0x0A);
        mbc.write_byte(0x4000, 2);
        mbc.write_byte(0xA000, 0x42);
        assert_eq!(mbc.read_byte(&rom, 0xA000), 0xFF);
        mbc.write_byte(0x4000, 0);
        assert_eq!(mbc.read_byte(&rom, 0xA000), 0);
    }
}
