mod mbc1;

pub use mbc1::*;

use serde::Deserialize;
use serde::Serialize;
use tracing::error;
use tracing::trace;

use crate::error::CartridgeError;
use crate::rom::CartridgeHeader;

/// The size of a ROM banks, 16 KiB.
pub const ROM_BANK_SIZE: usize = 16 * 1024;

/// The size of a RAM banks, 8 KiB.
pub const RAM_BANK_SIZE: usize = 8 * 1024;

/// The chip on the cartridge that decides which part of the cartridge the CPU sees. The ROM
/// itself is owned by the cartridge and is lent to the controller on every access.
#[derive(Debug, Hash, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryBankController {
    /// There is no external MBC. The game ROM is mapped into the 32 KiB that starts at 0x0000 and
    /// extends to 0x7FFF. An additional 8 KiB of RAM could be connected. This 8 KiB starts at
    /// 0xA000 and extends to 0xBFFF.
    ///
    /// See the [Pan Docs](https://gbdev.io/pandocs/nombc.html).
    Direct {
        /// Empty if the cartridge has no RAM.
        ram: Vec<u8>,
    },
    /// The first MBC chip. Supports switching the upper ROM window between 32 banks and selecting
    /// one of four RAM banks.
    ///
    /// See the [Pan Docs](https://gbdev.io/pandocs/MBC1.html).
    MBC1(MBC1),
}

impl MemoryBankController {
    /// Selects the controller from the cartridge type in the header.
    pub fn new(header: &CartridgeHeader) -> Result<Self, CartridgeError> {
        match header.cartridge_type() {
            0x00 => Ok(Self::Direct {
                ram: vec![0; header.ram_size()],
            }),
            // Plain, with RAM, and with battery-backed RAM. The battery makes no difference here.
            0x01..=0x03 => Ok(Self::MBC1(MBC1::new(header.ram_size()))),
            n => {
                error!("Unknown cartridge controller type: 0x{n:0>2X}");
                Err(CartridgeError::UnknownController(n))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MemoryBankController::Direct { .. } => "Direct",
            MemoryBankController::MBC1(_) => "MBC1",
        }
    }

    /// The cartridge RAM, i.e. the save data, across all banks.
    pub fn ram(&self) -> &[u8] {
        match self {
            MemoryBankController::Direct { ram } => ram,
            MemoryBankController::MBC1(controller) => controller.ram(),
        }
    }

    pub fn read_byte(&self, rom: &[u8], index: u16) -> u8 {
        match self {
            MemoryBankController::Direct { ram } => match index {
                0x0000..=0x7FFF => rom.get(index as usize).copied().unwrap_or_default(),
                0xA000..=0xBFFF => ram
                    .get((index - 0xA000) as usize)
                    .copied()
                    .unwrap_or_default(),
                _ => 0,
            },
            MemoryBankController::MBC1(controller) => controller.read_byte(rom, index),
        }
    }

    pub fn write_byte(&mut self, index: u16, value: u8) {
        match self {
            MemoryBankController::Direct { ram } => match index {
                0xA000..=0xBFFF => {
                    if let Some(byte) = ram.get_mut((index - 0xA000) as usize) {
                        *byte = value;
                    }
                }
                _ => trace!("Ignoring write of 0x{value:0>2X} to ROM @ 0x{index:0>4X}"),
            },
            MemoryBankController::MBC1(controller) => controller.write_byte(index, value),
        }
    }
}
