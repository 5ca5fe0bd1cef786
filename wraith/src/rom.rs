use serde::Deserialize;
use serde::Serialize;
use serde_with::serde_as;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::error::CartridgeError;
use crate::mem::mbc::MemoryBankController;
use crate::mem::mbc::RAM_BANK_SIZE;
use crate::mem::mbc::ROM_BANK_SIZE;

/// This struct represents the parts of the cartridge header that the emulator cares about. Per the
/// Pan Docs, the header of the ROM occupies the region between `0x100` and `0x14F`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartridgeHeader {
    /// The memory region between `0x134` and `0x13E`. If the title is shorter than 11 characters,
    /// the rest of the array is zero-padded.
    title: [u8; 11],
    /// The memory region between `0x13F` and `0x142`.
    manufacturer: [u8; 4],
    /// The byte at `0x143`.
    cgb_flag: u8,
    /// The byte at `0x147`. Selects the memory bank controller.
    cartridge_type: u8,
    /// The byte at `0x148`. Communicates the length of the ROM as `32 KiB << rom_size_code`.
    rom_size_code: u8,
    /// The byte at `0x149`.
    ram_size_code: u8,
    /// The byte at `0x14D`. On start, the header is checksummed. The check spans the bytes
    /// `0x134..0x14D`.
    header_checksum: u8,
    /// The checksum computed from the image itself.
    computed_checksum: u8,
}

impl CartridgeHeader {
    pub const START_ADDR: usize = 0x100;
    pub const END_ADDR: usize = 0x14F;
    pub const LENGTH: usize = Self::END_ADDR - Self::START_ADDR + 1;

    pub fn extract_from_rom(rom: &[u8]) -> Result<Self, CartridgeError> {
        let Some(header) = rom.get(..=Self::END_ADDR) else {
            error!("ROM of {} bytes is too short to contain a header", rom.len());
            return Err(CartridgeError::Truncated {
                len: rom.len(),
                needed: Self::END_ADDR + 1,
            });
        };
        let mut title = [0; 11];
        title.copy_from_slice(&header[0x134..0x13F]);
        let mut manufacturer = [0; 4];
        manufacturer.copy_from_slice(&header[0x13F..0x143]);
        let digest = Self {
            title,
            manufacturer,
            cgb_flag: header[0x143],
            cartridge_type: header[0x147],
            rom_size_code: header[0x148],
            ram_size_code: header[0x149],
            header_checksum: header[0x14D],
            computed_checksum: checksum(&header[0x134..0x14D]),
        };
        // Validate the size codes up front
        digest.rom_size_checked()?;
        digest.ram_size_checked()?;
        Ok(digest)
    }

    /// The title with its zero-padding removed.
    pub fn title(&self) -> String {
        self.title
            .iter()
            .take_while(|b| **b != 0)
            .map(|b| *b as char)
            .collect()
    }

    pub fn manufacturer(&self) -> String {
        self.manufacturer
            .iter()
            .take_while(|b| **b != 0)
            .map(|b| *b as char)
            .collect()
    }

    /// True if the cartridge works on both the original and the colour models (0x80) or only on
    /// the colour model (0xC0).
    pub fn supports_color(&self) -> bool {
        matches!(self.cgb_flag, 0x80 | 0xC0)
    }

    pub fn cgb_only(&self) -> bool {
        self.cgb_flag == 0xC0
    }

    pub fn cartridge_type(&self) -> u8 {
        self.cartridge_type
    }

    /// The number of bytes of ROM the cartridge declares.
    pub fn rom_size(&self) -> usize {
        self.rom_size_checked().unwrap_or_default()
    }

    /// The number of bytes of external RAM the cartridge declares.
    pub fn ram_size(&self) -> usize {
        self.ram_size_checked().unwrap_or_default()
    }

    fn rom_size_checked(&self) -> Result<usize, CartridgeError> {
        match self.rom_size_code {
            n @ 0x00..=0x08 => Ok((2 * ROM_BANK_SIZE) << n),
            n => {
                error!("Unknown ROM size code: 0x{n:0>2X}");
                Err(CartridgeError::UnknownRomSize(n))
            }
        }
    }

    fn ram_size_checked(&self) -> Result<usize, CartridgeError> {
        let banks = match self.ram_size_code {
            0x00 | 0x01 => 0,
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            n => {
                error!("Unknown RAM size code: 0x{n:0>2X}");
                return Err(CartridgeError::UnknownRamSize(n));
            }
        };
        Ok(banks * RAM_BANK_SIZE)
    }

    pub fn header_checksum(&self) -> u8 {
        self.header_checksum
    }

    /// Returns true if the header checksum matches the one computed from the image.
    pub fn checksum_matches(&self) -> bool {
        let digest = self.header_checksum == self.computed_checksum;
        if !digest {
            warn!(
                "Header checksum mismatch: header says 0x{:0>2X}, image computes 0x{:0>2X}",
                self.header_checksum, self.computed_checksum
            );
        }
        digest
    }
}

/// Computes the header checksum over the given bytes.
pub fn checksum(slice: &[u8]) -> u8 {
    slice
        .iter()
        .fold(0u8, |acc, b| acc.wrapping_sub(*b).wrapping_sub(1))
}

/// A loaded cartridge: the parsed header, the raw ROM, and the controller that maps the ROM (and
/// any RAM) into the address space.
#[serde_as]
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cartridge {
    header: CartridgeHeader,
    #[serde_as(as = "serde_with::Bytes")]
    rom: Vec<u8>,
    mbc: MemoryBankController,
}

impl Cartridge {
    pub fn new(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::extract_from_rom(&rom)?;
        if rom.len() < header.rom_size() {
            error!(
                "ROM declares {} bytes but only {} were given",
                header.rom_size(),
                rom.len()
            );
            return Err(CartridgeError::Truncated {
                len: rom.len(),
                needed: header.rom_size(),
            });
        }
        let mbc = MemoryBankController::new(&header)?;
        info!(
            "Loaded \"{}\" with a {} controller, {} ROM banks and {} RAM banks",
            header.title(),
            mbc.name(),
            header.rom_size() / ROM_BANK_SIZE,
            header.ram_size() / RAM_BANK_SIZE,
        );
        header.checksum_matches();
        Ok(Self { header, rom, mbc })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn mbc(&self) -> &MemoryBankController {
        &self.mbc
    }

    pub fn read_byte(&self, index: u16) -> u8 {
        self.mbc.read_byte(&self.rom, index)
    }

    pub fn write_byte(&mut self, index: u16, value: u8) {
        self.mbc.write_byte(index, value)
    }
}
