use serde::Deserialize;
use serde::Serialize;
use serde_with::serde_as;
use tracing::debug;
use tracing::trace;

use crate::interrupt::Interrupt;
use crate::interrupt::InterruptRegister;
use crate::interrupt::InterruptRegisters;
use crate::rom::Cartridge;

pub mod mbc;
pub mod vram;

pub use mbc::MemoryBankController;
pub use vram::VRam;
pub use vram::VideoDevice;
use vram::OAM_SIZE;

/// The size of a bank of working RAM, 4 KiB.
pub const WRAM_BANK_SIZE: usize = 0x1000;

/// This trait is used to abstract over the memory map. This is used during testing.
pub trait MemoryLike {
    fn read_byte(&self, addr: u16) -> u8;

    fn write_byte(&mut self, addr: u16, val: u8);

    /// Reads two bytes, the low byte from `addr` and the high byte from the address after it.
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read_byte(addr), self.read_byte(addr.wrapping_add(1))])
    }

    /// Writes two bytes, the low byte to `addr` and the high byte to the address after it.
    fn write_word(&mut self, addr: u16, val: u16) {
        let [lo, hi] = val.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }

    /// The interrupts that are both enabled and requested.
    fn pending_interrupts(&self) -> u8 {
        self.read_byte(0xFFFF) & self.read_byte(0xFF0F) & 0x1F
    }

    fn clear_interrupt_req(&mut self, int: Interrupt) {
        let pending = self.read_byte(0xFF0F);
        self.write_byte(0xFF0F, pending & !int.mask());
    }
}

/// The `impl FnOnce` in `update_byte` would make `MemoryLike` non-object safe.
pub trait MemoryLikeExt: MemoryLike {
    fn update_byte(&mut self, addr: u16, op: impl FnOnce(&mut u8)) -> u8 {
        let mut val = self.read_byte(addr);
        op(&mut val);
        self.write_byte(addr, val);
        val
    }
}

/// Which model of the console is being emulated. This decides what bank switching is available.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
pub enum ConsoleMode {
    /// The original model. Has a single switchable WRAM bank and a single VRAM bank.
    #[default]
    Dmg,
    /// The colour model. Has seven switchable WRAM banks and two VRAM banks.
    Cgb,
}

impl ConsoleMode {
    pub fn from_cartridge(cart: &Cartridge) -> Self {
        if cart.header().supports_color() {
            Self::Cgb
        } else {
            Self::Dmg
        }
    }
}

/// The memory bus. Every address the CPU reads from or writes to is routed through here to the
/// cartridge, the video device, the working and high RAM, or the interrupt registers.
#[serde_as]
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMap<V = VRam> {
    cart: Cartridge,
    /// The video RAM and Object attribute map
    pub video: V,
    mode: ConsoleMode,
    /// The working RAM. Bank 0 is always mapped to 0xC000. One of the others is mapped to 0xD000.
    #[serde(serialize_with = "crate::utils::serialize_slices_as_one")]
    #[serde(deserialize_with = "crate::utils::deserialize_slices_as_one")]
    wram: [[u8; WRAM_BANK_SIZE]; 8],
    /// ADDR FF70. Always between 1 and 7.
    wram_bank: u8,
    /// ADDR FF4F
    vram_bank: u8,
    // High RAM
    #[serde_as(as = "serde_with::Bytes")]
    hr: [u8; 0x7F],
    /// The interrupt enable (0xFFFF) and request (0xFF0F) registers.
    ///  - Bit 0 corresponds to the VBlank interrupt
    ///  - Bit 1 corresponds to the LCD interrupt
    ///  - Bit 2 corresponds to the timer interrupt
    ///  - Bit 3 corresponds to the serial interrupt
    ///  - Bit 4 corresponds to the joypad interrupt
    interrupts: InterruptRegisters,
}

impl MemoryMap<VRam> {
    /// Constructs a bus around the given cartridge using the default video device. The console
    /// mode is taken from the cartridge header.
    pub fn new(cart: Cartridge) -> Self {
        let mode = ConsoleMode::from_cartridge(&cart);
        Self::with_video(cart, VRam::new(), mode)
    }
}

impl<V: VideoDevice> MemoryMap<V> {
    pub fn with_video(cart: Cartridge, video: V, mode: ConsoleMode) -> Self {
        Self {
            cart,
            video,
            mode,
            wram: [[0; WRAM_BANK_SIZE]; 8],
            wram_bank: 1,
            vram_bank: 0,
            hr: [0; 0x7F],
            interrupts: InterruptRegisters::new(),
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cart
    }

    pub fn mode(&self) -> ConsoleMode {
        self.mode
    }

    pub fn wram_bank(&self) -> u8 {
        self.wram_bank
    }

    pub fn interrupts(&self) -> &InterruptRegisters {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptRegisters {
        &mut self.interrupts
    }

    /// Called by devices to raise an interrupt. This sets the interrupt's pending bit.
    pub fn request_interrupt(&mut self, int: Interrupt) {
        self.interrupts.request(int);
    }

    /// Copies 160 bytes, starting at `src << 8`, into the OAM. The source is read through the bus,
    /// so any mapped region can be copied from.
    fn oam_dma(&mut self, src: u8) {
        let base = u16::from_be_bytes([src, 0x00]);
        debug!("OAM DMA triggered from 0x{base:0>4X}");
        let mut data = [0; OAM_SIZE];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.read_byte(base.wrapping_add(i as u16));
        }
        self.video.write_oam(data);
    }

    fn switch_wram_bank(&mut self, val: u8) {
        self.wram_bank = std::cmp::max(val & 0x07, 1);
        debug!("Switched to WRAM bank {}", self.wram_bank);
    }

    fn switch_vram_bank(&mut self, val: u8) {
        self.vram_bank = val & 0x01;
        debug!("Switched to VRAM bank {}", self.vram_bank);
        self.video.switch_vram_bank(self.vram_bank);
    }
}

impl<V: VideoDevice> MemoryLike for MemoryMap<V> {
    fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            n @ (0x0000..=0x7FFF | 0xA000..=0xBFFF) => self.cart.read_byte(n),
            n @ 0x8000..=0x9FFF => self.video.read_vram(n),
            n @ 0xC000..=0xCFFF => self.wram[0][(n - 0xC000) as usize],
            n @ 0xD000..=0xDFFF => self.wram[self.wram_bank as usize][(n - 0xD000) as usize],
            // The upper three bits are not wired and always read as set
            0xFF0F => 0xE0 | self.interrupts.pending.bits(),
            0xFF44 => self.video.read_scanline(),
            0xFF4F if self.mode.is_cgb() => 0xFE | self.vram_bank,
            0xFF70 if self.mode.is_cgb() => 0xF8 | self.wram_bank,
            n @ 0xFF80..=0xFFFE => self.hr[(n - 0xFF80) as usize],
            0xFFFF => self.interrupts.enable.bits(),
            n => {
                trace!("Read from unmapped address 0x{n:0>4X}");
                0
            }
        }
    }

    fn write_byte(&mut self, addr: u16, val: u8) {
        match addr {
            n @ (0x0000..=0x7FFF | 0xA000..=0xBFFF) => self.cart.write_byte(n, val),
            n @ 0x8000..=0x9FFF => self.video.write_vram(n, val),
            n @ 0xC000..=0xCFFF => self.wram[0][(n - 0xC000) as usize] = val,
            n @ 0xD000..=0xDFFF => {
                self.wram[self.wram_bank as usize][(n - 0xD000) as usize] = val
            }
            0xFF0F => self.interrupts.pending = InterruptRegister::from_bits(val),
            0xFF46 => self.oam_dma(val),
            0xFF4F if self.mode.is_cgb() => self.switch_vram_bank(val),
            0xFF70 if self.mode.is_cgb() => self.switch_wram_bank(val),
            n @ 0xFF80..=0xFFFE => self.hr[(n - 0xFF80) as usize] = val,
            0xFFFF => self.interrupts.enable = InterruptRegister::from_bits(val),
            n => trace!("Ignoring write of 0x{val:0>2X} to 0x{n:0>4X}"),
        }
    }

    fn pending_interrupts(&self) -> u8 {
        self.interrupts.active()
    }

    fn clear_interrupt_req(&mut self, int: Interrupt) {
        self.interrupts.acknowledge(int);
    }
}

impl<V: VideoDevice> MemoryLikeExt for MemoryMap<V> {}

/// A flat 64 KiB address space. Handy for running instructions without a cartridge.
#[cfg(test)]
impl MemoryLike for Vec<u8> {
    fn read_byte(&self, addr: u16) -> u8 {
        self.get(addr as usize).copied().unwrap_or_default()
    }

    fn write_byte(&mut self, addr: u16, val: u8) {
        if let Some(byte) = self.get_mut(addr as usize) {
            *byte = val;
        }
    }
}

#[cfg(test)]
impl MemoryLikeExt for Vec<u8> {}
