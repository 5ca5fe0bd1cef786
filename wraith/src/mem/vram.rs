use serde::Deserialize;
use serde::Serialize;
use serde_with::serde_as;

/// The size of one bank of video RAM, 8 KiB.
pub const VRAM_BANK_SIZE: usize = 0x2000;

/// The size of the Object Attribute Map.
pub const OAM_SIZE: usize = 0xA0;

/// The video hardware as seen from the memory bus. Rendering is not the bus's concern; it only
/// needs to route reads and writes into video memory, read back the current scanline, and hand
/// over the sprite data copied by an OAM DMA.
pub trait VideoDevice {
    /// Reads from the currently selected VRAM bank. The address is in the 0x8000..=0x9FFF range.
    fn read_vram(&self, addr: u16) -> u8;

    /// Writes to the currently selected VRAM bank. The address is in the 0x8000..=0x9FFF range.
    fn write_vram(&mut self, addr: u16, val: u8);

    /// The scanline that is currently being drawn (the LY register).
    fn read_scanline(&self) -> u8;

    /// Replaces the entire contents of the OAM.
    fn write_oam(&mut self, data: [u8; OAM_SIZE]);

    fn switch_vram_bank(&mut self, bank: u8);
}

/// The default video device. It holds the video memory and OAM but does not draw anything. The
/// scanline only changes when set by its owner.
#[serde_as]
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct VRam {
    /// The main video RAM. Accessible through the address range 0x8000 through 0x9FFF.
    #[serde(serialize_with = "crate::utils::serialize_slices_as_one")]
    #[serde(deserialize_with = "crate::utils::deserialize_slices_as_one")]
    vram: [[u8; VRAM_BANK_SIZE]; 2],
    /// The Object Attribute Map. Normally accessible through the address range 0xFE00 through
    /// 0xFE9F.
    #[serde_as(as = "serde_with::Bytes")]
    oam: [u8; OAM_SIZE],
    bank: u8,
    lcd_y: u8,
}

impl Default for VRam {
    fn default() -> Self {
        Self::new()
    }
}

impl VRam {
    pub fn new() -> Self {
        Self {
            vram: [[0; VRAM_BANK_SIZE]; 2],
            oam: [0; OAM_SIZE],
            bank: 0,
            lcd_y: 0,
        }
    }

    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    pub fn bank(&self) -> u8 {
        self.bank
    }

    pub fn set_scanline(&mut self, lcd_y: u8) {
        self.lcd_y = lcd_y;
    }

    fn index(addr: u16) -> usize {
        addr as usize & (VRAM_BANK_SIZE - 1)
    }
}

impl VideoDevice for VRam {
    fn read_vram(&self, addr: u16) -> u8 {
        self.vram[self.bank as usize][Self::index(addr)]
    }

    fn write_vram(&mut self, addr: u16, val: u8) {
        self.vram[self.bank as usize][Self::index(addr)] = val;
    }

    fn read_scanline(&self) -> u8 {
        self.lcd_y
    }

    fn write_oam(&mut self, data: [u8; OAM_SIZE]) {
        self.oam = data;
    }

    fn switch_vram_bank(&mut self, bank: u8) {
        self.bank = bank & 0x1;
    }
}

#[cfg(test)]
mod tests {
    use super::VRam;
    use super::VideoDevice;

    #[test]
    fn banks_are_independent() {
        let mut vram = VRam::new();
        vram.write_vram(0x8010, 0xAB);
        vram.switch_vram_bank(1);
        assert_eq!(vram.read_vram(0x8010), 0);
        vram.write_vram(0x8010, 0xCD);
        vram.switch_vram_bank(0);
        assert_eq!(vram.read_vram(0x8010), 0xAB);
        // Only the lowest bit selects the bank
        vram.switch_vram_bank(3);
        assert_eq!(vram.bank(), 1);
        assert_eq!(vram.read_vram(0x9FFF - 0x1FEF), 0xCD);
    }

    #[test]
    fn oam_is_replaced() {
        let mut vram = VRam::new();
        let mut data = [0; super::OAM_SIZE];
        data.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);
        vram.write_oam(data);
        assert_eq!(vram.oam(), &data);
        vram.write_oam([0xFF; super::OAM_SIZE]);
        assert!(vram.oam().iter().all(|b| *b == 0xFF));
    }
}
