use serde::Deserialize;
use serde::Serialize;

/// The five interrupt sources. The discriminant is the source's bit in both the enable (0xFFFF)
/// and the pending (0xFF0F) registers. Lower bits have higher priority.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display, Serialize, Deserialize,
)]
#[display("{_variant}")]
#[repr(u8)]
pub enum Interrupt {
    #[display("VBlank")]
    VBlank = 0,
    #[display("LCD")]
    LcdStat = 1,
    #[display("Timer")]
    Timer = 2,
    #[display("Serial")]
    Serial = 3,
    #[display("Joypad")]
    Joypad = 4,
}

impl Interrupt {
    /// Every source, ordered from highest to lowest priority.
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    /// The address the CPU jumps to when servicing this interrupt.
    pub const fn vector(self) -> u16 {
        0x0040 + 8 * self as u16
    }

    /// Selects the highest priority source that is set in the given mask.
    pub fn highest_priority(mask: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|int| mask & int.mask() != 0)
    }
}

/// A single 5-bit interrupt register.
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display, Serialize, Deserialize,
)]
#[display("0b{_0:0>5b}")]
pub struct InterruptRegister(u8);

impl InterruptRegister {
    const MASK: u8 = 0x1F;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn get(&self, int: Interrupt) -> bool {
        self.0 & int.mask() != 0
    }

    pub fn set(&mut self, int: Interrupt, val: bool) {
        if val {
            self.0 |= int.mask();
        } else {
            self.0 &= !int.mask();
        }
    }

    /// Zeroes the register, masking every source off.
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// The interrupt controller. The enable register is written by running code through the bus,
/// while devices raise requests by setting bits in the pending register.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptRegisters {
    /// Bus-mapped at 0xFFFF.
    pub enable: InterruptRegister,
    /// Bus-mapped at 0xFF0F.
    pub pending: InterruptRegister,
}

impl InterruptRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, int: Interrupt) {
        self.pending.set(int, true);
    }

    pub fn acknowledge(&mut self, int: Interrupt) {
        self.pending.set(int, false);
    }

    /// The sources that are both requested and enabled.
    pub fn active(&self) -> u8 {
        self.enable.bits() & self.pending.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::Interrupt;
    use super::InterruptRegister;
    use super::InterruptRegisters;

    #[test]
    fn vectors_and_masks() {
        let vectors: Vec<_> = Interrupt::ALL.iter().map(|int| int.vector()).collect();
        assert_eq!(vectors, [0x40, 0x48, 0x50, 0x58, 0x60]);
        let masks: Vec<_> = Interrupt::ALL.iter().map(|int| int.mask()).collect();
        assert_eq!(masks, [0x01, 0x02, 0x04, 0x08, 0x10]);
    }

    #[test]
    fn priority_favors_low_bits() {
        assert_eq!(Interrupt::highest_priority(0), None);
        assert_eq!(Interrupt::highest_priority(0x1F), Some(Interrupt::VBlank));
        assert_eq!(Interrupt::highest_priority(0x14), Some(Interrupt::Timer));
        assert_eq!(Interrupt::highest_priority(0x10), Some(Interrupt::Joypad));
        // Bits above the fifth have no source
        assert_eq!(Interrupt::highest_priority(0xE0), None);
    }

    #[test]
    fn register_get_set_clear() {
        let mut reg = InterruptRegister::default();
        for int in Interrupt::ALL {
            assert!(!reg.get(int));
            reg.set(int, true);
            assert!(reg.get(int));
        }
        assert_eq!(reg.bits(), 0x1F);
        reg.set(Interrupt::Serial, false);
        assert_eq!(reg.bits(), 0x17);
        reg.clear();
        assert_eq!(reg.bits(), 0);
        assert_eq!(InterruptRegister::from_bits(0xFF).bits(), 0x1F);
    }

    // The request entry point sets the pending bit rather than only testing it.
    #[test]
    fn request_sets_pending_bit() {
        let mut regs = InterruptRegisters::new();
        regs.request(Interrupt::Timer);
        assert!(regs.pending.get(Interrupt::Timer));
        assert_eq!(regs.active(), 0);
        regs.enable.set(Interrupt::Timer, true);
        assert_eq!(regs.active(), Interrupt::Timer.mask());
        regs.acknowledge(Interrupt::Timer);
        assert_eq!(regs.active(), 0);
    }
}
