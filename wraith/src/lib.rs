//! Wraith is the core of a Game Boy emulator. It contains the SM83 processor, the memory bus that
//! routes the processor's reads and writes, the cartridge controllers, and the interrupt plumbing.
//! Rendering, audio, and input are left to whoever wraps this crate; the bus only talks to the
//! video hardware through the [`VideoDevice`] trait.

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

pub mod cpu;
pub mod error;
pub mod instruction;
pub mod interrupt;
pub mod lookup;
pub mod mem;
pub mod rom;
pub mod trace;
pub(crate) mod utils;

pub use cpu::Cpu;
pub use error::Error;
pub use error::Result;
pub use interrupt::Interrupt;
pub use mem::ConsoleMode;
pub use mem::MemoryLike;
pub use mem::MemoryMap;
pub use mem::VRam;
pub use mem::VideoDevice;
pub use rom::Cartridge;
pub use trace::ProcessorContext;
pub use trace::TraceObserver;
pub use trace::TracingObserver;

/// This is the core emulation primitive. It contains the processor and everything it is wired to.
/// The `Gameboy` does not provide a `run` method. It must be ticked forward, which leaves pacing
/// and IO to its owner.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gameboy<V = VRam> {
    pub cpu: Cpu,
    pub mem: MemoryMap<V>,
}

impl Gameboy<VRam> {
    /// Loads the ROM image and puts the processor into its post-boot state.
    pub fn new(rom: Vec<u8>) -> Result<Self> {
        let cart = Cartridge::new(rom)?;
        Ok(Self::with_memory(MemoryMap::new(cart)))
    }
}

impl<V: VideoDevice> Gameboy<V> {
    /// Wraps an already constructed bus, e.g. one that uses a custom video device.
    pub fn with_memory(mem: MemoryMap<V>) -> Self {
        let mut cpu = Cpu::new();
        cpu.reset();
        Self { cpu, mem }
    }

    /// Puts the processor back into its post-boot state. Memory is left as is.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Runs the processor for (at least) the given amount of emulated time.
    pub fn tick(&mut self, elapsed: Duration, observer: &mut impl TraceObserver) -> Result<()> {
        self.cpu.tick(elapsed, &mut self.mem, observer)?;
        Ok(())
    }

    /// Executes a single instruction (or services an interrupt). Returns the cycles it took.
    pub fn step(&mut self, observer: &mut impl TraceObserver) -> Result<u8> {
        Ok(self.cpu.step(&mut self.mem, observer)?)
    }

    pub fn request_interrupt(&mut self, int: Interrupt) {
        self.mem.request_interrupt(int)
    }
}
