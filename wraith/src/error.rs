use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every fatal condition the core can run into. None of these are recoverable: once returned, the
/// machine that produced it should not be ticked again.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
    #[error(transparent)]
    Cpu(#[from] CpuError),
}

/// Problems found while loading a cartridge image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartridgeError {
    #[error("truncated image: {len} bytes were given but at least {needed} are required")]
    Truncated { len: usize, needed: usize },
    #[error("unknown cartridge controller type: 0x{0:0>2X}")]
    UnknownController(u8),
    #[error("unknown ROM size code: 0x{0:0>2X}")]
    UnknownRomSize(u8),
    #[error("unknown RAM size code: 0x{0:0>2X}")]
    UnknownRamSize(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error("op code '0x{opcode:0>2X}' @ 0x{pc:0>4X} does not correspond to any valid operation")]
    UnknownOpcode { opcode: u8, pc: u16 },
}
