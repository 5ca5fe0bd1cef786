//! Wisp drives the wraith core without any screen or input. It loads a ROM, then ticks the
//! machine forward one frame's worth of emulated time at a time.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use tracing::info;
use wraith::Gameboy;
use wraith::TracingObserver;

pub mod config;

use config::Config;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Core(#[from] wraith::Error),
}

/// What a completed run got through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub cycles: u64,
}

/// Loads the configured ROM and runs it for the configured number of frames.
pub fn run(config: &Config) -> Result<RunSummary, RunError> {
    let rom = std::fs::read(&config.rom).map_err(|source| RunError::Io {
        path: config.rom.clone(),
        source,
    })?;
    let mut gb = Gameboy::new(rom)?;
    run_frames(&mut gb, config)
}

/// Ticks the machine one frame at a time. Stops at the first error.
pub fn run_frames(gb: &mut Gameboy, config: &Config) -> Result<RunSummary, RunError> {
    let frame = config.frame_duration();
    info!(
        "Running {} frames at {} fps ({frame:?} per frame)",
        config.frames, config.fps
    );
    for n in 0..config.frames {
        if config.trace {
            gb.tick(frame, &mut TracingObserver)?;
        } else {
            gb.tick(frame, &mut ())?;
        }
        debug!("Finished frame {n}: {}", gb.cpu.context());
    }
    let summary = RunSummary {
        frames: config.frames,
        cycles: gb.cpu.cycles,
    };
    info!("Ran {} frames in {} cycles", summary.frames, summary.cycles);
    Ok(summary)
}
