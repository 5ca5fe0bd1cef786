//! The runner's configuration. Everything can be given on the command line, and most of it can
//! also be read from a TOML file. Command-line values win.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use serde::Serialize;

use crate::RunError;

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_FRAMES: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Parser)]
#[command(version, about = "Runs a Game Boy ROM without a screen")]
pub struct Args {
    /// The ROM image to run.
    pub rom: PathBuf,
    /// How many frames are emulated per second. Clamped to 20..=60.
    #[arg(long)]
    pub fps: Option<u32>,
    /// How many frames to run before exiting.
    #[arg(long)]
    pub frames: Option<u64>,
    /// Log a trace line for every executed instruction.
    #[arg(long)]
    pub trace: bool,
    /// A TOML file with default values for the other options.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub fps: Option<u32>,
    pub frames: Option<u64>,
    pub trace: Option<bool>,
    /// A `tracing` filter directive, e.g. `debug` or `wraith=trace`.
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn read(path: PathBuf) -> Result<Self, RunError> {
        let data = std::fs::read_to_string(&path).map_err(|source| RunError::Io { path, source })?;
        Ok(toml::from_str(&data)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rom: PathBuf,
    pub fps: u32,
    pub frames: u64,
    pub trace: bool,
    pub log_level: String,
}

impl Config {
    /// Reads the config file (if one was given) and merges it with the arguments.
    pub fn load(mut args: Args) -> Result<Self, RunError> {
        let file = match args.config.take() {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    pub fn merge(args: Args, file: FileConfig) -> Self {
        let fps = args.fps.or(file.fps).unwrap_or(DEFAULT_FPS).clamp(20, 60);
        Self {
            rom: args.rom,
            fps,
            frames: args.frames.or(file.frames).unwrap_or(DEFAULT_FRAMES),
            trace: args.trace || file.trace.unwrap_or_default(),
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        }
    }

    /// The amount of emulated time in each frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}
