use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use chip8_core::constants::CLOCK_SPEED;

/// Run a Chip-8 program in a window.
#[derive(Debug, Parser)]
#[command(name = "chip8", version)]
pub struct Config {
    /// Path to the program image
    pub rom: PathBuf,

    /// Window pixels per Chip-8 pixel
    #[arg(short, long, default_value_t = 10)]
    pub scale: u32,

    /// Milliseconds between cycles [default: the Chip-8 clock speed]
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Seed for the random number instruction, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    /// Time to wait between cycles.
    pub fn cycle_time(&self) -> Duration {
        match self.delay {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_nanos(CLOCK_SPEED),
        }
    }
}
