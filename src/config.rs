use clap::Parser;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::game::{Rules, DEFAULT_GOAL, DEFAULT_GRACE_PERIOD_MS, DEFAULT_UTC_OFFSET_HOURS};

/// Red light / green light game server
#[derive(Parser, Debug, Clone)]
#[command(name = "red_light_server", version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "RLGL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory with index.html, admin.html and other static assets
    #[arg(long, env = "RLGL_STATIC_DIR", default_value = "./public")]
    pub static_dir: PathBuf,

    /// Taps needed to cross the finish line
    #[arg(long, env = "RLGL_GOAL_CLICKS", default_value_t = DEFAULT_GOAL,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub goal: u32,

    /// Milliseconds after a light change during which a red-light tap is forgiven
    #[arg(long, env = "RLGL_GRACE_PERIOD_MS", default_value_t = DEFAULT_GRACE_PERIOD_MS)]
    pub grace_period_ms: u64,

    /// UTC offset, in hours, used for finish times
    #[arg(long, env = "RLGL_UTC_OFFSET_HOURS", default_value_t = DEFAULT_UTC_OFFSET_HOURS,
          allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-23..=23))]
    pub utc_offset_hours: i32,
}

impl Config {
    pub fn rules(&self) -> Result<Rules, ConfigError> {
        Rules::new(self.goal, self.grace_period_ms, self.utc_offset_hours)
    }
}
