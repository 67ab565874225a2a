mod config;

pub use config::{
    CarouselSection, Config, FeedbackConfig, MonthPagerConfig, WeekPagerConfig, WindowConfig,
};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/fitplan[-dev]/` based on FITPLAN_ENV.
///
/// Set FITPLAN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FITPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fitplan-dev")
    } else {
        base_dir.join("fitplan")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
