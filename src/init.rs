// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Runtime configuration.
//!
//! A `RasterConfig` is read from a TOML file (all keys optional):
//!
//! ```toml
//! render_mode = "braille"   # braille | block | quarter | ascii
//! frame_rate = 30
//! reserve_rows = 1          # rows kept free below a fullscreen canvas
//! log_level = "info"
//! log_file = "log/term_raster.log"
//! ```
//!
//! and stored once per process with [`init_raster_config`].

use crate::{
    error::{RasterError, Result},
    render::glyph::RenderMode,
    DEFAULT_FRAME_RATE,
};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr, sync::OnceLock, time::Duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub render_mode: RenderMode,
    pub frame_rate: u32,
    pub reserve_rows: u16,
    pub log_level: String,
    pub log_file: String,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Braille,
            frame_rate: DEFAULT_FRAME_RATE,
            reserve_rows: 1,
            log_level: "info".to_string(),
            log_file: format!("log{}term_raster.log", std::path::MAIN_SEPARATOR),
        }
    }
}

impl RasterConfig {
    pub fn from_toml_str(path: &str, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| RasterError::Config {
            path: path.to_string(),
            source,
        })
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Time budget of one frame; a zero frame rate is treated as 1 fps.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.frame_rate.max(1) as u64)
    }
}

/// Read and parse a config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RasterConfig> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| RasterError::ConfigRead {
        path: display.clone(),
        source,
    })?;
    RasterConfig::from_toml_str(&display, &text)
}

/// Global config - initialized once at startup
pub static RASTER_CONFIG: OnceLock<RasterConfig> = OnceLock::new();

/// Store the process-wide config. Later calls are ignored.
pub fn init_raster_config(config: RasterConfig) {
    let _ = RASTER_CONFIG.set(config);
}

/// Get the process-wide config, or the defaults if it was never initialized.
pub fn get_raster_config() -> &'static RasterConfig {
    RASTER_CONFIG.get_or_init(RasterConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = RasterConfig::from_toml_str("inline", "render_mode = \"quarter\"\nframe_rate = 60\n")
            .unwrap();
        assert_eq!(cfg.render_mode, RenderMode::Quarter);
        assert_eq!(cfg.frame_rate, 60);
        assert_eq!(cfg.reserve_rows, 1);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn bad_mode_is_a_config_error() {
        let err = RasterConfig::from_toml_str("inline", "render_mode = \"sixel\"").unwrap_err();
        assert!(matches!(err, RasterError::Config { .. }));
    }

    #[test]
    fn level_and_frame_duration() {
        let mut cfg = RasterConfig::default();
        cfg.log_level = "debug".to_string();
        assert_eq!(cfg.level_filter(), LevelFilter::Debug);
        cfg.log_level = "loud".to_string();
        assert_eq!(cfg.level_filter(), LevelFilter::Info);

        cfg.frame_rate = 50;
        assert_eq!(cfg.frame_duration(), Duration::from_millis(20));
        cfg.frame_rate = 0;
        assert_eq!(cfg.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render_mode = \"ascii\"\nreserve_rows = 2").unwrap();
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.render_mode, RenderMode::Ascii);
        assert_eq!(cfg.reserve_rows, 2);

        let missing = load_config("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, RasterError::ConfigRead { .. }));
    }
}
