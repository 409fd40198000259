// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Log module provides the file logger, reference
//! https://docs.rs/log4rs
//!
//! stdout is the render surface, so log records always go to a file.

use crate::error::{RasterError, Result};
use log::LevelFilter;

#[cfg(feature = "log4rs")]
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// init logs system
#[cfg(feature = "log4rs")]
pub fn init_log(level: LevelFilter, file_path: &str) -> Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(file_path)
        .map_err(|e| RasterError::Log(format!("{}: {}", file_path, e)))?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| RasterError::Log(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| RasterError::Log(e.to_string()))?;
    Ok(())
}

/// without log4rs there is no logger to install, records are dropped by the facade
#[cfg(not(feature = "log4rs"))]
pub fn init_log(level: LevelFilter, file_path: &str) -> Result<()> {
    if file_path.is_empty() {
        return Err(RasterError::Log("empty log file path".to_string()));
    }
    log::set_max_level(level);
    Ok(())
}
