// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Errors are only produced while setting up the terminal, config or log, and when a
//! frame cannot be written. Drawing itself never fails: off-canvas geometry is clipped.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to query terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    #[error("failed to install handler for signal {signal}: {source}")]
    SignalHandler {
        signal: i32,
        #[source]
        source: io::Error,
    },

    #[error("cleanup registry is full ({0} callbacks)")]
    CleanupRegistryFull(usize),

    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("log setup failed: {0}")]
    Log(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;
