//! Crate-level error types.

use thiserror::Error;

/// Errors produced while building the scene or evaluating its geometry.
#[derive(Debug, Error)]
pub enum DecalError {
    /// A scene or placement configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// The geometry cannot produce a meaningful answer for this input.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    /// Texture dimensions or pixel data do not describe a valid image.
    #[error("invalid texture: {0}")]
    InvalidTexture(String),
    /// TOML config parsing failure.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DecalError> = std::result::Result<T, E>;
