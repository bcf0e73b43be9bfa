//! Error types for the simulation engine.
//!
//! The simulation math itself never fails: degenerate parameters are clamped
//! inside the systems. Errors only arise at the edges, when a configuration is
//! loaded or a parameter is set by name.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parameter name not recognised by `Parameters::set`
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// NaN or infinite parameter value
    #[error("Parameter {name} must be finite, got {value}")]
    NonFiniteParameter { name: String, value: f64 },

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
