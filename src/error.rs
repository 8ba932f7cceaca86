//! Error type for scenario construction and loading
//!
//! Everything here is a configuration error: once a `Scenario` has been built
//! nothing in a tick can fail. Degenerate geometry met during a tick is skipped,
//! never reported through this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid body: {0}")]
    InvalidBody(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("scenario of kind `wire` needs a `wire` section")]
    MissingWire,

    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
