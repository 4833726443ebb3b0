//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! malformed parameter input, missing host capabilities, oversized raster requests,
//! missing stored presets, corrupt persisted data, encoding, IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("missing capability: {0}")]
    DependencyUnavailable(String),

    #[error("raster export {width}x{height} exceeds the {max} px limit without confirmation")]
    SizeLimitExceeded { width: u32, height: u32, max: u32 },

    #[error("preset '{name}' not found")]
    NotFound { name: String },

    #[error("corrupt persisted data: {0}")]
    Parse(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn size_limit_message_names_dimensions() {
        let err = Error::SizeLimitExceeded {
            width: 5000,
            height: 5000,
            max: 4000,
        };
        let msg = err.to_string();
        assert!(msg.contains("5000x5000"));
        assert!(msg.contains("4000"));
    }
}
