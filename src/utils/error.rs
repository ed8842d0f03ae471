use thiserror::Error;

/// Result type returned by fallible world routines.
pub type WorldResult<T> = Result<T, WorldError>;

/// Error encountered while constructing a world.
///
/// Once a [`crate::World`] exists, nothing it does can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimension { width: i64, height: i64 },
    #[error("unknown initialization mode: {0:?}")]
    InvalidMode(String),
    #[error("unknown topology: {0:?}")]
    InvalidTopology(String),
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}
