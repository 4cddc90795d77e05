//! Error types for textfx.

use std::fmt;
use std::io;
use std::time::Duration;

use crate::diff::DiffKind;

/// Result type alias for textfx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textfx operations.
///
/// The diff engine and the per-tick scheduler update never produce errors;
/// these variants cover configuration checks, consistency validation and
/// terminal output.
#[derive(Debug)]
pub enum Error {
    /// I/O error while writing a frame.
    Io(io::Error),
    /// Layout box or frame buffer with a zero dimension.
    InvalidDimensions { width: u32, height: u32 },
    /// Animation duration that cannot drive progress (zero).
    InvalidDuration(Duration),
    /// A diff op references a cluster outside its sequence.
    OpOutOfBounds {
        kind: DiffKind,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::InvalidDuration(d) => {
                write!(f, "invalid animation duration: {}ms", d.as_millis())
            }
            Self::OpOutOfBounds { kind, index, len } => {
                write!(
                    f,
                    "{kind:?} op references cluster {index} of a {len}-cluster sequence"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 3,
        };
        assert!(err.to_string().contains("0x3"));

        let err = Error::InvalidDuration(Duration::ZERO);
        assert!(err.to_string().contains("0ms"));

        let err = Error::OpOutOfBounds {
            kind: DiffKind::Move,
            index: 7,
            len: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Move"));
        assert!(msg.contains("cluster 7"));
        assert!(msg.contains("3-cluster"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
