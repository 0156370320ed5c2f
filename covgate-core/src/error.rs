//! Error types for CovGate core.

use std::{error::Error, fmt, io};

/// Error type for CovGate core operations.
#[derive(Debug)]
pub enum CovGateError {
    /// An underlying I/O error while reading the report file.
    Io(io::Error),
    /// The report bytes were not a valid JSON document of the expected shape.
    Parse(serde_json::Error),
}

impl fmt::Display for CovGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Parse(err) => write!(f, "invalid coverage report: {err}"),
        }
    }
}

impl Error for CovGateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for CovGateError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CovGateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Convenience result type for CovGate core.
pub type Result<T> = std::result::Result<T, CovGateError>;

#[cfg(test)]
mod tests {
    use super::CovGateError;
    use std::io;

    #[test]
    fn io_error_formats_message() {
        let error = CovGateError::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(format!("{error}"), "io error: boom");
    }

    #[test]
    fn parse_error_formats_message() {
        let cause = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = CovGateError::Parse(cause);
        assert!(format!("{error}").starts_with("invalid coverage report:"));
    }

    #[test]
    fn from_io_error_maps_variant() {
        let error: CovGateError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        match error {
            CovGateError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            CovGateError::Parse(_) => panic!("expected Io variant"),
        }
    }
}
