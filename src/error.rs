//! Unified error type.

use std::fmt;
use std::net::AddrParseError;

/// The error type returned by shunt's fallible operations.
///
/// Every variant except [`Error::Io`] is a load-time failure: a route that
/// produces one is rejected as a whole and never installed. Request-time
/// outcomes (404 and friends) are expressed as [`Response`](crate::Response)
/// values instead.
#[derive(Debug)]
pub enum Error {
    /// A filter received the wrong number or the wrong type of arguments.
    InvalidParameters,
    /// A route references a filter name that is not registered.
    UnknownFilter(String),
    /// A route definition could not be parsed.
    Syntax { offset: usize, message: &'static str },
    /// A path pattern was rejected by the router.
    InvalidPath(String),
    /// The listen address is not a valid `host:port`.
    Addr(AddrParseError),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters => f.write_str("invalid filter parameters"),
            Self::UnknownFilter(name) => write!(f, "unknown filter `{name}`"),
            Self::Syntax { offset, message } => {
                write!(f, "route syntax error at offset {offset}: {message}")
            }
            Self::InvalidPath(e) => write!(f, "invalid path: {e}"),
            Self::Addr(e) => write!(f, "invalid address: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Addr(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<AddrParseError> for Error {
    fn from(e: AddrParseError) -> Self {
        Self::Addr(e)
    }
}
