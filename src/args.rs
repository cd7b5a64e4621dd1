//! Filter arguments and typed capture.
//!
//! Route definitions hand filters an untyped list of [`Arg`] values. A filter
//! validates that list exactly once, at construction, by capturing it into
//! typed fields:
//!
//! ```rust
//! use shunt::args::{self, Arg, Target};
//!
//! let raw = vec![Arg::from("hello")];
//! let (mut text, mut mime) = (String::new(), String::new());
//! args::capture(&raw, &mut [Target::Required(&mut text), Target::Optional(&mut mime)]).unwrap();
//!
//! assert_eq!(text, "hello");
//! assert!(mime.is_empty());
//! ```

use std::fmt;

use crate::error::Error;

/// A single untyped filter argument as produced by the route parser.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    String(String),
    Number(f64),
}

impl Arg {
    /// Returns the string payload, or `None` for any other kind of value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self { Self::String(s.to_owned()) }
}

impl From<String> for Arg {
    fn from(s: String) -> Self { Self::String(s) }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self { Self::Number(n) }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A destination field for [`capture`].
///
/// Required targets must all precede optional ones.
pub enum Target<'a> {
    Required(&'a mut String),
    Optional(&'a mut String),
}

impl Target<'_> {
    fn is_required(&self) -> bool {
        matches!(self, Self::Required(_))
    }

    fn slot(&mut self) -> &mut String {
        match self {
            Self::Required(s) | Self::Optional(s) => s,
        }
    }
}

/// Assigns `args` to `targets` in order.
///
/// Fails with [`Error::InvalidParameters`] when an argument is missing for a
/// required target, when there are more arguments than targets, or when an
/// argument is not a string. Targets beyond the supplied arguments keep
/// their current value. Nothing is written unless the whole capture succeeds.
pub fn capture(args: &[Arg], targets: &mut [Target<'_>]) -> Result<(), Error> {
    let required = targets.iter().take_while(|t| t.is_required()).count();
    if targets[required..].iter().any(Target::is_required) {
        return Err(Error::InvalidParameters);
    }

    if args.len() < required || args.len() > targets.len() {
        return Err(Error::InvalidParameters);
    }

    let values = args
        .iter()
        .map(|a| a.as_str().ok_or(Error::InvalidParameters))
        .collect::<Result<Vec<_>, _>>()?;

    for (target, value) in targets.iter_mut().zip(values) {
        *target.slot() = value.to_owned();
    }
    Ok(())
}
