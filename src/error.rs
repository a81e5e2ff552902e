//! Crate-wide error type and the `err_at!` construction macro.

use std::{fmt, result};

/// Error variants raised by this crate.
///
/// Every variant carries a `file:line` location, stamped by [`err_at`], plus
/// a human-readable message. The location is the call site of `err_at!`, not
/// necessarily the root cause, which keeps the macro a thin wrapper instead
/// of a backtrace library.
#[derive(Clone)]
pub enum Error {
    /// `IndexerOptions` failed validation (out-of-range counts, zero paths).
    ConfigInvalid(String, String),
    /// The input line set was empty where at least one line is required.
    EmptyInput(String, String),
    /// A line violated the newline-free-content invariant.
    InvalidLine(String, String),
    /// Underlying I/O call failed.
    IOError(String, String),
    /// A path or filename did not have the expected shape.
    InvalidFile(String, String),
    /// An internal invariant was violated; indicates a bug in this crate.
    Fatal(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ConfigInvalid(p, msg) => write!(f, "{} ConfigInvalid: {}", p, msg),
            Error::EmptyInput(p, msg) => write!(f, "{} EmptyInput: {}", p, msg),
            Error::InvalidLine(p, msg) => write!(f, "{} InvalidLine: {}", p, msg),
            Error::IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
            Error::InvalidFile(p, msg) => write!(f, "{} InvalidFile: {}", p, msg),
            Error::Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Build an [`Error`] at the call site, stamping `file!():line!()`.
///
/// Three forms:
///
/// * `err_at!(Variant, fallible_expr)` — convert the `Err` side of a
///   `std::result::Result` into `Error::Variant`, passing `Ok` through.
/// * `err_at!(Variant, fallible_expr, fmt, args...)` — same, with extra
///   context prepended to the underlying error's message.
/// * `err_at!(Variant, msg: fmt, args...)` — construct an `Err(Error::Variant)`
///   directly from a format string, for cases with no underlying `Result`.
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $fmt:expr $(, $arg:expr)*) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(prefix, format!($fmt $(, $arg)*)))
    }};
    ($v:ident, $e:expr, $fmt:expr $(, $arg:expr)*) => {
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let ctx = format!($fmt $(, $arg)*);
                Err($crate::Error::$v(prefix, format!("{}: {}", ctx, err)))
            }
        }
    };
    ($v:ident, $e:expr) => {
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(prefix, format!("{}", err)))
            }
        }
    };
}
