use miette::Diagnostic;
use thiserror::Error;

use tether_core::Mismatch;

/// Failure of a checked conversion.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[diagnostic(
        code(tether::mismatch),
        help("probe with `check` first, or read it as an `Option` or a sum type")
    )]
    #[error("conversion failed at {0}")]
    Mismatch(Mismatch),

    #[diagnostic(code(tether::stack_overflow))]
    #[error("stack cannot grow by {requested} slot(s)")]
    StackOverflow { requested: usize },
}

impl From<Mismatch> for Error {
    fn from(mismatch: Mismatch) -> Self {
        Error::Mismatch(mismatch)
    }
}

impl Error {
    /// The mismatch behind a failed read, if that is what this is.
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Error::Mismatch(mismatch) => Some(mismatch),
            Error::StackOverflow { .. } => None,
        }
    }
}
