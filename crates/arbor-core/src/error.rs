use crate::{node::LoadError, path::PathError, query::QueryError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Edge failures: loading a document or accepting a query description.
/// Evaluation has no error type; it degrades to "no match" instead.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl Error {
    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Load(_) => ErrorOrigin::Document,
            Self::Path(_) | Self::Query(_) => ErrorOrigin::Query,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Document,
    Query,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Document => "document",
            Self::Query => "query",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
