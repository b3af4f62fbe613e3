use std::fmt;

use crate::types::LocationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested location is not a vertex of the graph (never fetched, or
    /// removed by the security filter).
    LocationNotFound(LocationId),

    /// Indicates a structural inconsistency found during graph processing or validation.
    InvalidGraph,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::LocationNotFound(id) => {
                write!(f, "Location {} is not present in the graph.", id)
            }

            Error::InvalidGraph => write!(f, "Graph structure is invalid or inconsistent."),
        }
    }
}

impl std::error::Error for Error {}
