use thiserror::Error;

use common::error::Error as PatrolError;
use common::types::LocationId;

use super::types::RegionId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Rendering error: {0}")]
    RenderError(#[from] std::fmt::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Region {0} is not known to the data source.")]
    UnknownRegion(RegionId),

    #[error("Location {0} is not known to the data source.")]
    UnknownLocation(LocationId),

    #[error("Graph processing error: {0}")]
    GraphError(#[from] PatrolError),
}
