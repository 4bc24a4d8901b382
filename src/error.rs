use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures that abort a conversion run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid GPS log: {0}")]
    InputFormat(String),
    #[error("GPS log contains no rows")]
    EmptyDataset,
    #[error("failed to write map to {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
