use thiserror::Error;

use crate::catalog::CatalogError;
use crate::changed::ChangedInputError;
use crate::output::OutputError;

#[derive(Error, Debug)]
pub enum PantalonError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Changed directories error: {0}")]
    ChangedInput(#[from] ChangedInputError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Failed to bridge log records into tracing: {0}")]
    LogBridge(#[from] log::SetLoggerError),

    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub type Result<T> = std::result::Result<T, PantalonError>;
