use crate::modules::attendance::adapters::outbound::backing_store::StoreError;
use crate::shared::core::primitives::DateParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    DateFormat(#[from] DateParseError),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer: {0}")]
    Buffer(String),

    #[error("export is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("could not save {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
