//! Error types for record normalization.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The record's last-update timestamp did not match the service's
    /// fixed `YYYY-MM-DDThh:mm:ssZ` format. Fatal for the record; the
    /// caller decides whether to skip it or abort the run.
    #[error("malformed last-update timestamp {value:?}: {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The record listed no breed values and its species has no default
    /// breed. The normalized schema requires a non-empty breed.
    #[error("record {id:?} lists no breeds")]
    MissingBreed { id: String },

    /// The mapping table is missing a column the normalizer relies on.
    #[error(transparent)]
    Config(#[from] adoptapet::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
