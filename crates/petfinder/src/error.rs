//! Error types for the listing client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Request delivery failed. Transport failures are never retried and
    /// end the whole fetch.
    #[error("request delivery failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but not with a usable delivery.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be decoded. Malformed delivery is a
    /// transport-class failure, also fatal.
    #[error("malformed response: {0}")]
    Decode(#[from] quick_xml::DeError),

    /// The service kept reporting a non-success status for one page
    /// until the retry budget ran out.
    #[error("service rejected the request after {attempts} attempts: {message}")]
    Protocol { attempts: u32, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
