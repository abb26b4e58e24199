//! Remote listing client for the Petfinder shelter API.
//!
//! Fetches one shelter's adoptable-animal records page by page, retrying
//! transient protocol failures, and yields raw records lazily: the next
//! page is requested only when the consumer has drained the previous
//! one. Each call to [`PetFinder::shelter_pets`] starts a fresh,
//! independent sequence.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{PetFinder, Pets, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE};
pub use error::{Error, Result};
pub use transport::{HttpTransport, ListingTransport, PageQuery};
pub use types::RawPet;
