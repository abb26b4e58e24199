//! Species-polymorphic record normalization.
//!
//! Turns one raw shelter record into a schema-conformant
//! [`NormalizedAnimal`], resolving ambiguous multi-valued fields
//! (breed, color, size) with shelter-specific heuristics driven by the
//! [`adoptapet::MappingTable`].
//!
//! # Architecture
//!
//! ```text
//! RawPet --> Species::dispatch --> normalize (base + species hooks) --> NormalizedAnimal
//!                                        |
//!                                  MappingTable
//! ```
//!
//! Dispatch is a closed registry keyed by the record's species label;
//! unrecognized species get the base behavior. Each conversion is
//! independent and side-effect free: either a fully valid animal comes
//! back or an error does, never a partial record.

pub mod error;
pub mod normalize;
pub mod schema;
pub mod species;

pub use error::{Error, Result};
pub use normalize::normalize;
pub use schema::{NormalizedAnimal, PhotoFile};
pub use species::Species;
