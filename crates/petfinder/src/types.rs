//! Typed schema for the service's XML responses.
//!
//! Only the fields the normalization pipeline reads are modeled; every
//! scalar is optional because the service freely omits or empties
//! elements per record.

use serde::Deserialize;

/// One page of the `shelter.getPets` response.
#[derive(Debug, Deserialize)]
pub struct PetsResponse {
    pub header: Header,
    #[serde(rename = "lastOffset", default)]
    pub last_offset: Option<u32>,
    #[serde(default)]
    pub pets: PetList,
}

#[derive(Debug, Deserialize)]
pub struct Header {
    pub status: ResponseStatus,
}

/// Service-level status embedded in every delivered response. Code
/// `"100"` means success; anything else is retried.
#[derive(Debug, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PetList {
    #[serde(rename = "pet", default)]
    pub pets: Vec<RawPet>,
}

/// One unnormalized listing as delivered by the remote service.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawPet {
    #[serde(rename = "shelterPetId")]
    pub shelter_pet_id: Option<String>,
    pub animal: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub mix: Option<String>,
    pub size: Option<String>,
    #[serde(rename = "lastUpdate")]
    pub last_update: Option<String>,
    pub breeds: Breeds,
    pub options: Options,
    pub media: Media,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Breeds {
    #[serde(rename = "breed", default)]
    pub breeds: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Options {
    #[serde(rename = "option", default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Media {
    pub photos: Photos,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Photos {
    #[serde(rename = "photo", default)]
    pub photos: Vec<Photo>,
}

/// A declared photo: the service publishes several sizes of the same
/// photo under one `id`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Photo {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@size", default)]
    pub size: Option<String>,
    #[serde(rename = "$text", default)]
    pub url: String,
}
