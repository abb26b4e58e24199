//! Normalized animal schema and output projection.

use adoptapet::MappingTable;
use chrono::NaiveDateTime;

use crate::species::Species;

/// A photo slated for upload: synthetic output filename plus the source
/// URL its bytes come from. The bytes themselves are fetched later by
/// an external collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub filename: String,
    pub url: String,
}

/// The species-resolved, schema-ready representation of one listing.
///
/// Constructed once by [`crate::normalize`] and read-only afterwards.
/// `breed` is always set; `color` stays empty unless a species rule
/// fills it. Flag attributes hold `"Y"`/`"N"` when the provider
/// declared the matching option and stay unset otherwise (projected as
/// empty strings).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAnimal {
    pub species: Species,
    /// Shelter-assigned identifier (`shelterPetId`).
    pub id: String,
    /// Species label as published, possibly adjusted by a species rule.
    pub animal: String,
    pub name: String,
    pub age: String,
    pub sex: String,
    pub description: String,
    pub status: String,
    pub breed: String,
    pub breed_2: Option<String>,
    pub color: String,
    pub size: String,
    pub purebred: String,
    pub special_needs: Option<String>,
    pub good_w_dogs: Option<String>,
    pub good_w_cats: Option<String>,
    pub good_w_kids: Option<String>,
    pub declawed: Option<String>,
    pub shots_current: Option<String>,
    pub housetrained: Option<String>,
    pub spayed_neutered: Option<String>,
    pub last_update: NaiveDateTime,
    /// Photos in declared order, one entry per unique photo id.
    pub photos: Vec<PhotoFile>,
}

impl NormalizedAnimal {
    /// Look up an attribute by its output-schema field name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "shelterPetId" => Some(&self.id),
            "animal" => Some(&self.animal),
            "name" => Some(&self.name),
            "age" => Some(&self.age),
            "sex" => Some(&self.sex),
            "description" => Some(&self.description),
            "status" => Some(&self.status),
            "breed" => Some(&self.breed),
            "breed_2" => self.breed_2.as_deref(),
            "color" => Some(&self.color),
            "size" => Some(&self.size),
            "purebred" => Some(&self.purebred),
            "special_needs" => self.special_needs.as_deref(),
            "good_w_dogs" => self.good_w_dogs.as_deref(),
            "good_w_cats" => self.good_w_cats.as_deref(),
            "good_w_kids" => self.good_w_kids.as_deref(),
            "declawed" => self.declawed.as_deref(),
            "shots_current" => self.shots_current.as_deref(),
            "housetrained" => self.housetrained.as_deref(),
            "spayed_neutered" => self.spayed_neutered.as_deref(),
            _ => None,
        }
    }

    /// Project this animal onto the configured output schema: one
    /// `(column, value)` pair per table column, in declaration order,
    /// with empty strings for unset attributes.
    pub fn to_record(&self, table: &MappingTable) -> Vec<(String, String)> {
        table
            .columns()
            .map(|column| {
                (
                    column.to_string(),
                    self.field(column).unwrap_or("").to_string(),
                )
            })
            .collect()
    }

    pub(crate) fn flag_slot(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "special_needs" => Some(&mut self.special_needs),
            "good_w_dogs" => Some(&mut self.good_w_dogs),
            "good_w_cats" => Some(&mut self.good_w_cats),
            "good_w_kids" => Some(&mut self.good_w_kids),
            "declawed" => Some(&mut self.declawed),
            "shots_current" => Some(&mut self.shots_current),
            "housetrained" => Some(&mut self.housetrained),
            "spayed_neutered" => Some(&mut self.spayed_neutered),
            _ => None,
        }
    }
}
