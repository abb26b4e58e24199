//! The normalization engine: base procedure plus per-species hooks.
//!
//! Every record goes through the same base extraction (scalar fields,
//! timestamp, option flags, photos); the species variant selects the
//! breed/color resolution, the size rule, and a post-construction
//! adjustment. The hooks that disambiguate breed and color work on set
//! intersections between the record's free-text breed values and the
//! vocabulary configured in the mapping table's `breed` and `color`
//! columns; ties are broken lexicographically so results are
//! reproducible.

use std::collections::{BTreeSet, HashSet};

use adoptapet::MappingTable;
use chrono::NaiveDateTime;
use petfinder::RawPet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{NormalizedAnimal, PhotoFile};
use crate::species::Species;

const LAST_UPDATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Fallback when a cat record names no recognizable breed.
const DEFAULT_CAT_BREED: &str = "Domestic Short Hair";

/// Target value marking a breed mapping as "drop this value".
const SKIP_SENTINEL: &str = "SKIP";

/// Provider option flag, output attribute it drives, value when present.
const OPTION_FLAGS: [(&str, &str, &str); 9] = [
    ("specialNeeds", "special_needs", "Y"),
    ("noDogs", "good_w_dogs", "N"),
    ("noCats", "good_w_cats", "N"),
    ("noKids", "good_w_kids", "N"),
    ("noClaws", "declawed", "Y"),
    ("hasShots", "shots_current", "Y"),
    ("housebroken", "housetrained", "Y"),
    ("housetrained", "housetrained", "Y"),
    ("altered", "spayed_neutered", "Y"),
];

/// Character runs left behind when UTF-8 bytes for em dash, curly
/// quote, en dash and apostrophe get decoded as Latin-1.
const MOJIBAKE_MARKERS: [&str; 4] = [
    "\u{e2}\u{80}\u{94}",
    "\u{e2}\u{80}\u{9c}",
    "\u{e2}\u{80}\u{93}",
    "\u{e2}\u{80}\u{99}",
];

/// Normalize one raw record against the configured mapping table.
///
/// Construction is atomic: either a fully valid animal or an error,
/// never a partial record. Normalizing the same record twice yields
/// identical animals.
pub fn normalize(pet: &RawPet, table: &MappingTable) -> Result<NormalizedAnimal> {
    let species = Species::dispatch(text(&pet.animal));
    debug!(?species, id = text(&pet.shelter_pet_id), "normalizing record");

    let raw_last_update = text(&pet.last_update);
    let last_update = NaiveDateTime::parse_from_str(raw_last_update, LAST_UPDATE_FORMAT)
        .map_err(|source| Error::MalformedTimestamp {
            value: raw_last_update.to_string(),
            source,
        })?;

    let mut description = text(&pet.description).to_string();
    if let Some(repaired) = repair_double_encoding(&description) {
        description = repaired;
    }

    let id = text(&pet.shelter_pet_id).to_string();
    let mut animal = NormalizedAnimal {
        species,
        id: id.clone(),
        animal: text(&pet.animal).to_string(),
        name: text(&pet.name).to_string(),
        age: text(&pet.age).to_string(),
        sex: text(&pet.sex).to_string(),
        description,
        status: text(&pet.status).to_string(),
        breed: String::new(),
        breed_2: None,
        color: String::new(),
        size: String::new(),
        // Provider quirk kept as-is: an absent mix field means "N".
        purebred: if text(&pet.mix) == "Y" { "Y" } else { "N" }.to_string(),
        special_needs: None,
        good_w_dogs: None,
        good_w_cats: None,
        good_w_kids: None,
        declawed: None,
        shots_current: None,
        housetrained: None,
        spayed_neutered: None,
        last_update,
        photos: extract_photos(&id, pet),
    };

    let options: HashSet<&str> = pet.options.options.iter().map(String::as_str).collect();
    for (option, attr, value) in OPTION_FLAGS {
        if options.contains(option) {
            if let Some(slot) = animal.flag_slot(attr) {
                *slot = Some(value.to_string());
            }
        }
    }

    let breeds = &pet.breeds.breeds;
    match species {
        Species::Cat => resolve_cat_breeds(&mut animal, breeds, table)?,
        Species::Dog => resolve_dog_breeds(&mut animal, breeds, table)?,
        Species::Horse => resolve_listed_breeds(&mut animal, breeds)?,
        _ => animal.breed = first_breed(&animal.id, breeds)?,
    }

    let raw_size = text(&pet.size);
    animal.size = match species {
        // Dogs keep the provider's size value, XL included.
        Species::Dog => raw_size.to_string(),
        _ if raw_size == "XL" => "L".to_string(),
        _ => raw_size.to_string(),
    };

    match species {
        Species::Rabbit if animal.age == "Baby" => animal.age = "Young".to_string(),
        Species::SmallFurry if animal.breed == "Tarantula" => {
            animal.animal = "Reptile".to_string();
        }
        _ => {}
    }

    Ok(animal)
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("").trim()
}

/// Cat breed/color resolution, consuming a working set of the record's
/// breed values:
///
/// 1. default breed "Domestic Short Hair", color empty
/// 2. values known as both a color and a breed set both fields
/// 3. remaining known colors set the color
/// 4. anything left over is taken as the actual breed
fn resolve_cat_breeds(
    animal: &mut NormalizedAnimal,
    breeds: &[String],
    table: &MappingTable,
) -> Result<()> {
    let colors = table.shelter_values("color")?;
    let known_breeds = table.shelter_values("breed")?;
    let mut working: BTreeSet<&str> = breeds.iter().map(String::as_str).collect();

    animal.breed = DEFAULT_CAT_BREED.to_string();
    animal.color.clear();

    let color_breeds: BTreeSet<&str> = working
        .iter()
        .copied()
        .filter(|v| colors.contains(*v) && known_breeds.contains(*v))
        .collect();
    if let Some(&pick) = color_breeds.iter().next() {
        animal.breed = pick.to_string();
        animal.color = pick.to_string();
        for v in &color_breeds {
            working.remove(v);
        }
    }

    let color_matches: BTreeSet<&str> = working
        .iter()
        .copied()
        .filter(|v| colors.contains(*v))
        .collect();
    if let Some(&pick) = color_matches.iter().next() {
        animal.color = pick.to_string();
        for v in &color_matches {
            working.remove(v);
        }
    }

    if let Some(&pick) = working.iter().next() {
        animal.breed = pick.to_string();
    }
    Ok(())
}

/// Dog breed/color resolution: a breed value that is also a known color
/// becomes the color (first in declared order); breed values mapping to
/// the `SKIP` sentinel are dropped, the first two survivors become
/// breed and secondary breed.
fn resolve_dog_breeds(
    animal: &mut NormalizedAnimal,
    breeds: &[String],
    table: &MappingTable,
) -> Result<()> {
    let colors = table.shelter_values("color")?;
    let known_breeds = table.shelter_values("breed")?;

    if let Some(color_breed) = breeds
        .iter()
        .find(|v| known_breeds.contains(v.as_str()) && colors.contains(v.as_str()))
    {
        animal.color = color_breed.clone();
    }

    let mut kept: Vec<&String> = Vec::new();
    for value in breeds {
        if table.mapped_value("breed", value)? != SKIP_SENTINEL {
            kept.push(value);
        }
    }
    match kept.as_slice() {
        [] => animal.breed = first_breed(&animal.id, breeds)?,
        [only] => animal.breed = (*only).clone(),
        [first, second, ..] => {
            animal.breed = (*first).clone();
            animal.breed_2 = Some((*second).clone());
        }
    }
    Ok(())
}

/// Horse rule: first listed breed, second exposed as secondary breed.
fn resolve_listed_breeds(animal: &mut NormalizedAnimal, breeds: &[String]) -> Result<()> {
    animal.breed = first_breed(&animal.id, breeds)?;
    animal.breed_2 = breeds.get(1).cloned();
    Ok(())
}

/// First listed breed value; the breed field must never end up empty.
fn first_breed(id: &str, breeds: &[String]) -> Result<String> {
    breeds
        .first()
        .cloned()
        .ok_or_else(|| Error::MissingBreed { id: id.to_string() })
}

/// Best-effort repair of text that was UTF-8 encoded and then decoded
/// as Latin-1. Applies only when a telltale marker is present and every
/// character fits back into a single byte; otherwise the text is left
/// alone.
fn repair_double_encoding(text: &str) -> Option<String> {
    if text.is_empty() || !MOJIBAKE_MARKERS.iter().any(|m| text.contains(m)) {
        return None;
    }
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return None;
        }
        bytes.push(code as u8);
    }
    String::from_utf8(bytes).ok()
}

/// Collect (filename, URL) pairs for the record's photos. The first
/// occurrence of each photo id wins; query strings are stripped from
/// URLs; slashes in the identifier are escaped so filenames stay flat.
fn extract_photos(id: &str, pet: &RawPet) -> Vec<PhotoFile> {
    let escaped_id = id.replace('/', "%2F");
    let mut seen: HashSet<&str> = HashSet::new();
    let mut photos = Vec::new();
    for photo in &pet.media.photos.photos {
        if !seen.insert(photo.id.as_str()) {
            continue;
        }
        let url = match photo.url.split_once('?') {
            Some((base, _)) => base,
            None => photo.url.as_str(),
        };
        photos.push(PhotoFile {
            filename: format!("{escaped_id}-{}.jpg", photo.id),
            url: url.to_string(),
        });
    }
    photos
}
