//! One synchronization pass: fetch, normalize, export, stage photos.

use std::collections::HashSet;
use std::path::Path;

use adoptapet::MappingTable;
use anyhow::Result;
use chrono::NaiveDateTime;
use normalizer::{normalize, NormalizedAnimal};
use petfinder::{ListingTransport, Pets};
use tracing::warn;

use crate::export::CsvExporter;
use crate::photos::PhotoFetcher;

/// Longest identifier the intake system accepts.
const MAX_ID_LEN: usize = 50;

/// State shared across the adoptable and adopted passes.
pub struct SyncState {
    pub processed_ids: HashSet<String>,
    pub photos_to_upload: Vec<String>,
    pub downloaded_photos: HashSet<String>,
}

/// Make the identifier non-empty and unique within this run, capped at
/// the intake system's length limit.
pub fn fix_id(animal: &mut NormalizedAnimal, processed: &HashSet<String>) {
    if animal.id.is_empty() {
        animal.id = animal.name.clone();
    } else if processed.contains(&animal.id) {
        animal.id = format!("{}-{}", animal.id, animal.name);
    }
    if animal.id.chars().count() > MAX_ID_LEN {
        animal.id = animal.id.chars().take(MAX_ID_LEN).collect();
    }
}

/// Drain one record sequence into the export file, staging photos for
/// animals whose first photo is not on disk yet. `cutoff` drops records
/// not updated since that time (used for the adopted pass).
#[allow(clippy::too_many_arguments)]
pub fn run_pass<T: ListingTransport>(
    pets: Pets<'_, T>,
    cutoff: Option<NaiveDateTime>,
    table: &MappingTable,
    exporter: &mut CsvExporter,
    fetcher: &PhotoFetcher,
    photos_dir: &Path,
    state: &mut SyncState,
) -> Result<()> {
    for pet in pets {
        let pet = pet?;
        let mut animal = match normalize(&pet, table) {
            Ok(animal) => animal,
            Err(err @ normalizer::Error::MalformedTimestamp { .. }) => {
                // Documented choice: skip the record, not the run.
                warn!(error = %err, "skipping record with unusable timestamp");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(cutoff) = cutoff {
            if animal.last_update < cutoff {
                continue;
            }
        }
        fix_id(&mut animal, &state.processed_ids);
        exporter.write_animal(&animal, table)?;
        state
            .photos_to_upload
            .extend(animal.photos.iter().map(|p| p.filename.clone()));
        state.processed_ids.insert(animal.id.clone());

        let probe = format!("{}-1.jpg", animal.id);
        if !state.downloaded_photos.contains(&probe) {
            fetcher.download_all(&animal, photos_dir)?;
        }
    }
    Ok(())
}
