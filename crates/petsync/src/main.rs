//! petsync entry point.
//!
//! Pulls one shelter's records from the listing service, normalizes
//! them against the intake import configuration, writes `pets.csv`,
//! stages photos locally, and mirrors everything to the intake store.

mod export;
mod photos;
mod settings;
mod sync;
mod upload;

use std::collections::HashSet;
use std::fs::{self, File};

use adoptapet::MappingTable;
use anyhow::Result;
use chrono::{Duration, Utc};
use petfinder::PetFinder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::export::CsvExporter;
use crate::photos::PhotoFetcher;
use crate::settings::Settings;
use crate::sync::{run_pass, SyncState};
use crate::upload::{FtpChannel, UploadChannel};

/// Adopted animals stay in the feed this long after their last update.
const ADOPTED_CUTOFF_DAYS: i64 = 180;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    info!(shelter = %settings.shelter_id, "starting petsync run");

    let photos_dir = settings.upload_dir.join("photos");
    fs::create_dir_all(&photos_dir)?;

    let table = MappingTable::from_path(settings.upload_dir.join("import.cfg"))?;
    let client = PetFinder::new(settings.api_key.clone());
    let mut exporter = CsvExporter::create(&settings.upload_dir.join("pets.csv"), &table)?;
    let fetcher = PhotoFetcher::new();

    let downloaded_photos: HashSet<String> = fs::read_dir(&photos_dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".jpg"))
        .collect();

    let mut state = SyncState {
        processed_ids: HashSet::new(),
        photos_to_upload: Vec::new(),
        downloaded_photos,
    };

    run_pass(
        client.shelter_pets(&settings.shelter_id, "A"),
        None,
        &table,
        &mut exporter,
        &fetcher,
        &photos_dir,
        &mut state,
    )?;

    let cutoff = Utc::now().naive_utc() - Duration::days(ADOPTED_CUTOFF_DAYS);
    run_pass(
        client.shelter_pets(&settings.shelter_id, "X"),
        Some(cutoff),
        &table,
        &mut exporter,
        &fetcher,
        &photos_dir,
        &mut state,
    )?;

    exporter.finish()?;
    info!(records = state.processed_ids.len(), "export complete, uploading");

    let mut channel = FtpChannel::connect(&settings.ftp_host, &settings.ftp_user, &settings.ftp_pass)?;
    let uploaded: HashSet<String> = channel.list("photos")?.into_iter().collect();

    for name in ["pets.csv", "import.cfg"] {
        let mut file = File::open(settings.upload_dir.join(name))?;
        channel.store(name, &mut file)?;
    }

    channel.ensure_dir("photos")?;
    channel.enter("photos")?;
    for file_name in &state.photos_to_upload {
        if uploaded.contains(file_name) {
            continue;
        }
        match File::open(photos_dir.join(file_name)) {
            Ok(mut file) => channel.store(file_name, &mut file)?,
            Err(err) => warn!(file = %file_name, error = %err, "staged photo missing, skipping"),
        }
    }

    info!("petsync run complete");
    Ok(())
}
