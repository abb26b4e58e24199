//! Photo byte retrieval to the local staging directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use normalizer::NormalizedAnimal;
use tracing::debug;

pub struct PhotoFetcher {
    http: reqwest::blocking::Client,
}

impl Default for PhotoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Download every photo of one animal into `destination`.
    pub fn download_all(&self, animal: &NormalizedAnimal, destination: &Path) -> Result<()> {
        for photo in &animal.photos {
            debug!(filename = %photo.filename, url = %photo.url, "downloading photo");
            let bytes = self
                .http
                .get(&photo.url)
                .send()
                .and_then(|r| r.error_for_status())
                .with_context(|| format!("failed to fetch photo {}", photo.url))?
                .bytes()?;
            fs::write(destination.join(&photo.filename), &bytes)
                .with_context(|| format!("failed to write photo {}", photo.filename))?;
        }
        Ok(())
    }
}
