//! Run settings, read once from the environment in `main` and passed
//! down explicitly.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub shelter_id: String,
    pub ftp_host: String,
    pub ftp_user: String,
    pub ftp_pass: String,
    pub upload_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("PETFINDER_API_KEY").context("PETFINDER_API_KEY must be set")?,
            shelter_id: env::var("PETFINDER_SHELTER_ID")
                .context("PETFINDER_SHELTER_ID must be set")?,
            ftp_host: env::var("ADOPTAPET_FTP_HOST")
                .unwrap_or_else(|_| "autoupload.adoptapet.com".to_string()),
            ftp_user: env::var("ADOPTAPET_FTP_USER").context("ADOPTAPET_FTP_USER must be set")?,
            ftp_pass: env::var("ADOPTAPET_FTP_PASS").context("ADOPTAPET_FTP_PASS must be set")?,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "upload".to_string())
                .into(),
        })
    }
}
