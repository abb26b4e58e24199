//! Upload channel to the partner intake store.
//!
//! The pipeline only needs to store files and list what is already
//! present remotely; the trait keeps the FTP details out of the sync
//! logic.

use std::io::Read;

use anyhow::Result;
use suppaftp::FtpStream;
use tracing::debug;

pub trait UploadChannel {
    /// Names already present in the remote directory (`""` for the
    /// current one).
    fn list(&mut self, dir: &str) -> Result<Vec<String>>;

    /// Store one file under `name` in the current remote directory.
    fn store(&mut self, name: &str, data: &mut dyn Read) -> Result<()>;

    /// Create the remote directory if it does not exist yet.
    fn ensure_dir(&mut self, name: &str) -> Result<()>;

    /// Change into a remote directory.
    fn enter(&mut self, dir: &str) -> Result<()>;
}

pub struct FtpChannel {
    ftp: FtpStream,
}

impl FtpChannel {
    pub fn connect(host: &str, user: &str, pass: &str) -> Result<Self> {
        let mut ftp = FtpStream::connect((host, 21))?;
        ftp.login(user, pass)?;
        Ok(Self { ftp })
    }
}

impl UploadChannel for FtpChannel {
    fn list(&mut self, dir: &str) -> Result<Vec<String>> {
        let path = if dir.is_empty() { None } else { Some(dir) };
        let entries = self.ftp.nlst(path)?;
        // Some servers return full paths from NLST; keep the basenames.
        Ok(entries
            .into_iter()
            .map(|e| e.rsplit('/').next().unwrap_or_default().to_string())
            .collect())
    }

    fn store(&mut self, name: &str, data: &mut dyn Read) -> Result<()> {
        debug!(name, "uploading file");
        let mut reader = data;
        self.ftp.put_file(name, &mut reader)?;
        Ok(())
    }

    fn ensure_dir(&mut self, name: &str) -> Result<()> {
        if !self.list("")?.iter().any(|e| e == name) {
            self.ftp.mkdir(name)?;
        }
        Ok(())
    }

    fn enter(&mut self, dir: &str) -> Result<()> {
        self.ftp.cwd(dir)?;
        Ok(())
    }
}
