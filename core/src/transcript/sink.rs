use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::codec::encode_byte;

/// Transcript file owned by one forwarder for its whole run.
#[derive(Debug)]
pub struct Transcript {
    file: File,
    path: PathBuf,
}

impl Transcript {
    /// Creates the file, truncating any previous transcript at `path`.
    pub async fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .await?;
        Ok(Self {
            file,
            path,
        })
    }

    /// Appends one byte and flushes, so the file never lags the stream by more than a byte.
    pub async fn record(&mut self, byte: u8) -> std::io::Result<()> {
        self.file.write_all(encode_byte(&byte)).await?;
        self.file.flush().await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
