//! Scoped temporary files for staging audio
//!
//! A `ScratchFile` owns a named temporary file that is deleted when the value
//! is dropped, so early returns and `?` never leak files on disk. All I/O goes
//! through `tokio::fs` so staging never blocks the runtime.

use std::io;
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

pub struct ScratchFile {
    writer: File,
    path: TempPath,
}

impl ScratchFile {
    /// Create an empty scratch file whose name ends with `.{extension}`
    pub async fn create(extension: &str) -> io::Result<Self> {
        let suffix = format!(".{}", extension);
        let file: NamedTempFile = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("rewear-audio-")
                .suffix(&suffix)
                .tempfile()
        })
        .await
        .map_err(io::Error::other)??;

        let (file, path) = file.into_parts();
        Ok(Self {
            writer: File::from_std(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append bytes and flush them to disk
    pub async fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await
    }

    /// Open the staged file for reading, e.g. to stream it as a request body
    pub async fn open(&self) -> io::Result<File> {
        File::open(self.path()).await
    }

    /// Read the whole file back
    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }
}
