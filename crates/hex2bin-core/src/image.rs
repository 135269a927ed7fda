use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Capacity of the target flash device, in bytes.
pub const FINAL_SIZE: u64 = 131_072;

/// Destination of a converted image.
///
/// Appends only ever grow the image and `extend_to` never truncates.
pub trait ImageSink {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Current size of the image in bytes.
    fn len(&self) -> io::Result<u64>;

    /// Zero-extend the image to `size` bytes. No-op when already at or past it.
    fn extend_to(&mut self, size: u64) -> io::Result<()>;
}

/// An image backed by a freshly created file.
pub struct FileImage {
    path: PathBuf,
    file: File,
}

impl FileImage {
    /// Create `path`, failing if anything already exists there.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => Error::DestinationExists {
                    path: path.to_path_buf(),
                },
                _ => Error::Write(e),
            })?;

        log::debug!("created output image {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileImage {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)
    }

    fn len(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn extend_to(&mut self, size: u64) -> io::Result<()> {
        if self.len()? < size {
            self.file.set_len(size)?;
        }
        Ok(())
    }
}
