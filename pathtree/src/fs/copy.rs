//! Single-file copy.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::fs::Filesystem;

/// Chunk size used when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Options shared by the copy operations.
///
/// # Examples
///
/// ```
/// use pathtree::fs::CopyOptions;
///
/// let options = CopyOptions::new()
///     .with_overwrite(true)
///     .with_buffer_size(64 * 1024);
/// assert!(options.overwrite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Replace destinations that already exist.
    pub overwrite: bool,
    /// Bytes moved per read/write round trip.
    pub buffer_size: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CopyOptions {
    /// Options with defaults: no overwrite, 8 KiB chunks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether existing destinations are replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Configure the chunk size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::InvalidArgument {
                reason: "buffer size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Copy the file at `source` to `destination`, returning the number of bytes
/// written.
///
/// Preconditions are checked in order and the first violated one is reported
/// before anything is touched. Once they hold, missing ancestors of
/// `destination` are created, any existing destination entry is removed, and
/// the bytes are streamed across in `options.buffer_size` chunks.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if the buffer size is zero
/// - [`Error::NotFound`] if `source` does not exist
/// - [`Error::IsDirectory`] if `source` is a directory
/// - [`Error::AlreadyExists`] if `destination` exists and overwrite is off
/// - [`Error::DirectoryNotEmpty`] if `destination` is a non-empty directory
/// - any I/O failure while preparing the destination or streaming
///
/// # Examples
///
/// ```no_run
/// use pathtree::fs::{copy_file, CopyOptions, StdFilesystem};
/// use std::path::Path;
///
/// let bytes = copy_file(
///     &StdFilesystem,
///     Path::new("notes.txt"),
///     Path::new("backup/notes.txt"),
///     &CopyOptions::default(),
/// )
/// .unwrap();
/// println!("copied {bytes} bytes");
/// ```
pub fn copy_file<F: Filesystem + ?Sized>(
    fs: &F,
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> Result<u64> {
    options.check()?;

    if !fs.exists(source) {
        return Err(Error::NotFound {
            path: source.to_path_buf(),
        });
    }
    if fs.is_dir(source) {
        return Err(Error::IsDirectory {
            path: source.to_path_buf(),
        });
    }

    let destination_exists = fs.exists(destination);
    if destination_exists {
        if !options.overwrite {
            return Err(Error::AlreadyExists {
                path: destination.to_path_buf(),
                other: Some(source.to_path_buf()),
            });
        }
        if fs.is_dir(destination) && !fs.is_symlink(destination) {
            let entries = fs
                .read_dir(destination)
                .map_err(|e| Error::from_io(destination, e))?;
            if !entries.is_empty() {
                return Err(Error::DirectoryNotEmpty {
                    path: destination.to_path_buf(),
                });
            }
        }
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent)
            .map_err(|e| Error::from_io(parent, e))?;
    }
    if destination_exists {
        fs.remove(destination)
            .map_err(|e| Error::from_io(destination, e))?;
    }

    let mut reader = fs.open_read(source).map_err(|e| Error::from_io(source, e))?;
    let mut writer = fs
        .create_write(destination)
        .map_err(|e| Error::from_io(destination, e))?;
    let copied = stream(&mut reader, &mut writer, options.buffer_size)?;

    log::debug!(
        "copied {copied} bytes from {} to {}",
        source.display(),
        destination.display()
    );
    Ok(copied)
}

fn stream<R, W>(reader: &mut R, writer: &mut W, buffer_size: usize) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..n])?;
        total += n as u64;
    }
    writer.flush()?;
    Ok(total)
}
