//! Project archives for upload.
//!
//! Azkaban only accepts a zip. A project directory is zipped into a
//! temporary file that is removed when the returned [`ProjectArchive`] drops;
//! an existing archive is read as-is.

use crate::protocol::Operation;
use crate::{Error, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::CompressionMethod;

/// Zip bytes ready to attach, plus the temporary file backing them (if any).
pub(crate) struct ProjectArchive {
    pub bytes: Vec<u8>,
    _scratch: Option<tempfile::NamedTempFile>,
}

impl ProjectArchive {
    /// Zip `dir` into a temporary `<zip_name>*.zip`.
    pub fn from_directory(dir: &Path, zip_name: &str) -> Result<Self> {
        let mut scratch = tempfile::Builder::new()
            .prefix(zip_name)
            .suffix(".zip")
            .tempfile()
            .map_err(|e| upload_error(dir, e))?;
        debug!(source = %dir.display(), archive = %scratch.path().display(), "zipping project");

        let file = scratch.as_file_mut();
        zip_directory(dir, file).map_err(|e| upload_error(dir, e))?;

        let mut bytes = Vec::new();
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_end(&mut bytes))
            .map_err(|e| upload_error(dir, e))?;

        Ok(Self {
            bytes,
            _scratch: Some(scratch),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| upload_error(path, e))?;
        Ok(Self {
            bytes,
            _scratch: None,
        })
    }
}

/// Write every file and directory under `dir` into `dest`, with entry names
/// relative to `dir` and `/`-separated.
fn zip_directory(dir: &Path, dest: &mut File) -> zip::result::ZipResult<()> {
    let mut writer = zip::ZipWriter::new(dest);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let name = entry_name(dir, entry.path());
        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options)?;
            io::copy(&mut File::open(entry.path())?, &mut writer)?;
        }
    }
    writer.finish()?;
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn upload_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::api(Operation::Upload, format!("{}: {}", path.display(), err))
}
