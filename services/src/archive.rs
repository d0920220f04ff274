//! Unpacking of uploaded history archives.
//!
//! Uploads are copied into a temporary file and extracted into a temporary directory. Both are
//! drop guards, so nothing is left behind whichever way a load ends.

use std::{
    fs::File,
    io::{
        self,
        BufReader,
        Read,
    },
    path::{
        Path,
        PathBuf,
    },
};

use history_stats_core::{
    Error,
    Result,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::{
    Builder,
    NamedTempFile,
    TempDir,
};
use tracing::{
    debug,
    info,
};
use walkdir::WalkDir;
use zip::{
    result::ZipError,
    ZipArchive,
};

use crate::de::records_skip_errors;

pub const ARCHIVE_EXT: &str = ".zip";
pub const HISTORY_EXT: &str = ".json";


/// Loads history records out of zip uploads
#[derive(Debug, Clone, Default)]
pub struct ArchiveLoader {
    /// Where scoped temp files go, system temp dir when `None`
    temp_dir: Option<PathBuf>,
}

impl ArchiveLoader {
    pub fn new(temp_dir: Option<PathBuf>) -> Self { Self { temp_dir } }

    /// Loads the archive at `path`, using its file name as the upload name
    ///
    /// # Errors
    ///
    /// See [`ArchiveLoader::load`]. A missing file is reported as [`Error::BadInput`].
    pub fn load_path<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<Vec<T>>> {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::bad_input(format!("No file uploaded: {}", path.display())),
            _ => e.into(),
        })?;
        self.load(&name, file)
    }

    /// Persists `data`, extracts it and parses every `.json` file inside, in file name order
    ///
    /// Each entry of the result holds the records of one file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadInput`] if `file_name` doesn't end in `.zip`, the archive can't be
    /// read, any JSON file fails to parse, or there are no JSON files at all.
    pub fn load<T: DeserializeOwned>(&self, file_name: &str, mut data: impl Read) -> Result<Vec<Vec<T>>> {
        if !file_name.ends_with(ARCHIVE_EXT) {
            return Err(Error::bad_input("Only .zip files are allowed"));
        }

        let mut upload = self.upload_file()?;
        let size = io::copy(&mut data, &mut upload)?;
        debug!(file_name, size, path = %upload.path().display(), "Persisted upload");

        let extract_dir = self.extract(&upload)?;
        let files = read_history_files(extract_dir.path())?;
        info!(file_name, files = files.len(), "Loaded history archive");
        Ok(files)
    }

    fn upload_file(&self) -> Result<NamedTempFile> {
        let mut builder = Builder::new();
        builder.prefix("upload-").suffix(ARCHIVE_EXT);
        Ok(match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        })
    }

    fn extract(&self, upload: &NamedTempFile) -> Result<TempDir> {
        let mut builder = Builder::new();
        builder.prefix("history-");
        let dir = match &self.temp_dir {
            Some(dir) => builder.tempdir_in(dir)?,
            None => builder.tempdir()?,
        };

        let rdr = upload.reopen().map(BufReader::new)?;
        let mut archive = ZipArchive::new(rdr).map_err(|e| Error::bad_input(format!("Invalid zip archive: {e}")))?;
        archive.extract(dir.path()).map_err(|e| match e {
            ZipError::Io(e) => Error::Io(e),
            e => Error::bad_input(format!("Invalid zip archive: {e}")),
        })?;
        debug!(entries = archive.len(), path = %dir.path().display(), "Extracted archive");
        Ok(dir)
    }
}

/// Parses every `.json` file below `root`
fn read_history_files<T: DeserializeOwned>(root: &Path) -> Result<Vec<Vec<T>>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let is_history = entry.file_name().to_str().map(|n| n.ends_with(HISTORY_EXT)).unwrap_or(false);
        if !entry.file_type().is_file() || !is_history {
            continue;
        }

        let name = entry.path().strip_prefix(root).unwrap_or(entry.path()).display().to_string();
        let rdr = File::open(entry.path()).map(BufReader::new)?;
        let value: Value = serde_json::from_reader(rdr).map_err(|e| Error::bad_input(format!("Error parsing {name}: {e}")))?;
        let records = records_skip_errors(value)
            .ok_or_else(|| Error::bad_input(format!("Error parsing {name}: expected an object or an array of objects")))?;

        debug!(file = %name, records = records.len(), "Parsed history file");
        files.push(records);
    }

    if files.is_empty() {
        return Err(Error::bad_input("No JSON files found"));
    }
    Ok(files)
}
