//! Record Store
//!
//! Whole-file CRUD at record granularity for one entity file.
//!
//! ## Responsibilities
//! - Exclusive creation of the backing file
//! - Streaming reads with optional id filter
//! - Read-modify-write mutations over the whole collection
//! - File lifecycle (exists / delete)
//!
//! ## Concurrency:
//! - No in-memory cache: every call re-reads the file
//! - No locking: two stores bound to one file race (last writer wins)

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::config::WriteMode;
use crate::error::{JsonBaseError, Result};
use crate::record::{has_id, Record};

use super::{decode_records, encode_records};

/// CRUD over a single JSON-array file
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Backing file
    path: PathBuf,

    /// How the file is overwritten on mutation
    write_mode: WriteMode,
}

impl RecordStore {
    /// Bind a store to `path` (nothing is touched on disk)
    pub fn new(path: impl Into<PathBuf>, write_mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            write_mode,
        }
    }

    /// Rebind the store to another file
    pub fn bind(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Get the bound file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the write mode
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Check whether the bound file exists
    pub fn file_exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the file holding `initial`
    ///
    /// Fails with `FileAlreadyExists` if the file is present. The create is
    /// exclusive at the OS level, so a racing creator cannot be clobbered.
    pub fn create(&self, initial: &[Record]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => JsonBaseError::FileAlreadyExists(self.path.clone()),
                _ => JsonBaseError::Io(e),
            })?;

        let mut writer = BufWriter::new(file);
        encode_records(&mut writer, initial)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        debug!(path = %self.path.display(), records = initial.len(), "created record file");
        Ok(())
    }

    /// Read the collection, or only the records whose `id` equals `id`
    pub fn read(&self, id: Option<&str>) -> Result<Vec<Record>> {
        let file = self.open_existing()?;
        let records = decode_records(BufReader::new(file), id)?;

        trace!(path = %self.path.display(), ?id, records = records.len(), "read records");
        Ok(records)
    }

    /// Append a record
    pub fn add(&self, record: Record) -> Result<()> {
        let mut records = self.read(None)?;
        records.push(record);
        self.save(&records)?;

        debug!(path = %self.path.display(), records = records.len(), "added record");
        Ok(())
    }

    /// Replace the first record whose `id` equals `id`
    ///
    /// Returns `false` (and rewrites the file unchanged) when nothing matched.
    pub fn update(&self, id: &str, record: Record) -> Result<bool> {
        let mut records = self.read(None)?;

        let replaced = match Self::position(&records, id) {
            Some(index) => {
                records[index] = record;
                true
            }
            None => false,
        };
        self.save(&records)?;

        debug!(path = %self.path.display(), id, replaced, "updated record");
        Ok(replaced)
    }

    /// Remove the first record whose `id` equals `id`
    ///
    /// Returns `false` (and rewrites the file unchanged) when nothing matched.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.read(None)?;

        let removed = match Self::position(&records, id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        };
        self.save(&records)?;

        debug!(path = %self.path.display(), id, removed, "deleted record");
        Ok(removed)
    }

    /// Remove the bound file
    pub fn delete_file(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => JsonBaseError::FileNotFound(self.path.clone()),
            _ => JsonBaseError::Io(e),
        })?;

        debug!(path = %self.path.display(), "deleted record file");
        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn open_existing(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => JsonBaseError::FileNotFound(self.path.clone()),
            _ => JsonBaseError::Io(e),
        })
    }

    fn position(records: &[Record], id: &str) -> Option<usize> {
        records.iter().position(|record| has_id(record, id))
    }

    /// Overwrite the whole file with `records`
    fn save(&self, records: &[Record]) -> Result<()> {
        if !self.file_exists() {
            return Err(JsonBaseError::FileNotFound(self.path.clone()));
        }

        match self.write_mode {
            WriteMode::Atomic => self.save_atomic(records),
            WriteMode::InPlace => self.save_in_place(records),
        }
    }

    fn save_atomic(&self, records: &[Record]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Temp file must live in the target's directory for rename to be atomic
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            encode_records(&mut writer, records)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        // Temp files are created 0600; the replacement keeps the original mode
        fs::set_permissions(tmp.path(), fs::metadata(&self.path)?.permissions())?;

        tmp.persist(&self.path).map_err(|e| JsonBaseError::Io(e.error))?;

        // fsync directory so the rename itself is durable
        #[cfg(unix)]
        File::open(dir)?.sync_all()?;

        Ok(())
    }

    fn save_in_place(&self, records: &[Record]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        encode_records(&mut writer, records)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        Ok(())
    }
}
