//! File-backed store
//!
//! Layout: one record per line, see [`crate::customer::encode_line`].
//!
//! `save_all` never truncates the live file in place:
//! 1. write the full record set to `<file>.tmp`
//! 2. fsync the temp file
//! 3. rename it over the live file
//! 4. fsync the directory
//!
//! A reader therefore sees either the old record set or the new one.
//!
//! Lines are decoded one at a time, so a line in a foreign encoding is
//! a malformed record like any other and does not poison the whole file.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::customer::{decode_line, encode_line, Customer, DecodeError};
use crate::observability::Event;

use super::{CustomerStore, ParseMode, StoreError, StoreResult};

/// Store backed by a single `|`-delimited text file.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
    temp_path: PathBuf,
    mode: ParseMode,
}

impl FlatFileStore {
    /// Opens the store at `path`, creating the file (and its parent
    /// directory) if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>, mode: ParseMode) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io("create directory", parent, e))?;
        }

        if !path.exists() {
            File::create(&path).map_err(|e| StoreError::io("create", &path, e))?;
            debug!(path = %path.display(), "created empty data file");
        }

        Ok(Self {
            temp_path: temp_path_for(&path),
            path,
            mode,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse mode used by `load_all`
    pub fn mode(&self) -> ParseMode {
        self.mode
    }
}

impl CustomerStore for FlatFileStore {
    fn load_all(&self) -> StoreResult<Vec<Customer>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io("read", &self.path, e)),
        };

        parse_lines(&content, self.mode)
    }

    fn save_all(&mut self, customers: &[Customer]) -> StoreResult<()> {
        let mut content = String::with_capacity(customers.len() * 128);
        for customer in customers {
            content.push_str(&encode_line(customer));
            content.push('\n');
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(|e| StoreError::io("create", &self.temp_path, e))?;

        file.write_all(content.as_bytes())
            .map_err(|e| StoreError::io("write", &self.temp_path, e))?;

        file.sync_all()
            .map_err(|e| StoreError::io("fsync", &self.temp_path, e))?;

        fs::rename(&self.temp_path, &self.path)
            .map_err(|e| StoreError::io("replace", &self.path, e))?;

        // Best effort: not every platform can open a directory for fsync.
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        debug!(
            event = %Event::StoreRewritten,
            path = %self.path.display(),
            records = customers.len(),
            "data file rewritten"
        );

        Ok(())
    }
}

/// Decodes file content according to `mode`. Blank lines are ignored.
///
/// Lines end in `\n`, optionally preceded by `\r`.
fn parse_lines(content: &[u8], mode: ParseMode) -> StoreResult<Vec<Customer>> {
    let mut customers = Vec::new();
    let mut skipped = 0usize;

    for (idx, raw) in content.split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let decoded = match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => decode_line(line),
            Err(e) => Err(DecodeError::Encoding(e)),
        };

        match decoded {
            Ok(customer) => customers.push(customer),
            Err(reason) => match mode {
                ParseMode::Lenient => {
                    skipped += 1;
                    warn!(
                        event = %Event::MalformedLineSkipped,
                        line = idx + 1,
                        %reason,
                        "skipping malformed record"
                    );
                }
                ParseMode::Strict => {
                    warn!(
                        event = %Event::MalformedLineRejected,
                        line = idx + 1,
                        %reason,
                        "malformed record in strict mode"
                    );
                    return Err(StoreError::Malformed {
                        line: idx + 1,
                        reason,
                    });
                }
            },
        }
    }

    if skipped > 0 {
        warn!(
            event = %Event::MalformedLineSkipped,
            skipped,
            kept = customers.len(),
            "malformed records will be dropped from the file on the next write"
        );
    }

    Ok(customers)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
