//! Append-only CSV store for registration records.
//!
//! The store is a plain text file of comma-separated rows, prefixed with a
//! fixed header written once when the file is first used. Every mutation is
//! a single row append performed under an exclusive advisory lock, so
//! concurrent writers never interleave partial rows. Nothing here rewrites
//! or deletes a row.

use anyhow::{Context, Result};
use chrono::Local;
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column order of the store, header included.
pub const COLUMNS: [&str; 6] = [
    "timestamp",
    "fullname",
    "username",
    "email",
    "phone",
    "password_hash",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Server-clock timestamp in the fixed `YYYY-MM-DD HH:MM:SS` format.
#[must_use]
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One validated registration, persisted as one row.
///
/// `password_hash` holds the salted Argon2 digest, never the raw password.
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
    pub timestamp: String,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

impl RegistrationRecord {
    fn fields(&self) -> [&str; 6] {
        [
            &self.timestamp,
            &self.fullname,
            &self.username,
            &self.email,
            &self.phone,
            &self.password_hash,
        ]
    }
}

/// Handle to the flat-file store. Construction does no I/O; the file is
/// created on first append.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header row if the file is empty, creating the file if
    /// needed. Idempotent: the header is never written twice.
    pub fn ensure_header(&self) -> Result<()> {
        let file = self.open_locked()?;

        let outcome = Self::header_if_empty(&file);

        // Release the lock on every exit path
        let _ = file.unlock();

        outcome
    }

    /// Append one record, writing the header first when the file is new.
    /// The lock covers header and row, so a reader never observes a row
    /// without the header or a partially written row.
    pub fn append(&self, record: &RegistrationRecord) -> Result<()> {
        let file = self.open_locked()?;

        let outcome = Self::write_record(&file, record);

        // Release the lock on every exit path
        let _ = file.unlock();

        outcome
    }

    fn open_locked(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("unable to open data file {}", self.path.display()))?;

        file.lock()
            .with_context(|| format!("could not lock data file {}", self.path.display()))?;

        Ok(file)
    }

    fn header_if_empty(mut file: &File) -> Result<()> {
        let len = file
            .metadata()
            .context("unable to read data file metadata")?
            .len();

        if len == 0 {
            write_row(&mut file, &COLUMNS).context("unable to write data file header")?;
        }

        Ok(())
    }

    fn write_record(mut file: &File, record: &RegistrationRecord) -> Result<()> {
        Self::header_if_empty(file)?;

        write_row(&mut file, &record.fields()).context("unable to write data file row")?;

        file.sync_all().context("unable to flush data file")?;

        Ok(())
    }
}

// One row per write_all call, so the row hits the file in a single syscall.
fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let mut row = String::new();

    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            row.push(',');
        }
        row.push_str(&quote_field(field));
    }
    row.push('\n');

    writer.write_all(row.as_bytes())
}

// Standard CSV quoting: wrap the field in double quotes when it contains a
// comma, quote, CR or LF; embedded quotes are doubled.
fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
