//! Transliteration dictionary backed by a flat CSV table

pub mod commands;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("dictionary file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read dictionary {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write dictionary {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Lowercased source words mapped to their target-script text.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every `source,target[,...]` row. Rows with fewer than two
    /// fields are skipped; a later row replaces an earlier one with the
    /// same normalized key.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DictionaryError::NotFound(path.to_path_buf()));
        }

        let read_err = |source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(read_err)?;

        let mut dictionary = Self::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = record.map_err(read_err)?;
            match (record.get(0), record.get(1)) {
                (Some(source), Some(target)) => dictionary.insert(source, target),
                _ => skipped += 1,
            }
        }

        tracing::debug!(
            "Loaded {} dictionary entries from {} ({} short rows skipped)",
            dictionary.len(),
            path.display(),
            skipped
        );

        Ok(dictionary)
    }

    pub fn insert(&mut self, source: &str, target: &str) {
        self.entries
            .insert(normalize_key(source), target.trim().to_string());
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(&normalize_key(token)).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>, T: AsRef<str>> FromIterator<(S, T)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (source, target) in iter {
            dictionary.insert(source.as_ref(), target.as_ref());
        }
        dictionary
    }
}

fn normalize_key(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Owns the backing table and a lazily loaded snapshot of it.
pub struct DictionaryStore {
    path: PathBuf,
    cached: Option<Dictionary>,
}

impl DictionaryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached mapping, loading it from disk if needed.
    pub fn get(&mut self) -> Result<&Dictionary, DictionaryError> {
        let dictionary = match self.cached.take() {
            Some(d) => d,
            None => Dictionary::load(&self.path)?,
        };
        Ok(self.cached.insert(dictionary))
    }

    /// Drops the cached mapping so the next `get` rereads the table.
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            tracing::debug!("Dictionary cache invalidated");
        }
    }

    pub fn reload(&mut self) -> Result<&Dictionary, DictionaryError> {
        self.invalidate();
        self.get()
    }

    /// Appends one row to the table and mirrors it into the cached mapping.
    /// The mapping is untouched when the write fails.
    pub fn append(&mut self, token: &str, value: &str) -> Result<(), DictionaryError> {
        let token = token.trim();
        let value = value.trim();

        append_row(&self.path, token, value).map_err(|source| DictionaryError::Write {
            path: self.path.clone(),
            source,
        })?;

        if let Some(dictionary) = self.cached.as_mut() {
            dictionary.insert(token, value);
        }

        tracing::info!("Appended '{}' to {}", token, self.path.display());
        Ok(())
    }
}

fn append_row(path: &Path, token: &str, value: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    // Keep the new row off the end of an unterminated last line
    if file.metadata()?.len() > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);
    writer.write_record([token, value]).map_err(io::Error::from)?;
    writer.flush()?;
    Ok(())
}
