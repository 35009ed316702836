// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON-file backed token store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StoreError;
use crate::store::TokenStore;

/// [`TokenStore`] persisted as a JSON object on disk.
///
/// The file is read once by [`open`](Self::open). Every [`set`](TokenStore::set)
/// and [`set_many`](TokenStore::set_many) writes the whole object back through
/// a temporary file and a rename, so a crash never leaves a half-written
/// record. The store owns no open file
/// handle between writes; [`close`](Self::close) consumes it and reports any
/// write that could not be completed earlier. Dropping the store retries such
/// a write and logs the outcome.
///
/// # Examples
///
/// ```no_run
/// use ecobee_lib::store::{FileTokenStore, TokenStore, REQUIRED};
///
/// # fn example() -> Result<(), ecobee_lib::error::StoreError> {
/// let mut store = FileTokenStore::open("/tmp/ecobee-tokens.json")?;
/// store.set(REQUIRED, serde_json::json!(true))?;
/// store.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
    dirty: bool,
}

impl FileTokenStore {
    /// Opens the store at `path`, loading its contents if the file exists.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or is not a JSON
    /// object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str::<Value>(&contents)? {
                    Value::Object(map) => map.into_iter().collect(),
                    other => {
                        return Err(StoreError::Corrupt {
                            key: path.display().to_string(),
                            message: format!("expected a JSON object, found {other}"),
                        });
                    }
                }
            }
        } else {
            tracing::debug!(path = %path.display(), "No token file yet, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Opens the store at [`default_path`](Self::default_path).
    ///
    /// # Errors
    ///
    /// Returns error if the home directory is unknown or the file is unreadable.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = Self::default_path().ok_or(StoreError::NoHomeDirectory)?;
        Self::open(path)
    }

    /// Returns the default token file location, `$HOME/.config/ecobee`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("ecobee");
            path
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes pending writes and releases the store.
    ///
    /// # Errors
    ///
    /// Returns error if a pending write still cannot be persisted.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.flush()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
        self.persist()
    }

    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value);
        }
        self.dirty = true;
        self.persist()
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }
}

impl Drop for FileTokenStore {
    fn drop(&mut self) {
        if self.dirty {
            match self.persist() {
                Ok(()) => tracing::debug!(path = %self.path.display(), "Flushed token file on drop"),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to flush token file");
                }
            }
        }
    }
}
