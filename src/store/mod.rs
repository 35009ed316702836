// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistent storage for the credential record.
//!
//! The authorization state machine reads and writes five fields through the
//! [`TokenStore`] trait: [`ACCESS_TOKEN`], [`REFRESH_TOKEN`], [`TOKEN_TYPE`],
//! [`EXPIRATION`] and [`REQUIRED`]. A field set to `Value::Null` is cleared.
//!
//! # Implementations
//!
//! - [`MemoryTokenStore`]: in-process map, lost on exit
//! - [`FileTokenStore`]: JSON file that survives restarts
//! - `Arc<Mutex<S>>`: shares any store between owners
//!
//! # Concurrency
//!
//! The credential record is read, recomputed and written back without any
//! atomicity. Stores take `&mut self` for writes; callers that share one store
//! between several clients must serialize the clients themselves.

mod file;

pub use file::FileTokenStore;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::StoreError;

/// Key holding the access token (or the pin code while a grant is pending).
pub const ACCESS_TOKEN: &str = "access_token";
/// Key holding the refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";
/// Key holding the token type tag.
pub const TOKEN_TYPE: &str = "token_type";
/// Key holding the absolute expiration timestamp.
pub const EXPIRATION: &str = "expiration";
/// Key holding whether a full authorization is still required.
pub const REQUIRED: &str = "required";

/// A key-value store for the credential record.
pub trait TokenStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Stores several fields as one write.
    ///
    /// The default stores each field in turn. Stores backed by a file
    /// override it so the record is persisted once.
    ///
    /// # Errors
    ///
    /// Returns error if the values cannot be persisted.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Returns whether `key` has been stored, even if it was cleared.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Writes any buffered state to its backing storage.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be persisted.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory [`TokenStore`].
///
/// # Examples
///
/// ```
/// use ecobee_lib::store::{MemoryTokenStore, TokenStore, REQUIRED};
/// use serde_json::json;
///
/// let mut store = MemoryTokenStore::new();
/// assert!(!store.contains(REQUIRED));
///
/// store.set(REQUIRED, json!(true)).unwrap();
/// assert_eq!(store.get(REQUIRED), Some(json!(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTokenStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: TokenStore> TokenStore for Arc<Mutex<S>> {
    fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.lock().set(key, value)
    }

    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<(), StoreError> {
        self.lock().set_many(entries)
    }

    fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.lock().flush()
    }
}
