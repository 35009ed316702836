// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration.

use std::path::PathBuf;

use crate::error::StoreError;
#[cfg(feature = "http")]
use crate::protocol::HttpConfig;
use crate::store::FileTokenStore;

/// Scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "smartWrite";

/// Configuration for an [`Ecobee`](crate::Ecobee) client.
///
/// # Examples
///
/// ```
/// use ecobee_lib::EcobeeConfig;
///
/// let config = EcobeeConfig::new("my-api-key")
///     .with_thermostat_ids(["123456789", "987654321"])
///     .with_token_file("/var/lib/ecobee/tokens.json");
///
/// assert_eq!(config.scope, "smartWrite");
/// assert_eq!(config.thermostat_ids.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EcobeeConfig {
    /// Application key from the ecobee developer portal.
    pub api_key: String,
    /// Authorization scope (`smartRead` or `smartWrite`).
    pub scope: String,
    /// Thermostats known up front. Others are discovered by summary calls.
    pub thermostat_ids: Vec<String>,
    /// Token file location; `$HOME/.config/ecobee` when unset.
    pub token_file: Option<PathBuf>,
    /// HTTP transport settings.
    #[cfg(feature = "http")]
    pub http: HttpConfig,
}

impl EcobeeConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            scope: DEFAULT_SCOPE.to_string(),
            thermostat_ids: Vec::new(),
            token_file: None,
            #[cfg(feature = "http")]
            http: HttpConfig::default(),
        }
    }

    /// Sets the authorization scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the thermostats known up front.
    #[must_use]
    pub fn with_thermostat_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.thermostat_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the token file location.
    #[must_use]
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    /// Sets the HTTP transport settings.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Returns the token file location.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoHomeDirectory` if no file is configured and the
    /// home directory cannot be determined.
    pub fn token_path(&self) -> Result<PathBuf, StoreError> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => FileTokenStore::default_path().ok_or(StoreError::NoHomeDirectory),
        }
    }
}
