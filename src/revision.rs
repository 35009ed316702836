// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change detection from `thermostatSummary` revision strings.
//!
//! The summary endpoint returns one colon-delimited revision string per
//! thermostat. Comparing the interval revision against the last value seen
//! tells which thermostats changed without fetching their full state.
//!
//! # Examples
//!
//! ```
//! use ecobee_lib::revision::RevisionTracker;
//!
//! let mut tracker = RevisionTracker::new();
//!
//! let changed = tracker.diff([("123", "REV1"), ("456", "REV2")]);
//! assert_eq!(changed.len(), 2);
//!
//! // Same snapshot again: nothing changed
//! assert!(tracker.diff([("123", "REV1"), ("456", "REV2")]).is_empty());
//!
//! let changed = tracker.diff([("123", "REV3"), ("456", "REV2")]);
//! assert!(changed.contains("123"));
//! assert_eq!(changed.len(), 1);
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::error::ParseError;

/// One parsed entry of a summary `revisionList`.
///
/// Wire format: `identifier:name:connected:thermostatRev:alertsRev:runtimeRev:intervalRev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionEntry {
    /// Thermostat identifier.
    pub identifier: String,
    /// Thermostat name.
    pub name: String,
    /// Whether the thermostat is connected.
    pub connected: bool,
    /// Thermostat revision: settings or program changed.
    pub thermostat_revision: String,
    /// Alerts revision.
    pub alerts_revision: String,
    /// Runtime revision: equipment status changed.
    pub runtime_revision: String,
    /// Interval revision: new runtime data, the tracked fingerprint.
    pub interval_revision: String,
}

impl RevisionEntry {
    /// Number of fields in a revision string.
    pub const FIELD_COUNT: usize = 7;

    /// Parses a revision string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the string has fewer than seven
    /// fields.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() < Self::FIELD_COUNT {
            return Err(ParseError::InvalidValue {
                field: "revisionList".to_string(),
                message: format!(
                    "expected {} fields, found {} in {line:?}",
                    Self::FIELD_COUNT,
                    parts.len()
                ),
            });
        }

        Ok(Self {
            identifier: parts[0].to_string(),
            name: parts[1].to_string(),
            connected: parts[2] == "true",
            thermostat_revision: parts[3].to_string(),
            alerts_revision: parts[4].to_string(),
            runtime_revision: parts[5].to_string(),
            interval_revision: parts[6].to_string(),
        })
    }
}

/// Remembers the last fingerprint seen per device and reports deltas.
///
/// Fingerprints are compared for equality only. The tracker never forgets a
/// device: ids missing from a snapshot keep their stored fingerprint.
#[derive(Debug, Clone, Default)]
pub struct RevisionTracker {
    last_seen: HashMap<String, String>,
}

impl RevisionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ids whose fingerprint differs from the stored one.
    ///
    /// Newly seen ids count as changed. Each reported id has its stored
    /// fingerprint updated by this call, so a change is reported once.
    pub fn diff<I, K, V>(&mut self, snapshot: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut changed = BTreeSet::new();

        for (id, fingerprint) in snapshot {
            let id = id.into();
            let fingerprint = fingerprint.into();

            if self.last_seen.get(&id) == Some(&fingerprint) {
                continue;
            }

            tracing::trace!(device = %id, fingerprint = %fingerprint, "Fingerprint changed");
            self.last_seen.insert(id.clone(), fingerprint);
            changed.insert(id);
        }

        changed
    }

    /// Parses a `revisionList` and returns the changed ids.
    ///
    /// Malformed entries are skipped with a warning.
    pub fn diff_revisions<S: AsRef<str>>(&mut self, revision_list: &[S]) -> BTreeSet<String> {
        let snapshot = revision_list
            .iter()
            .filter_map(|line| match RevisionEntry::parse(line.as_ref()) {
                Ok(entry) => Some((entry.identifier, entry.interval_revision)),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed revision entry");
                    None
                }
            })
            .collect::<Vec<_>>();
        self.diff(snapshot)
    }

    /// Returns the last fingerprint seen for a device.
    #[must_use]
    pub fn last_seen(&self, id: &str) -> Option<&str> {
        self.last_seen.get(id).map(String::as_str)
    }

    /// Returns the number of tracked devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    /// Returns whether no device has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }
}
