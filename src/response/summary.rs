// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `thermostatSummary` response parsing.

use serde::Deserialize;

use crate::response::ApiStatus;

/// Response from `GET thermostatSummary`.
///
/// # Examples
///
/// ```
/// use ecobee_lib::response::ThermostatSummaryResponse;
///
/// let json = r#"{
///     "thermostatCount": 1,
///     "revisionList": ["123456789:Home:true:r1:r2:r3:REV1"],
///     "status": {"code": 0, "message": ""}
/// }"#;
/// let summary: ThermostatSummaryResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(summary.thermostat_count, 1);
/// assert_eq!(summary.revision_list.unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatSummaryResponse {
    /// Number of thermostats in the selection.
    #[serde(default)]
    pub thermostat_count: u32,

    /// Colon-delimited revision strings, one per thermostat.
    ///
    /// `None` when the server omitted the list.
    #[serde(default)]
    pub revision_list: Option<Vec<String>>,

    /// Colon-delimited equipment status strings, when requested.
    #[serde(default)]
    pub status_list: Vec<String>,

    /// Response status.
    #[serde(default)]
    pub status: Option<ApiStatus>,
}
