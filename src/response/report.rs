// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `runtimeReport` response parsing.

use serde::Deserialize;

use crate::response::ApiStatus;

/// Response from `GET runtimeReport`.
///
/// Dates and times are in thermostat local time; temperatures in °F.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeReportResponse {
    /// First day of the report, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: String,

    /// First 5-minute interval of the first day (0-287).
    #[serde(default)]
    pub start_interval: u32,

    /// Last day of the report, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: String,

    /// Last 5-minute interval of the last day (0-287).
    #[serde(default)]
    pub end_interval: u32,

    /// Comma-separated column names, in row order.
    #[serde(default)]
    pub columns: String,

    /// One report per thermostat.
    #[serde(default)]
    pub report_list: Vec<RuntimeReport>,

    /// Sensor data, when `includeSensors` was requested.
    #[serde(default)]
    pub sensor_list: Vec<serde_json::Value>,

    /// Response status.
    #[serde(default)]
    pub status: Option<ApiStatus>,
}

impl RuntimeReportResponse {
    /// Returns the column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.split(',').filter(|c| !c.is_empty()).collect()
    }

    /// Returns the report for a thermostat.
    #[must_use]
    pub fn report(&self, identifier: &str) -> Option<&RuntimeReport> {
        self.report_list
            .iter()
            .find(|r| r.thermostat_identifier == identifier)
    }
}

/// Runtime rows for a single thermostat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeReport {
    /// Thermostat identifier.
    pub thermostat_identifier: String,

    /// Number of rows.
    #[serde(default)]
    pub row_count: u32,

    /// CSV rows: date, time, then one value per column.
    #[serde(default)]
    pub row_list: Vec<String>,
}
