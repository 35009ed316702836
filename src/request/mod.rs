// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed request payloads for the ecobee API.
//!
//! Each endpoint gets its own struct; serde annotations produce the exact
//! camelCase field names the API expects.
//!
//! # Available Requests
//!
//! | Request | Endpoint | Method |
//! |---------|----------|--------|
//! | [`SummaryRequest`] | `thermostatSummary` | GET |
//! | [`ThermostatRequest`] | `thermostat` | GET |
//! | [`RuntimeReportRequest`] | `runtimeReport` | GET |
//! | [`FunctionRequest`] | `thermostat` | POST |
//!
//! # Examples
//!
//! ```
//! use ecobee_lib::request::{Hold, Selection, FunctionRequest};
//! use ecobee_lib::types::Temperature;
//!
//! let hold = Hold::temperatures(Temperature::from_tenths(680), Temperature::from_tenths(760));
//! let request = FunctionRequest::set_hold(Selection::thermostats(["123456789"]), hold);
//!
//! let json = serde_json::to_value(&request).unwrap();
//! assert_eq!(json["functions"][0]["type"], "setHold");
//! assert_eq!(json["functions"][0]["params"]["heatHoldTemp"], 680);
//! ```

mod function;
mod report;

pub use function::{Function, FunctionRequest, Hold, ResumeProgramParams, SetHoldParams};
pub use report::{REPORT_COLUMNS, RuntimeReportRequest};

use serde::Serialize;

/// Which thermostats a request applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionType {
    /// Every thermostat registered to the account.
    #[default]
    Registered,
    /// The thermostats listed in `selectionMatch`.
    Thermostats,
}

/// Optional objects to include in a `thermostat` response.
///
/// Flags left `false` are omitted from the payload.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Includes {
    /// Include the device object.
    #[serde(skip_serializing_if = "is_false")]
    pub include_device: bool,
    /// Include the program object.
    #[serde(skip_serializing_if = "is_false")]
    pub include_program: bool,
    /// Include the runtime object.
    #[serde(skip_serializing_if = "is_false")]
    pub include_runtime: bool,
    /// Include the events list.
    #[serde(skip_serializing_if = "is_false")]
    pub include_events: bool,
    /// Include the equipment status string.
    #[serde(skip_serializing_if = "is_false")]
    pub include_equipment_status: bool,
    /// Include remote sensors.
    #[serde(skip_serializing_if = "is_false")]
    pub include_sensors: bool,
    /// Include the settings object.
    #[serde(skip_serializing_if = "is_false")]
    pub include_settings: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Includes {
    /// Includes nothing beyond the thermostat identity.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Includes the objects needed to read current conditions:
    /// runtime, settings, equipment status and sensors.
    #[must_use]
    pub fn current_state() -> Self {
        Self {
            include_runtime: true,
            include_settings: true,
            include_equipment_status: true,
            include_sensors: true,
            ..Self::default()
        }
    }

    /// Includes every supported object.
    #[must_use]
    pub fn all() -> Self {
        Self {
            include_device: true,
            include_program: true,
            include_runtime: true,
            include_events: true,
            include_equipment_status: true,
            include_sensors: true,
            include_settings: true,
        }
    }
}

/// The `selection` object present in every request.
///
/// # Examples
///
/// ```
/// use ecobee_lib::request::Selection;
///
/// let selection = Selection::thermostats(["123", "456"]);
/// let json = serde_json::to_value(&selection).unwrap();
/// assert_eq!(json["selectionType"], "thermostats");
/// assert_eq!(json["selectionMatch"], "123:456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Selection type.
    pub selection_type: SelectionType,
    /// Colon-separated identifiers, empty for `registered`.
    pub selection_match: String,
    /// Included objects.
    #[serde(flatten)]
    pub includes: Includes,
}

impl Selection {
    /// Selects every registered thermostat.
    #[must_use]
    pub fn registered() -> Self {
        Self {
            selection_type: SelectionType::Registered,
            selection_match: String::new(),
            includes: Includes::none(),
        }
    }

    /// Selects the given thermostats.
    #[must_use]
    pub fn thermostats<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection_match = ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(":");
        Self {
            selection_type: SelectionType::Thermostats,
            selection_match,
            includes: Includes::none(),
        }
    }

    /// Sets the included objects.
    #[must_use]
    pub fn with_includes(mut self, includes: Includes) -> Self {
        self.includes = includes;
        self
    }
}

/// Payload for `GET thermostatSummary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    /// The selection.
    pub selection: Selection,
}

impl SummaryRequest {
    /// Summary of every registered thermostat.
    #[must_use]
    pub fn registered() -> Self {
        Self {
            selection: Selection::registered(),
        }
    }
}

impl Default for SummaryRequest {
    fn default() -> Self {
        Self::registered()
    }
}

/// Payload for `GET thermostat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThermostatRequest {
    /// The selection.
    pub selection: Selection,
}

impl ThermostatRequest {
    /// Fetches the given thermostats with the given objects included.
    #[must_use]
    pub fn new<I, S>(ids: I, includes: Includes) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            selection: Selection::thermostats(ids).with_includes(includes),
        }
    }
}
