// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `thermostat` response parsing.
//!
//! Only the objects this library reads are typed. Everything else the API
//! returns for a thermostat (program, events, alerts...) is kept as raw JSON.

use serde::Deserialize;

use crate::response::ApiStatus;
use crate::types::Temperature;

/// Response from `GET thermostat`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatResponse {
    /// The selected thermostats.
    #[serde(default)]
    pub thermostat_list: Vec<Thermostat>,

    /// Response status.
    #[serde(default)]
    pub status: Option<ApiStatus>,
}

/// A thermostat as returned by the API.
///
/// # Examples
///
/// ```
/// use ecobee_lib::response::Thermostat;
///
/// let json = r#"{
///     "identifier": "123456789",
///     "name": "Hallway",
///     "runtime": {"actualTemperature": 718, "actualHumidity": 42},
///     "equipmentStatus": "heatPump,fan"
/// }"#;
/// let thermostat: Thermostat = serde_json::from_str(json).unwrap();
/// assert_eq!(thermostat.name(), "Hallway");
/// assert_eq!(thermostat.temperature().unwrap().tenths(), 718);
/// assert_eq!(thermostat.running(), vec!["heatPump", "fan"]);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thermostat {
    /// Thermostat serial number.
    pub identifier: String,

    /// User-assigned name.
    #[serde(default)]
    pub name: String,

    /// Current thermostat revision.
    #[serde(default)]
    pub thermostat_rev: String,

    /// Model number.
    #[serde(default)]
    pub model_number: String,

    /// Settings object, when `includeSettings` was requested.
    #[serde(default)]
    pub settings: Option<Settings>,

    /// Runtime object, when `includeRuntime` was requested.
    #[serde(default)]
    pub runtime: Option<Runtime>,

    /// Comma-separated running equipment, when `includeEquipmentStatus` was requested.
    #[serde(default)]
    pub equipment_status: Option<String>,

    /// Remote sensors, when `includeSensors` was requested.
    #[serde(default)]
    pub remote_sensors: Vec<RemoteSensor>,

    /// Program object, when `includeProgram` was requested.
    #[serde(default)]
    pub program: Option<serde_json::Value>,

    /// Events, when `includeEvents` was requested.
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}

impl Thermostat {
    /// Returns the thermostat name, or `"pending"` if it was not fetched.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            "pending"
        } else {
            &self.name
        }
    }

    /// Returns the current temperature reported by the thermostat.
    #[must_use]
    pub fn temperature(&self) -> Option<Temperature> {
        self.runtime
            .as_ref()
            .and_then(|r| r.actual_temperature)
            .map(Temperature::from_tenths)
    }

    /// Returns the current relative humidity in percent.
    #[must_use]
    pub fn humidity(&self) -> Option<u8> {
        self.runtime.as_ref().and_then(|r| r.actual_humidity)
    }

    /// Returns the HVAC mode, e.g. `"heat"` or `"auto"`.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<&str> {
        self.settings.as_ref().and_then(|s| s.hvac_mode.as_deref())
    }

    /// Returns the running equipment, e.g. `["compCool1", "fan"]`.
    #[must_use]
    pub fn running(&self) -> Vec<&str> {
        self.equipment_status
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns all remote sensors.
    #[must_use]
    pub fn sensors(&self) -> &[RemoteSensor] {
        &self.remote_sensors
    }

    /// Returns the remote sensor with the given id.
    #[must_use]
    pub fn sensor(&self, id: &str) -> Option<&RemoteSensor> {
        self.remote_sensors.iter().find(|s| s.id == id)
    }
}

/// Subset of the thermostat settings object.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// HVAC mode: `auto`, `auxHeatOnly`, `cool`, `heat` or `off`.
    #[serde(default)]
    pub hvac_mode: Option<String>,

    /// Whether the thermostat displays Celsius.
    #[serde(default)]
    pub use_celsius: bool,

    /// Highest heat setpoint allowed.
    #[serde(default)]
    pub heat_range_high: Option<Temperature>,

    /// Lowest heat setpoint allowed.
    #[serde(default)]
    pub heat_range_low: Option<Temperature>,

    /// Highest cool setpoint allowed.
    #[serde(default)]
    pub cool_range_high: Option<Temperature>,

    /// Lowest cool setpoint allowed.
    #[serde(default)]
    pub cool_range_low: Option<Temperature>,
}

/// Subset of the thermostat runtime object.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Runtime {
    /// Whether the thermostat is connected to the server.
    #[serde(default)]
    pub connected: bool,

    /// Current temperature in tenths of a degree Fahrenheit.
    #[serde(default)]
    pub actual_temperature: Option<i32>,

    /// Current relative humidity in percent.
    #[serde(default)]
    pub actual_humidity: Option<u8>,

    /// Active heat setpoint.
    #[serde(default)]
    pub desired_heat: Option<Temperature>,

    /// Active cool setpoint.
    #[serde(default)]
    pub desired_cool: Option<Temperature>,

    /// Active fan mode.
    #[serde(default)]
    pub desired_fan_mode: Option<String>,

    /// Last time the runtime was modified, thermostat time.
    #[serde(default)]
    pub last_status_modified: Option<String>,
}

/// A remote sensor attached to a thermostat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSensor {
    /// Sensor id, unique within a thermostat (e.g. `"rs:100"`).
    pub id: String,

    /// User-assigned name.
    #[serde(default)]
    pub name: String,

    /// Sensor type, e.g. `"thermostat"` or `"ecobee3_remote_sensor"`.
    #[serde(rename = "type", default)]
    pub sensor_type: Option<String>,

    /// Pairing code.
    #[serde(default)]
    pub code: Option<String>,

    /// Whether the sensor participates in the current climate.
    #[serde(default)]
    pub in_use: bool,

    /// Reported capabilities.
    #[serde(default)]
    pub capability: Vec<SensorCapability>,
}

impl RemoteSensor {
    /// Returns the sensor name, or `"pending"` if it was not fetched.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            "pending"
        } else {
            &self.name
        }
    }

    /// Returns the capability of the given type.
    #[must_use]
    pub fn capability(&self, capability_type: &str) -> Option<&SensorCapability> {
        self.capability
            .iter()
            .find(|c| c.capability_type == capability_type)
    }

    /// Returns the temperature, or `None` if unsupported or unknown.
    #[must_use]
    pub fn temperature(&self) -> Option<Temperature> {
        self.capability("temperature")
            .and_then(|c| c.value.parse::<i32>().ok())
            .map(Temperature::from_tenths)
    }

    /// Returns the relative humidity in percent, or `None` if unsupported.
    #[must_use]
    pub fn humidity(&self) -> Option<u8> {
        self.capability("humidity")
            .and_then(|c| c.value.parse::<u8>().ok())
    }

    /// Returns whether the sensor detects occupancy, or `None` if unsupported.
    #[must_use]
    pub fn occupancy(&self) -> Option<bool> {
        self.capability("occupancy")
            .and_then(|c| match c.value.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            })
    }
}

/// A single capability reading of a remote sensor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorCapability {
    /// Capability id.
    #[serde(default)]
    pub id: String,

    /// `temperature`, `humidity`, `occupancy`...
    #[serde(rename = "type")]
    pub capability_type: String,

    /// Raw value as reported, e.g. `"718"`, `"true"` or `"unknown"`.
    #[serde(default)]
    pub value: String,
}
