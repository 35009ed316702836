// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for ecobee JSON responses.
//!
//! This module provides structures for deserializing the JSON bodies returned
//! by the authorization and API endpoints. Field names follow the wire format
//! through serde rename annotations.

mod auth;
mod report;
mod status;
mod summary;
mod thermostat;

pub use auth::{PinResponse, TokenErrorResponse, TokenResponse};
pub use report::{RuntimeReport, RuntimeReportResponse};
pub use status::{ApiStatus, ErrorResponse, StatusKind};
pub use summary::ThermostatSummaryResponse;
pub use thermostat::{
    RemoteSensor, Runtime, SensorCapability, Settings, Thermostat, ThermostatResponse,
};
