// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat functions: holds and program resume.

use serde::Serialize;

use crate::request::Selection;
use crate::types::{HoldType, Temperature};

/// A schedule override to apply with `setHold`.
///
/// A hold either pins heat and cool setpoints or switches to a named climate
/// (`"home"`, `"away"`, `"sleep"` or a custom climate ref).
///
/// # Examples
///
/// ```
/// use ecobee_lib::request::Hold;
/// use ecobee_lib::types::{HoldType, Temperature};
///
/// let away = Hold::climate("away").with_hold_type(HoldType::Indefinite);
/// assert_eq!(away.climate_ref(), Some("away"));
///
/// let temps = Hold::temperatures(Temperature::from_tenths(690), Temperature::from_tenths(750));
/// assert_eq!(temps.hold_type(), HoldType::NextTransition);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hold {
    target: HoldTarget,
    hold_type: HoldType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HoldTarget {
    Temperatures { heat: Temperature, cool: Temperature },
    Climate(String),
}

impl Hold {
    /// Holds the given heat and cool setpoints.
    #[must_use]
    pub fn temperatures(heat: Temperature, cool: Temperature) -> Self {
        Self {
            target: HoldTarget::Temperatures { heat, cool },
            hold_type: HoldType::default(),
        }
    }

    /// Holds the named climate.
    #[must_use]
    pub fn climate(climate_ref: impl Into<String>) -> Self {
        Self {
            target: HoldTarget::Climate(climate_ref.into()),
            hold_type: HoldType::default(),
        }
    }

    /// Sets how long the hold lasts.
    #[must_use]
    pub fn with_hold_type(mut self, hold_type: HoldType) -> Self {
        self.hold_type = hold_type;
        self
    }

    /// Returns the hold duration type.
    #[must_use]
    pub fn hold_type(&self) -> HoldType {
        self.hold_type
    }

    /// Returns the climate ref for climate holds.
    #[must_use]
    pub fn climate_ref(&self) -> Option<&str> {
        match &self.target {
            HoldTarget::Climate(c) => Some(c),
            HoldTarget::Temperatures { .. } => None,
        }
    }

    fn into_params(self) -> SetHoldParams {
        let (heat_hold_temp, cool_hold_temp, hold_climate_ref) = match self.target {
            HoldTarget::Temperatures { heat, cool } => (Some(heat), Some(cool), None),
            HoldTarget::Climate(c) => (None, None, Some(c)),
        };
        SetHoldParams {
            hold_type: self.hold_type.as_str(),
            heat_hold_temp,
            cool_hold_temp,
            hold_climate_ref,
            hold_hours: self.hold_type.hold_hours(),
        }
    }
}

/// Wire parameters of the `setHold` function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetHoldParams {
    /// `nextTransition`, `indefinite` or `holdHours`.
    pub hold_type: &'static str,
    /// Heat setpoint in tenths of a degree Fahrenheit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_hold_temp: Option<Temperature>,
    /// Cool setpoint in tenths of a degree Fahrenheit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cool_hold_temp: Option<Temperature>,
    /// Climate to hold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_climate_ref: Option<String>,
    /// Duration for `holdHours`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_hours: Option<u32>,
}

/// Wire parameters of the `resumeProgram` function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProgramParams {
    /// Resume every stacked hold, not just the topmost.
    pub resume_all: bool,
}

/// A thermostat function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "params", rename_all = "camelCase")]
pub enum Function {
    /// Override the schedule.
    SetHold(SetHoldParams),
    /// Return to the schedule.
    ResumeProgram(ResumeProgramParams),
}

/// Payload for `POST thermostat` carrying functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRequest {
    /// The selection.
    pub selection: Selection,
    /// Functions to run, in order.
    pub functions: Vec<Function>,
}

impl FunctionRequest {
    /// Runs `setHold` on the selection.
    #[must_use]
    pub fn set_hold(selection: Selection, hold: Hold) -> Self {
        Self {
            selection,
            functions: vec![Function::SetHold(hold.into_params())],
        }
    }

    /// Runs `resumeProgram` on the selection.
    #[must_use]
    pub fn resume_program(selection: Selection, resume_all: bool) -> Self {
        Self {
            selection,
            functions: vec![Function::ResumeProgram(ResumeProgramParams { resume_all })],
        }
    }
}
