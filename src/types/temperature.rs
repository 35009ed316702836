// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point temperature type.
//!
//! The ecobee API reports and accepts temperatures as integers in tenths of a
//! degree Fahrenheit (`718` is 71.8 °F). [`Temperature`] keeps that integer
//! internally and converts to floating point only at the boundary.

use std::fmt;

use crate::error::ValueError;

/// Temperature in tenths of a degree Fahrenheit.
///
/// # Examples
///
/// ```
/// use ecobee_lib::types::Temperature;
///
/// let t = Temperature::from_tenths(718);
/// assert_eq!(t.tenths(), 718);
/// assert!((t.as_fahrenheit() - 71.8).abs() < f64::EPSILON);
///
/// let setpoint = Temperature::setpoint(70.0).unwrap();
/// assert_eq!(setpoint.tenths(), 700);
///
/// // Setpoints outside what a thermostat accepts are rejected
/// assert!(Temperature::setpoint(150.0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Temperature(i32);

impl Temperature {
    /// Lowest setpoint accepted by [`setpoint`](Self::setpoint), in tenths.
    pub const MIN_SETPOINT: i32 = 320;

    /// Highest setpoint accepted by [`setpoint`](Self::setpoint), in tenths.
    pub const MAX_SETPOINT: i32 = 1200;

    /// Creates a temperature from the raw API value.
    #[must_use]
    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    /// Creates a temperature from degrees Fahrenheit, rounded to a tenth.
    ///
    /// Non-finite input saturates to the `i32` bounds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_fahrenheit(degrees: f64) -> Self {
        Self((degrees * 10.0).round() as i32)
    }

    /// Creates a temperature from degrees Celsius, rounded to a tenth of a
    /// degree Fahrenheit.
    #[must_use]
    pub fn from_celsius(degrees: f64) -> Self {
        Self::from_fahrenheit(degrees * 9.0 / 5.0 + 32.0)
    }

    /// Creates a setpoint, validating it against thermostat limits.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::TemperatureOutOfRange` if the value is outside
    /// 32.0 °F to 120.0 °F.
    pub fn setpoint(fahrenheit: f64) -> Result<Self, ValueError> {
        let value = Self::from_fahrenheit(fahrenheit);
        if !(Self::MIN_SETPOINT..=Self::MAX_SETPOINT).contains(&value.0) {
            return Err(ValueError::TemperatureOutOfRange {
                min: Self::MIN_SETPOINT,
                max: Self::MAX_SETPOINT,
                actual: value.0,
            });
        }
        Ok(value)
    }

    /// Returns the raw value in tenths of a degree Fahrenheit.
    #[must_use]
    pub const fn tenths(&self) -> i32 {
        self.0
    }

    /// Returns degrees Fahrenheit.
    #[must_use]
    pub fn as_fahrenheit(&self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Returns degrees Celsius.
    #[must_use]
    pub fn as_celsius(&self) -> f64 {
        (self.as_fahrenheit() - 32.0) * 5.0 / 9.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°F", self.as_fahrenheit())
    }
}

impl From<Temperature> for i32 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}
