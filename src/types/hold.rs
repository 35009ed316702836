// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hold duration types.

use std::fmt;

use crate::error::ValueError;

/// How long a hold overrides the climate schedule.
///
/// # Examples
///
/// ```
/// use ecobee_lib::types::HoldType;
///
/// assert_eq!(HoldType::NextTransition.as_str(), "nextTransition");
/// assert_eq!(HoldType::hours(2).unwrap().hold_hours(), Some(2));
/// assert!(HoldType::hours(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoldType {
    /// Until the next scheduled program transition.
    #[default]
    NextTransition,
    /// Until the hold is explicitly resumed.
    Indefinite,
    /// For a number of hours.
    HoldHours(u32),
}

impl HoldType {
    /// Creates an hours-based hold.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHoldHours` if `hours` is zero.
    pub fn hours(hours: u32) -> Result<Self, ValueError> {
        if hours == 0 {
            return Err(ValueError::InvalidHoldHours);
        }
        Ok(Self::HoldHours(hours))
    }

    /// Returns the API `holdType` string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NextTransition => "nextTransition",
            Self::Indefinite => "indefinite",
            Self::HoldHours(_) => "holdHours",
        }
    }

    /// Returns the hour count for hours-based holds.
    #[must_use]
    pub const fn hold_hours(&self) -> Option<u32> {
        match self {
            Self::HoldHours(h) => Some(*h),
            _ => None,
        }
    }
}

impl fmt::Display for HoldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
