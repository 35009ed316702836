// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for thermostat control.
//!
//! # Types
//!
//! - [`Temperature`] - Fixed-point tenths of a degree Fahrenheit
//! - [`HoldType`] - Duration of a schedule override

mod hold;
mod temperature;

pub use hold::HoldType;
pub use temperature::Temperature;
