// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ecobee_lib` - A Rust library to control ecobee thermostats.
//!
//! This library provides async APIs for the ecobee cloud API: device-pin
//! authorization with persistent tokens, cheap change detection through
//! thermostat revisions, and thermostat control.
//!
//! # Supported Features
//!
//! - **Authorization**: Device-pin grant, token refresh, revocation recovery
//! - **Polling**: `thermostatSummary` revision tracking, one request per poll
//! - **State**: Thermostat settings, runtime, equipment status, remote sensors
//! - **Control**: Temperature and climate holds, program resume
//! - **Reports**: Runtime reports with 5-minute intervals
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use ecobee_lib::{AuthOutcome, Ecobee, EcobeeConfig, HoldType};
//!
//! #[tokio::main]
//! async fn main() -> ecobee_lib::Result<()> {
//!     // Tokens are kept in $HOME/.config/ecobee unless configured otherwise
//!     let config = EcobeeConfig::new("my-api-key").with_thermostat_ids(["123456789"]);
//!     let (mut ecobee, outcome) = Ecobee::http(config).await?;
//!
//!     // First run: the user enters the pin in the ecobee portal
//!     if let AuthOutcome::PinIssued(grant) = &outcome {
//!         println!("{}", grant.instructions());
//!         ecobee.wait_for_authorization(Duration::from_secs(30)).await?;
//!     }
//!
//!     // Fetch only the thermostats that changed since the last poll
//!     for id in ecobee.refresh().await? {
//!         if let Some(thermostat) = ecobee.thermostat(&id) {
//!             println!("{} is at {:?}", thermostat.name(), thermostat.temperature());
//!         }
//!     }
//!
//!     ecobee
//!         .set_temperature("123456789", 68.0, 76.0, HoldType::NextTransition)
//!         .await?;
//!
//!     ecobee.close()?.close()?;
//!     Ok(())
//! }
//! ```
//!
//! # Re-authorization
//!
//! When the server reports a stale token (code 14) or a revoked authorization
//! (code 16), the call returns no result instead of an error. A refresh or a
//! new device pin is started and the request is not retried:
//!
//! ```no_run
//! # use ecobee_lib::{Ecobee, EcobeeConfig};
//! # async fn example() -> ecobee_lib::Result<()> {
//! # let (mut ecobee, _) = Ecobee::http(EcobeeConfig::new("key")).await?;
//! if !ecobee.set_away("123456789").await? {
//!     // Not applied; send it again once authorized
//!     ecobee.authorize(false).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
mod config;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod request;
pub mod response;
pub mod revision;
pub mod store;
pub mod types;

pub use auth::{AuthOutcome, AuthState, Authorizer, Credentials, PinGrant};
pub use client::Ecobee;
pub use config::{DEFAULT_SCOPE, EcobeeConfig};
pub use error::{ApiError, Error, ParseError, ProtocolError, Result, StoreError, ValueError};
pub use gateway::{API_VERSION, ApiGateway};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use protocol::{HttpMethod, Transport};
pub use revision::{RevisionEntry, RevisionTracker};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{HoldType, Temperature};
