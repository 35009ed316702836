// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authorization endpoint responses.

use serde::Deserialize;

/// Response from `GET authorize` with `response_type=ecobeePin`.
///
/// # Examples
///
/// ```
/// use ecobee_lib::response::PinResponse;
///
/// let json = r#"{"ecobeePin": "bv29", "code": "uiNQok", "scope": "smartWrite",
///                "expires_in": 9, "interval": 30}"#;
/// let pin: PinResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(pin.ecobee_pin, "bv29");
/// assert_eq!(pin.expires_in, 9);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PinResponse {
    /// Authorization code to exchange once the user approved the pin.
    pub code: String,
    /// Pin the user enters in the web portal.
    #[serde(rename = "ecobeePin")]
    pub ecobee_pin: String,
    /// Pin lifetime in minutes.
    pub expires_in: i64,
    /// Suggested polling interval in seconds.
    #[serde(default)]
    pub interval: Option<u64>,
    /// Granted scope.
    #[serde(default)]
    pub scope: Option<String>,
}

/// Response from `POST token` for both grant types.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// New access token.
    pub access_token: String,
    /// Token type, sent back in the `Authorization` header.
    pub token_type: String,
    /// New refresh token.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// Granted scope.
    #[serde(default)]
    pub scope: Option<String>,
}

/// Failure body from the `token` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    /// OAuth error code, e.g. `authorization_pending`.
    pub error: String,
    /// Human-readable description.
    #[serde(default)]
    pub error_description: String,
}

impl TokenErrorResponse {
    /// Error code returned while the user has not yet approved the pin.
    pub const AUTHORIZATION_PENDING: &'static str = "authorization_pending";

    /// Returns whether the server is still waiting for the user.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.error == Self::AUTHORIZATION_PENDING
    }
}
