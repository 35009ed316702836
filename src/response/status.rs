// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API status object parsing.

use serde::Deserialize;

use crate::error::ApiError;

/// How the gateway must react to an [`ApiStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Code 0, the request succeeded.
    Success,
    /// The access token is stale and must be refreshed.
    RefreshNeeded,
    /// The authorization was revoked; the device-pin flow must restart.
    Revoked,
    /// Any other vendor error.
    Failure,
}

/// The `status` object carried by every API response.
///
/// # Examples
///
/// ```
/// use ecobee_lib::response::{ApiStatus, StatusKind};
///
/// let status: ApiStatus =
///     serde_json::from_str(r#"{"code": 14, "message": "Authentication token has expired."}"#)
///         .unwrap();
/// assert_eq!(status.kind(), StatusKind::RefreshNeeded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiStatus {
    /// Vendor status code.
    pub code: i64,
    /// Vendor status message.
    #[serde(default)]
    pub message: String,
}

impl ApiStatus {
    /// Code meaning the access token must be refreshed.
    pub const REFRESH_NEEDED: i64 = 14;
    /// Code meaning the authorization was revoked.
    pub const REVOKED: i64 = 16;

    /// Classifies this status.
    #[must_use]
    pub fn kind(&self) -> StatusKind {
        match self.code {
            0 => StatusKind::Success,
            Self::REFRESH_NEEDED => StatusKind::RefreshNeeded,
            Self::REVOKED => StatusKind::Revoked,
            _ => StatusKind::Failure,
        }
    }
}

impl From<ApiStatus> for ApiError {
    fn from(status: ApiStatus) -> Self {
        Self {
            code: status.code,
            message: status.message,
        }
    }
}

/// Body of a non-success API response: `{"status": {"code": .., "message": ..}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// The status object.
    pub status: ApiStatus,
}
