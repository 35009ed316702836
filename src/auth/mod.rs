// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OAuth token lifecycle for the ecobee API.
//!
//! ecobee authorizes applications with a device-pin grant: the library asks
//! for a short pin, the user enters it in the ecobee web portal, and the
//! library then exchanges the pin's code for access and refresh tokens.
//!
//! # States
//!
//! ```text
//! Unauthorized ──grant──▶ PendingUserGrant ──exchange──▶ Authorized
//!      ▲                      │ (pin expired: new grant)      │ ▲
//!      │                      ▼                               ▼ │ refresh
//!      └───────── revoked ──────────────────────────────── Expired
//! ```
//!
//! The state is never stored directly. It is derived from the credential
//! record in the [`TokenStore`](crate::store::TokenStore) each time it is
//! needed, so a restarted process resumes where it left off.
//!
//! # Soft failures
//!
//! Authorization is interactive. A transport failure or a refused request
//! while issuing a pin or exchanging tokens leaves the record untouched and
//! returns [`AuthOutcome::SoftFailed`]; the caller simply tries again later.

mod authorizer;

pub use authorizer::Authorizer;

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::StoreError;
use crate::store::{ACCESS_TOKEN, EXPIRATION, REFRESH_TOKEN, REQUIRED, TOKEN_TYPE, TokenStore};

/// Token type stored while a device pin awaits the user.
pub const PIN_TOKEN_TYPE: &str = "authorize";

/// Typed view of the credential record.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Access token, or the pin's authorization code while pending.
    pub access_token: Option<String>,
    /// Refresh token; absent until the first full authorization.
    pub refresh_token: Option<String>,
    /// Server-issued token type, or [`PIN_TOKEN_TYPE`] while pending.
    pub token_type: Option<String>,
    /// When the access token (or pending pin) expires.
    pub expiration: Option<DateTime<Utc>>,
    /// Whether a full authorization is still required.
    pub required: bool,
}

impl Credentials {
    /// Reads the record from a store.
    ///
    /// Missing and cleared fields read as `None`; a missing `required` flag
    /// reads as `true`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if a field has the wrong JSON type or the
    /// expiration is not an RFC 3339 timestamp.
    pub fn load<S: TokenStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let expiration = match string_field(store, EXPIRATION)? {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| StoreError::Corrupt {
                        key: EXPIRATION.to_string(),
                        message: e.to_string(),
                    })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        let required = match store.get(REQUIRED) {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                return Err(StoreError::Corrupt {
                    key: REQUIRED.to_string(),
                    message: format!("expected a boolean, found {other}"),
                });
            }
        };

        Ok(Self {
            access_token: string_field(store, ACCESS_TOKEN)?,
            refresh_token: string_field(store, REFRESH_TOKEN)?,
            token_type: string_field(store, TOKEN_TYPE)?,
            expiration,
            required,
        })
    }

    /// Writes every field of the record, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot persist a field.
    pub fn install<S: TokenStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set_many(vec![
            (ACCESS_TOKEN, optional_string(self.access_token.as_deref())),
            (TOKEN_TYPE, optional_string(self.token_type.as_deref())),
            (REFRESH_TOKEN, optional_string(self.refresh_token.as_deref())),
            (
                EXPIRATION,
                self.expiration
                    .map_or(Value::Null, |e| Value::String(e.to_rfc3339())),
            ),
            (REQUIRED, Value::Bool(self.required)),
        ])
    }

    /// Derives the authorization state at time `now`.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> AuthState {
        if let Some(refresh_token) = &self.refresh_token {
            return match (&self.access_token, &self.token_type, self.expiration) {
                (Some(access_token), Some(token_type), Some(expires_at)) if expires_at > now => {
                    AuthState::Authorized {
                        token_type: token_type.clone(),
                        access_token: access_token.clone(),
                        refresh_token: refresh_token.clone(),
                        expires_at,
                    }
                }
                _ => AuthState::Expired {
                    token_type: self.token_type.clone(),
                    access_token: self.access_token.clone(),
                    refresh_token: refresh_token.clone(),
                },
            };
        }

        if self.token_type.as_deref() == Some(PIN_TOKEN_TYPE) {
            if let (Some(code), Some(expires_at)) = (&self.access_token, self.expiration) {
                return AuthState::PendingUserGrant {
                    code: code.clone(),
                    expires_at,
                };
            }
        }

        AuthState::Unauthorized
    }
}

// Tokens are secrets; keep them out of debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .field("token_type", &self.token_type)
            .field("expiration", &self.expiration)
            .field("required", &self.required)
            .finish()
    }
}

fn string_field<S: TokenStore + ?Sized>(store: &S, key: &str) -> Result<Option<String>, StoreError> {
    match store.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(StoreError::Corrupt {
            key: key.to_string(),
            message: format!("expected a string, found {other}"),
        }),
    }
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

/// Authorization state derived from the credential record.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No refresh token and no pending pin.
    Unauthorized,
    /// A pin was issued and awaits the user's approval.
    PendingUserGrant {
        /// Authorization code to exchange for tokens.
        code: String,
        /// When the pin expires.
        expires_at: DateTime<Utc>,
    },
    /// Tokens are present and the access token has not expired.
    Authorized {
        /// Token type for the `Authorization` header.
        token_type: String,
        /// Access token.
        access_token: String,
        /// Refresh token.
        refresh_token: String,
        /// When the access token expires.
        expires_at: DateTime<Utc>,
    },
    /// A refresh token is present but the access token expired.
    Expired {
        /// Token type, if still known.
        token_type: Option<String>,
        /// Stale access token, if still known.
        access_token: Option<String>,
        /// Refresh token.
        refresh_token: String,
    },
}

impl AuthState {
    /// Returns the state name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::PendingUserGrant { .. } => "pending_user_grant",
            Self::Authorized { .. } => "authorized",
            Self::Expired { .. } => "expired",
        }
    }

    /// Returns the `Authorization` header value, if an access token is held.
    ///
    /// Expired tokens are still returned; the server answers with a
    /// refresh-needed status that the gateway handles.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Self::Authorized {
                token_type,
                access_token,
                ..
            }
            | Self::Expired {
                token_type: Some(token_type),
                access_token: Some(access_token),
                ..
            } => Some(format!("{token_type} {access_token}")),
            _ => None,
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingUserGrant { expires_at, .. } => f
                .debug_struct("PendingUserGrant")
                .field("expires_at", expires_at)
                .finish_non_exhaustive(),
            Self::Authorized {
                token_type,
                expires_at,
                ..
            } => f
                .debug_struct("Authorized")
                .field("token_type", token_type)
                .field("expires_at", expires_at)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}

/// A device pin the user must enter in the ecobee web portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinGrant {
    /// The pin to enter.
    pub pin: String,
    /// Minutes before the pin expires.
    pub expires_in_minutes: i64,
}

impl PinGrant {
    /// Returns instructions for the user.
    #[must_use]
    pub fn instructions(&self) -> String {
        format!(
            "Please log onto the ecobee web portal, select the menu in the top right \
             (3 lines), and select MY APPS. Next, click Add Application and enter the \
             following authorization code: {pin}. Then follow the prompts to add your \
             application. You have {minutes} minutes.",
            pin = self.pin,
            minutes = self.expires_in_minutes
        )
    }
}

/// Result of an authorization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Tokens were already valid; nothing was sent.
    Ready,
    /// The access token was refreshed.
    Refreshed,
    /// A pin exchange produced the first tokens.
    Authorized,
    /// A new pin was issued; the user must approve it.
    PinIssued(PinGrant),
    /// The pending pin has not been approved yet.
    AwaitingUser,
    /// The step failed in a way worth retrying later.
    SoftFailed(String),
}

impl AuthOutcome {
    /// Returns whether valid tokens are held after this step.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready | Self::Refreshed | Self::Authorized)
    }
}
