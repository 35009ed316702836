// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the ecobee library.
//!
//! This module provides the error hierarchy for failures across the library:
//! transport communication, vendor API errors, JSON parsing, token storage
//! and value validation.
//!
//! Two server conditions are deliberately absent: "auth token needs refresh"
//! (code 14) and "auth revoked" (code 16). Those are handled inside the
//! gateway and surface to callers only as an absent result.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The server could not be reached.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The API answered with a non-success status and a well-formed error body.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The API answered with a non-success status and a body that is not
    /// structured error data.
    #[error("malformed response (HTTP {status}): {body}")]
    MalformedResponse {
        /// HTTP status of the response.
        status: u16,
        /// The raw response text.
        body: String,
    },

    /// A success response could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The token store failed.
    #[error("token store error: {0}")]
    Store(#[from] StoreError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// An API call was attempted while no access token is held.
    #[error("authorization required (pin pending: {pin_pending})")]
    AuthorizationRequired {
        /// Whether a device pin has been issued and is awaiting the user.
        pin_pending: bool,
    },

    /// The thermostat is not part of the device registry.
    #[error("unknown thermostat: {0}")]
    UnknownThermostat(String),
}

/// An error reported by the ecobee API in its `status` object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Vendor status code.
    pub code: i64,
    /// Vendor status message.
    pub message: String,
}

/// Errors related to transport communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the server failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to the persistent token store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object.
    #[error("invalid store contents: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored field has an unexpected shape.
    #[error("corrupt field {key}: {message}")]
    Corrupt {
        /// The store key.
        key: String,
        /// What was wrong with the stored value.
        message: String,
    },

    /// No default location could be determined for the token file.
    #[error("could not determine the home directory")]
    NoHomeDirectory,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A temperature is outside what a thermostat accepts.
    #[error("temperature {actual} is out of range [{min}, {max}] (tenths of a degree)")]
    TemperatureOutOfRange {
        /// Minimum allowed value.
        min: i32,
        /// Maximum allowed value.
        max: i32,
        /// The actual value that was provided.
        actual: i32,
    },

    /// Hold hours must be positive.
    #[error("hold hours must be at least 1")]
    InvalidHoldHours,

    /// A report window ends before it starts.
    #[error("report window ends before it starts")]
    InvalidDateRange,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
