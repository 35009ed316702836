// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw transport used to reach the ecobee cloud API.
//!
//! The rest of the library only depends on the [`Transport`] trait: it sends
//! an [`ApiRequest`] and returns a [`RawResponse`] with the status and body
//! text. Interpretation of that response (auth signals, vendor errors) happens
//! in the [`gateway`](crate::gateway).
//!
//! # Transports
//!
//! - [`HttpTransport`]: reqwest-based HTTPS transport (feature `http`)

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};

use serde::de::DeserializeOwned;

use crate::error::{ParseError, ProtocolError};

/// Header carrying the credential on authenticated calls.
pub const AUTHORIZATION: &str = "Authorization";
/// Content type header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET` request; payloads travel in the query string.
    Get,
    /// `POST` request; payloads travel in the body.
    Post,
}

impl HttpMethod {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A request to be sent by a [`Transport`].
///
/// The path is relative to the transport's base URL, e.g. `"authorize"` or
/// `"1/thermostatSummary"`.
///
/// # Examples
///
/// ```
/// use ecobee_lib::protocol::{ApiRequest, HttpMethod};
///
/// let request = ApiRequest::get("authorize")
///     .query("response_type", "ecobeePin")
///     .query("client_id", "my-key");
///
/// assert_eq!(request.method(), HttpMethod::Get);
/// assert_eq!(request.query_value("client_id"), Some("my-key"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the first value of a query parameter.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the first value of a header, compared case-insensitively.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    /// Creates a response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the body cannot be parsed into the target type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Capability to send raw requests to the API.
///
/// Implementations return `Err` only when the server could not be reached;
/// any HTTP status, success or not, is an `Ok` response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends the request and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the server cannot be reached.
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ProtocolError>;
}

impl<T: Transport> Transport for &T {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ProtocolError> {
        (**self).execute(request).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for unit tests.

    use std::collections::VecDeque;

    use parking_lot::Mutex;

    use super::{ApiRequest, RawResponse, Transport};
    use crate::error::ProtocolError;

    /// Replays queued responses in order and records every request.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<RawResponse, ProtocolError>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
            self.replies
                .lock()
                .push_back(Ok(RawResponse::new(status, body.to_string())));
            self
        }

        pub(crate) fn reply_text(&self, status: u16, body: &str) -> &Self {
            self.replies
                .lock()
                .push_back(Ok(RawResponse::new(status, body)));
            self
        }

        pub(crate) fn fail(&self, message: &str) -> &Self {
            self.replies
                .lock()
                .push_back(Err(ProtocolError::ConnectionFailed(message.to_string())));
            self
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().clone()
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().len()
        }

        pub(crate) fn pending_replies(&self) -> usize {
            self.replies.lock().len()
        }
    }

    impl Transport for ScriptedTransport {
        async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ProtocolError> {
            self.requests.lock().push(request.clone());
            self.replies.lock().pop_front().unwrap_or_else(|| {
                Err(ProtocolError::ConnectionFailed(format!(
                    "no scripted reply for {} {}",
                    request.method().as_str(),
                    request.path()
                )))
            })
        }
    }
}
