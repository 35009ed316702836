// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated API calls.
//!
//! [`ApiGateway`] makes sure tokens are valid, attaches them, sends one
//! request and classifies the answer. Two server conditions never reach the
//! caller as errors:
//!
//! - code 14, the access token needs a refresh: a forced refresh is scheduled
//!   for the next call;
//! - code 16, the authorization was revoked: the tokens are cleared and a new
//!   device pin is requested.
//!
//! In both cases the call yields `Ok(None)` and the request is **not**
//! retried. The caller decides whether to send it again once authorized.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{AuthOutcome, AuthState, Authorizer};
use crate::error::{Error, ParseError, Result, StoreError};
use crate::protocol::{
    AUTHORIZATION, ApiRequest, CONTENT_TYPE, HttpMethod, JSON_CONTENT_TYPE, RawResponse, Transport,
};
use crate::response::{ErrorResponse, StatusKind};
use crate::store::TokenStore;

/// API version prefixed to every endpoint path.
pub const API_VERSION: &str = "1";

/// Server conditions handled here and hidden from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interruption {
    RefreshNeeded,
    Revoked,
}

/// Sends authenticated requests to the ecobee API.
#[derive(Debug)]
pub struct ApiGateway<T, S> {
    transport: T,
    authorizer: Authorizer<S>,
}

impl<T: Transport, S: TokenStore> ApiGateway<T, S> {
    /// Creates a gateway.
    pub fn new(transport: T, authorizer: Authorizer<S>) -> Self {
        Self {
            transport,
            authorizer,
        }
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the authorizer.
    pub fn authorizer(&self) -> &Authorizer<S> {
        &self.authorizer
    }

    /// Returns the authorizer mutably.
    pub fn authorizer_mut(&mut self) -> &mut Authorizer<S> {
        &mut self.authorizer
    }

    /// Runs one authorization step.
    ///
    /// # Errors
    ///
    /// See [`Authorizer::ensure_valid`].
    pub async fn ensure_authorized(&mut self, force: bool) -> Result<AuthOutcome> {
        self.authorizer.ensure_valid(&self.transport, force).await
    }

    /// Flushes the token store and returns it.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be flushed.
    pub fn close(self) -> std::result::Result<S, StoreError> {
        self.authorizer.into_store()
    }

    /// Calls an API endpoint.
    ///
    /// `GET` sends `payload` as JSON in the `json` query parameter; `POST`
    /// sends it as the body. Returns `Ok(None)` when the server asked for a
    /// token refresh or revoked the authorization.
    ///
    /// # Errors
    ///
    /// - [`Error::Protocol`] if the server cannot be reached.
    /// - [`Error::Api`] for any other vendor error status.
    /// - [`Error::MalformedResponse`] if an error body is not JSON.
    /// - [`Error::AuthorizationRequired`] if no access token is held yet.
    pub async fn call<P>(
        &mut self,
        method: HttpMethod,
        endpoint: &str,
        payload: &P,
    ) -> Result<Option<Value>>
    where
        P: Serialize + ?Sized,
    {
        let outcome = self.ensure_authorized(false).await?;
        if !outcome.is_ready() {
            tracing::debug!(?outcome, "Authorization not complete");
        }

        let state = self.authorizer.state()?;
        let Some(authorization) = state.authorization_header() else {
            return Err(Error::AuthorizationRequired {
                pin_pending: matches!(state, AuthState::PendingUserGrant { .. }),
            });
        };

        let json = serde_json::to_string(payload).map_err(ParseError::from)?;
        let path = format!("{API_VERSION}/{endpoint}");
        let request = match method {
            HttpMethod::Get => ApiRequest::get(path).query("json", json),
            HttpMethod::Post => ApiRequest::post(path).body(json),
        }
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(AUTHORIZATION, authorization);

        tracing::debug!(method = method.as_str(), endpoint, "Calling API");
        let response = self.transport.execute(&request).await?;

        if response.is_success() {
            return Ok(Some(response.json()?));
        }

        match classify(&response)? {
            Interruption::RefreshNeeded => {
                self.authorizer.on_refresh_needed();
            }
            Interruption::Revoked => {
                let outcome = self.authorizer.on_revoked(&self.transport).await?;
                tracing::debug!(?outcome, "Authorization restarted");
            }
        }
        Ok(None)
    }

    /// Calls a `GET` endpoint and parses the response.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call). Also returns [`Error::Parse`] if the response
    /// does not match `R`.
    pub async fn get<P, R>(&mut self, endpoint: &str, payload: &P) -> Result<Option<R>>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self.call(HttpMethod::Get, endpoint, payload).await?;
        decode(value)
    }

    /// Calls a `POST` endpoint and parses the response.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call). Also returns [`Error::Parse`] if the response
    /// does not match `R`.
    pub async fn post<P, R>(&mut self, endpoint: &str, payload: &P) -> Result<Option<R>>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self.call(HttpMethod::Post, endpoint, payload).await?;
        decode(value)
    }
}

fn decode<R: DeserializeOwned>(value: Option<Value>) -> Result<Option<R>> {
    Ok(value
        .map(serde_json::from_value)
        .transpose()
        .map_err(ParseError::from)?)
}

/// Classifies a non-success response.
fn classify(response: &RawResponse) -> Result<Interruption> {
    let Ok(error) = response.json::<ErrorResponse>() else {
        tracing::debug!(status = response.status(), body = %response.body(), "Unstructured error body");
        return Err(Error::MalformedResponse {
            status: response.status(),
            body: response.body().to_string(),
        });
    };

    match error.status.kind() {
        StatusKind::RefreshNeeded => {
            tracing::info!(code = error.status.code, "Access token needs a refresh");
            Ok(Interruption::RefreshNeeded)
        }
        StatusKind::Revoked => {
            tracing::warn!(code = error.status.code, "Authorization revoked");
            Ok(Interruption::Revoked)
        }
        StatusKind::Success | StatusKind::Failure => {
            tracing::debug!(
                status = response.status(),
                code = error.status.code,
                message = %error.status.message,
                "API error"
            );
            Err(Error::Api(error.status.into()))
        }
    }
}
