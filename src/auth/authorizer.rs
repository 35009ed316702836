// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authorization state machine.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

use crate::auth::{AuthOutcome, AuthState, Credentials, PIN_TOKEN_TYPE, PinGrant};
use crate::error::{Error, ParseError, StoreError};
use crate::protocol::{ApiRequest, CONTENT_TYPE, JSON_CONTENT_TYPE, RawResponse, Transport};
use crate::response::{PinResponse, TokenErrorResponse, TokenResponse};
use crate::store::{ACCESS_TOKEN, REFRESH_TOKEN, REQUIRED, TOKEN_TYPE, TokenStore};

const AUTHORIZE_PATH: &str = "authorize";
const TOKEN_PATH: &str = "token";

/// Which grant a token exchange uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    Pin,
    Refresh,
}

impl Grant {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Pin => "ecobeePin",
            Self::Refresh => "refresh_token",
        }
    }
}

/// Drives the OAuth token lifecycle over a [`TokenStore`].
///
/// The authorizer owns the store. It is used through `&mut self`: the record
/// is read, recomputed and written back without locking, so two authorizers
/// must never share a store unless the caller serializes them.
///
/// # Examples
///
/// ```no_run
/// use ecobee_lib::auth::{AuthOutcome, Authorizer};
/// use ecobee_lib::protocol::HttpTransport;
/// use ecobee_lib::store::MemoryTokenStore;
///
/// # async fn example() -> ecobee_lib::Result<()> {
/// let transport = HttpTransport::new()?;
/// let mut auth = Authorizer::new(MemoryTokenStore::new(), "my-api-key", "smartWrite");
///
/// if let AuthOutcome::PinIssued(grant) = auth.ensure_valid(&transport, false).await? {
///     println!("{}", grant.instructions());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Authorizer<S> {
    store: S,
    api_key: String,
    scope: String,
    refresh_pending: bool,
}

impl<S: TokenStore> Authorizer<S> {
    /// Creates an authorizer for the given application key and scope.
    pub fn new(store: S, api_key: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
            scope: scope.into(),
            refresh_pending: false,
        }
    }

    /// Returns the token store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the token store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Flushes the store and returns it.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be flushed.
    pub fn into_store(mut self) -> Result<S, StoreError> {
        self.store.flush()?;
        Ok(self.store)
    }

    /// Reads the credential record.
    ///
    /// # Errors
    ///
    /// Returns error if the stored record is corrupt.
    pub fn credentials(&self) -> Result<Credentials, StoreError> {
        Credentials::load(&self.store)
    }

    /// Returns the current authorization state.
    ///
    /// # Errors
    ///
    /// Returns error if the stored record is corrupt.
    pub fn state(&self) -> Result<AuthState, StoreError> {
        Ok(self.credentials()?.state(Utc::now()))
    }

    /// Returns whether the user still has to authorize the application.
    #[must_use]
    pub fn authentication_required(&self) -> bool {
        !matches!(self.store.get(REQUIRED), Some(Value::Bool(false)))
    }

    /// Returns whether a forced refresh is scheduled for the next
    /// [`ensure_valid`](Self::ensure_valid).
    #[must_use]
    pub fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    /// Returns the `Authorization` header for API calls, if a token is held.
    ///
    /// # Errors
    ///
    /// Returns error if the stored record is corrupt.
    pub fn authorization_header(&self) -> Result<Option<String>, StoreError> {
        Ok(self.state()?.authorization_header())
    }

    /// Makes sure valid tokens are held, advancing the state machine one step.
    ///
    /// - `Unauthorized`: issues a new device pin and returns without waiting.
    /// - `PendingUserGrant`: exchanges the pin for tokens, or issues a new pin
    ///   if it expired.
    /// - `Authorized`: nothing, unless `force` is set or a refresh was
    ///   scheduled by [`on_refresh_needed`](Self::on_refresh_needed).
    /// - `Expired`: refreshes the tokens.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails, or if a token exchange answers with a
    /// body that is not JSON. Transport failures and refused requests are
    /// reported as [`AuthOutcome::SoftFailed`] instead.
    pub async fn ensure_valid<T: Transport>(
        &mut self,
        transport: &T,
        force: bool,
    ) -> Result<AuthOutcome, Error> {
        let now = Utc::now();
        let force = force || self.refresh_pending;

        match self.credentials()?.state(now) {
            AuthState::Unauthorized => {
                tracing::info!("No refresh token, starting authorization");
                self.start_grant(transport, now).await
            }
            AuthState::PendingUserGrant { code, expires_at } => {
                if now > expires_at {
                    tracing::info!("Authorization pin expired, requesting a new one");
                    self.store.set(ACCESS_TOKEN, Value::Null)?;
                    return self.start_grant(transport, now).await;
                }
                tracing::debug!("Waiting for user to authorize application");
                self.exchange(transport, Grant::Pin, &code, now).await
            }
            AuthState::Authorized { .. } if !force => Ok(AuthOutcome::Ready),
            AuthState::Authorized { refresh_token, .. } | AuthState::Expired { refresh_token, .. } => {
                tracing::info!(forced = force, "Refreshing authorization");
                self.exchange(transport, Grant::Refresh, &refresh_token, now)
                    .await
            }
        }
    }

    /// Handles a revoked authorization.
    ///
    /// Clears the refresh token and token type, then immediately issues a new
    /// device pin.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    pub async fn on_revoked<T: Transport>(&mut self, transport: &T) -> Result<AuthOutcome, Error> {
        tracing::warn!("Authorization revoked, restarting device-pin authorization");
        self.refresh_pending = false;
        self.store
            .set_many(vec![(REFRESH_TOKEN, Value::Null), (TOKEN_TYPE, Value::Null)])?;
        self.start_grant(transport, Utc::now()).await
    }

    /// Schedules a forced refresh for the next
    /// [`ensure_valid`](Self::ensure_valid), keeping the stored tokens.
    pub fn on_refresh_needed(&mut self) {
        tracing::info!("Server requested a token refresh");
        self.refresh_pending = true;
    }

    async fn start_grant<T: Transport>(
        &mut self,
        transport: &T,
        now: DateTime<Utc>,
    ) -> Result<AuthOutcome, Error> {
        self.store.set(REQUIRED, Value::Bool(true))?;

        let request = ApiRequest::get(AUTHORIZE_PATH)
            .query("response_type", "ecobeePin")
            .query("client_id", self.api_key.as_str())
            .query("scope", self.scope.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        let response = match transport.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to request authorization pin");
                return Ok(AuthOutcome::SoftFailed(e.to_string()));
            }
        };

        if !response.is_success() {
            tracing::error!(
                status = response.status(),
                body = %response.body(),
                "Authorization pin request refused"
            );
            return Ok(AuthOutcome::SoftFailed(format!(
                "HTTP {}: {}",
                response.status(),
                response.body()
            )));
        }

        let grant: PinResponse = match response.json() {
            Ok(grant) => grant,
            Err(e) => {
                tracing::error!(error = %e, "Unreadable authorization pin response");
                return Ok(AuthOutcome::SoftFailed(e.to_string()));
            }
        };

        let Some(expires_at) = TimeDelta::try_minutes(grant.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
        else {
            return Ok(AuthOutcome::SoftFailed(format!(
                "invalid pin lifetime: {}",
                grant.expires_in
            )));
        };

        Credentials {
            access_token: Some(grant.code),
            refresh_token: None,
            token_type: Some(PIN_TOKEN_TYPE.to_string()),
            expiration: Some(expires_at),
            required: true,
        }
        .install(&mut self.store)?;

        let pin = PinGrant {
            pin: grant.ecobee_pin,
            expires_in_minutes: grant.expires_in,
        };
        tracing::info!(pin = %pin.pin, expires_in = pin.expires_in_minutes, "{}", pin.instructions());

        Ok(AuthOutcome::PinIssued(pin))
    }

    async fn exchange<T: Transport>(
        &mut self,
        transport: &T,
        grant: Grant,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthOutcome, Error> {
        let request = ApiRequest::post(TOKEN_PATH)
            .query("grant_type", grant.as_str())
            .query("code", code)
            .query("client_id", self.api_key.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        match transport.execute(&request).await {
            Ok(response) => self.install_tokens(grant, &response, now),
            Err(e) => {
                tracing::warn!(error = %e, grant = grant.as_str(), "Token exchange failed");
                Ok(AuthOutcome::SoftFailed(e.to_string()))
            }
        }
    }

    fn install_tokens(
        &mut self,
        grant: Grant,
        response: &RawResponse,
        now: DateTime<Utc>,
    ) -> Result<AuthOutcome, Error> {
        if !response.is_success() {
            let refusal: TokenErrorResponse =
                response.json().map_err(|_| Error::MalformedResponse {
                    status: response.status(),
                    body: response.body().to_string(),
                })?;

            if refusal.is_pending() {
                tracing::debug!("User has not authorized the application yet");
                return Ok(AuthOutcome::AwaitingUser);
            }

            tracing::error!(
                error = %refusal.error,
                description = %refusal.error_description,
                grant = grant.as_str(),
                "Token exchange refused"
            );
            return Ok(AuthOutcome::SoftFailed(if refusal.error_description.is_empty() {
                refusal.error
            } else {
                refusal.error_description
            }));
        }

        let tokens: TokenResponse = response.json()?;
        let expiration = TimeDelta::try_seconds(tokens.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ParseError::InvalidValue {
                field: "expires_in".to_string(),
                message: tokens.expires_in.to_string(),
            })?;

        Credentials {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            token_type: Some(tokens.token_type),
            expiration: Some(expiration),
            required: false,
        }
        .install(&mut self.store)?;
        self.refresh_pending = false;

        Ok(match grant {
            Grant::Pin => {
                tracing::info!("Application authorized");
                AuthOutcome::Authorized
            }
            Grant::Refresh => {
                tracing::info!("Authorization refreshed");
                AuthOutcome::Refreshed
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::HttpMethod;
    use crate::protocol::testing::ScriptedTransport;
    use crate::store::{EXPIRATION, MemoryTokenStore};

    fn authorizer() -> Authorizer<MemoryTokenStore> {
        Authorizer::new(MemoryTokenStore::new(), "api-key", "smartWrite")
    }

    fn authorized(expires_in: TimeDelta) -> Authorizer<MemoryTokenStore> {
        let mut auth = authorizer();
        Credentials {
            access_token: Some("access-1".to_string()),
            refresh_token: Some("refresh-1".to_string()),
            token_type: Some("Bearer".to_string()),
            expiration: Some(Utc::now() + expires_in),
            required: false,
        }
        .install(auth.store_mut())
        .unwrap();
        auth
    }

    fn pending(expires_in: TimeDelta) -> Authorizer<MemoryTokenStore> {
        let mut auth = authorizer();
        Credentials {
            access_token: Some("pin-code".to_string()),
            refresh_token: None,
            token_type: Some(PIN_TOKEN_TYPE.to_string()),
            expiration: Some(Utc::now() + expires_in),
            required: true,
        }
        .install(auth.store_mut())
        .unwrap();
        auth
    }

    fn pin_reply() -> serde_json::Value {
        json!({"ecobeePin": "bv29", "code": "new-code", "scope": "smartWrite", "expires_in": 9, "interval": 30})
    }

    fn token_reply(suffix: &str) -> serde_json::Value {
        json!({
            "access_token": format!("access-{suffix}"),
            "token_type": "Bearer",
            "expires_in": 3599,
            "refresh_token": format!("refresh-{suffix}"),
            "scope": "smartWrite"
        })
    }

    #[tokio::test]
    async fn valid_tokens_are_a_no_op() {
        let transport = ScriptedTransport::new();
        let mut auth = authorized(TimeDelta::hours(1));
        let before = auth.store().clone();

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Ready);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(auth.store(), &before);
    }

    #[tokio::test]
    async fn unauthorized_issues_pin() {
        let transport = ScriptedTransport::new();
        transport.reply(200, pin_reply());
        let mut auth = authorizer();

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        let AuthOutcome::PinIssued(grant) = outcome else {
            panic!("expected a pin, got {outcome:?}");
        };
        assert_eq!(grant.pin, "bv29");
        assert_eq!(grant.expires_in_minutes, 9);

        let request = &transport.requests()[0];
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.path(), "authorize");
        assert_eq!(request.query_value("response_type"), Some("ecobeePin"));
        assert_eq!(request.query_value("client_id"), Some("api-key"));
        assert_eq!(request.query_value("scope"), Some("smartWrite"));

        let credentials = auth.credentials().unwrap();
        assert_eq!(credentials.access_token.as_deref(), Some("new-code"));
        assert_eq!(credentials.token_type.as_deref(), Some(PIN_TOKEN_TYPE));
        assert!(credentials.refresh_token.is_none());
        assert!(credentials.required);
        assert!(matches!(
            auth.state().unwrap(),
            AuthState::PendingUserGrant { .. }
        ));
    }

    #[tokio::test]
    async fn missing_refresh_token_always_starts_grant() {
        // Even a forced call without a refresh token goes to the pin flow
        let transport = ScriptedTransport::new();
        transport.reply(200, pin_reply());
        let mut auth = authorizer();
        auth.store_mut().set(ACCESS_TOKEN, json!("stale")).unwrap();
        auth.store_mut().set(TOKEN_TYPE, json!("Bearer")).unwrap();

        let outcome = auth.ensure_valid(&transport, true).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::PinIssued(_)));
        assert_eq!(transport.requests()[0].path(), "authorize");
    }

    #[tokio::test]
    async fn grant_transport_failure_is_soft() {
        let transport = ScriptedTransport::new();
        transport.fail("network down");
        let mut auth = authorizer();

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::SoftFailed(_)));
        assert_eq!(auth.state().unwrap(), AuthState::Unauthorized);
    }

    #[tokio::test]
    async fn grant_refused_is_soft() {
        let transport = ScriptedTransport::new();
        transport.reply_text(401, "invalid client");
        let mut auth = authorizer();

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::SoftFailed(ref m) if m.contains("invalid client")));
        assert!(auth.credentials().unwrap().access_token.is_none());
    }

    #[tokio::test]
    async fn pending_pin_exchanged_for_tokens() {
        let transport = ScriptedTransport::new();
        transport.reply(200, token_reply("2"));
        let mut auth = pending(TimeDelta::minutes(5));

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Authorized);
        let request = &transport.requests()[0];
        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.path(), "token");
        assert_eq!(request.query_value("grant_type"), Some("ecobeePin"));
        assert_eq!(request.query_value("code"), Some("pin-code"));
        assert_eq!(request.query_value("client_id"), Some("api-key"));

        let credentials = auth.credentials().unwrap();
        assert_eq!(credentials.refresh_token.as_deref(), Some("refresh-2"));
        assert!(!credentials.required);
        assert!(!auth.authentication_required());
        assert_eq!(
            auth.authorization_header().unwrap().as_deref(),
            Some("Bearer access-2")
        );
    }

    #[tokio::test]
    async fn exchange_then_ensure_valid_is_silent() {
        let transport = ScriptedTransport::new();
        transport.reply(200, token_reply("2"));
        let mut auth = pending(TimeDelta::minutes(5));

        auth.ensure_valid(&transport, false).await.unwrap();
        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Ready);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn pending_user_leaves_state_unchanged() {
        let transport = ScriptedTransport::new();
        transport.reply(
            401,
            json!({"error": "authorization_pending", "error_description": "Waiting for user to authorize application."}),
        );
        let mut auth = pending(TimeDelta::minutes(5));
        let before = auth.store().clone();

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert_eq!(outcome, AuthOutcome::AwaitingUser);
        assert_eq!(auth.store(), &before);
    }

    #[tokio::test]
    async fn expired_pin_restarts_grant() {
        let transport = ScriptedTransport::new();
        transport.reply(200, pin_reply());
        let mut auth = pending(TimeDelta::minutes(-1));

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::PinIssued(_)));
        assert_eq!(transport.requests()[0].path(), "authorize");
        assert_eq!(
            auth.credentials().unwrap().access_token.as_deref(),
            Some("new-code")
        );
    }

    #[tokio::test]
    async fn expired_pin_with_failed_grant_clears_code() {
        let transport = ScriptedTransport::new();
        transport.fail("offline");
        let mut auth = pending(TimeDelta::minutes(-1));

        auth.ensure_valid(&transport, false).await.unwrap();

        assert!(auth.credentials().unwrap().access_token.is_none());
        assert_eq!(auth.state().unwrap(), AuthState::Unauthorized);
    }

    #[tokio::test]
    async fn malformed_exchange_refusal_is_hard_failure() {
        let transport = ScriptedTransport::new();
        transport.reply_text(500, "<html>Internal Server Error</html>");
        let mut auth = pending(TimeDelta::minutes(5));

        let result = auth.ensure_valid(&transport, false).await;

        assert!(matches!(
            result,
            Err(Error::MalformedResponse { status: 500, ref body }) if body.contains("Internal")
        ));
    }

    #[tokio::test]
    async fn malformed_exchange_success_is_hard_failure() {
        let transport = ScriptedTransport::new();
        transport.reply_text(200, "not json");
        let mut auth = pending(TimeDelta::minutes(5));

        let result = auth.ensure_valid(&transport, false).await;

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn expired_tokens_are_refreshed() {
        let transport = ScriptedTransport::new();
        transport.reply(200, token_reply("3"));
        let mut auth = authorized(TimeDelta::minutes(-5));

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Refreshed);
        let request = &transport.requests()[0];
        assert_eq!(request.query_value("grant_type"), Some("refresh_token"));
        assert_eq!(request.query_value("code"), Some("refresh-1"));
        assert_eq!(
            auth.credentials().unwrap().refresh_token.as_deref(),
            Some("refresh-3")
        );
    }

    #[tokio::test]
    async fn forced_refresh_on_valid_tokens() {
        let transport = ScriptedTransport::new();
        transport.reply(200, token_reply("4"));
        let mut auth = authorized(TimeDelta::hours(1));

        let outcome = auth.ensure_valid(&transport, true).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Refreshed);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn refused_refresh_is_soft() {
        let transport = ScriptedTransport::new();
        transport.reply(
            400,
            json!({"error": "invalid_grant", "error_description": "The refresh token is invalid."}),
        );
        let mut auth = authorized(TimeDelta::minutes(-5));

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::SoftFailed("The refresh token is invalid.".to_string())
        );
        assert_eq!(
            auth.credentials().unwrap().refresh_token.as_deref(),
            Some("refresh-1")
        );
    }

    #[tokio::test]
    async fn refresh_needed_defers_forced_refresh() {
        let transport = ScriptedTransport::new();
        let mut auth = authorized(TimeDelta::hours(1));

        auth.on_refresh_needed();

        assert!(auth.refresh_pending());
        assert_eq!(transport.request_count(), 0);
        assert_eq!(
            auth.credentials().unwrap().refresh_token.as_deref(),
            Some("refresh-1")
        );

        transport.reply(200, token_reply("5"));
        let outcome = auth.ensure_valid(&transport, false).await.unwrap();
        assert_eq!(outcome, AuthOutcome::Refreshed);
        assert!(!auth.refresh_pending());
    }

    #[tokio::test]
    async fn pending_refresh_survives_soft_failure() {
        let transport = ScriptedTransport::new();
        transport.fail("offline");
        let mut auth = authorized(TimeDelta::hours(1));
        auth.on_refresh_needed();

        let outcome = auth.ensure_valid(&transport, false).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::SoftFailed(_)));
        assert!(auth.refresh_pending());
    }

    #[tokio::test]
    async fn revoked_clears_tokens_and_issues_pin() {
        let transport = ScriptedTransport::new();
        transport.reply(200, pin_reply());
        let mut auth = authorized(TimeDelta::hours(1));

        let outcome = auth.on_revoked(&transport).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::PinIssued(_)));
        assert_eq!(transport.requests()[0].path(), "authorize");
        let credentials = auth.credentials().unwrap();
        assert!(credentials.refresh_token.is_none());
        assert!(credentials.required);
    }

    #[tokio::test]
    async fn revoked_with_failed_grant_stays_unauthorized() {
        let transport = ScriptedTransport::new();
        transport.fail("offline");
        let mut auth = authorized(TimeDelta::hours(1));

        auth.on_revoked(&transport).await.unwrap();

        let credentials = auth.credentials().unwrap();
        assert!(credentials.refresh_token.is_none());
        assert!(credentials.token_type.is_none());
        assert_eq!(auth.state().unwrap(), AuthState::Unauthorized);

        // The next call goes back to the pin flow
        transport.reply(200, pin_reply());
        let outcome = auth.ensure_valid(&transport, false).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::PinIssued(_)));
        assert_eq!(transport.requests()[1].path(), "authorize");
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error() {
        let transport = ScriptedTransport::new();
        let mut auth = authorizer();
        auth.store_mut().set(EXPIRATION, json!(12)).unwrap();

        let result = auth.ensure_valid(&transport, false).await;

        assert!(matches!(result, Err(Error::Store(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn into_store_returns_store() {
        let auth = authorized(TimeDelta::hours(1));
        let store = auth.into_store().unwrap();
        assert_eq!(store.get(TOKEN_TYPE), Some(json!("Bearer")));
    }
}
