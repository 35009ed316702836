// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for an ecobee account.
//!
//! [`Ecobee`] combines the [`ApiGateway`] with a device registry, a
//! [`RevisionTracker`] and a cache of the last fetched thermostat state.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::NaiveDate;

use crate::auth::{AuthOutcome, AuthState, Authorizer};
use crate::config::EcobeeConfig;
use crate::error::{Error, Result, StoreError};
use crate::gateway::ApiGateway;
#[cfg(feature = "http")]
use crate::protocol::HttpTransport;
use crate::protocol::{HttpMethod, Transport};
use crate::request::{
    FunctionRequest, Hold, Includes, RuntimeReportRequest, Selection, SummaryRequest,
    ThermostatRequest,
};
use crate::response::{
    RuntimeReportResponse, Thermostat, ThermostatResponse, ThermostatSummaryResponse,
};
use crate::revision::{RevisionEntry, RevisionTracker};
#[cfg(feature = "http")]
use crate::store::FileTokenStore;
use crate::store::TokenStore;
use crate::types::{HoldType, Temperature};

const SUMMARY_ENDPOINT: &str = "thermostatSummary";
const THERMOSTAT_ENDPOINT: &str = "thermostat";
const REPORT_ENDPOINT: &str = "runtimeReport";

/// An ecobee account with its thermostats.
///
/// Every call that reaches the API returns `Ok(None)` (or `false`, or an
/// empty set) when the server asked for a token refresh or revoked the
/// authorization. Nothing is retried; call again once
/// [`authorize`](Self::authorize) reports ready.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use ecobee_lib::{AuthOutcome, Ecobee, EcobeeConfig};
///
/// # async fn example() -> ecobee_lib::Result<()> {
/// let (mut ecobee, outcome) = Ecobee::http(EcobeeConfig::new("my-api-key")).await?;
///
/// if let AuthOutcome::PinIssued(grant) = &outcome {
///     println!("{}", grant.instructions());
///     ecobee.wait_for_authorization(Duration::from_secs(30)).await?;
/// }
///
/// for id in ecobee.refresh().await? {
///     if let Some(thermostat) = ecobee.thermostat(&id) {
///         println!("{}: {:?}", thermostat.name(), thermostat.temperature());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Ecobee<T, S> {
    gateway: ApiGateway<T, S>,
    registry: BTreeSet<String>,
    tracker: RevisionTracker,
    cache: BTreeMap<String, Thermostat>,
    /// Changed ids whose state has not been fetched yet.
    stale: BTreeSet<String>,
}

#[cfg(feature = "http")]
impl Ecobee<HttpTransport, FileTokenStore> {
    /// Creates a client over HTTP with a file token store.
    ///
    /// Opens the token file, then runs one authorization step. The outcome
    /// tells whether the user must enter a device pin.
    ///
    /// # Errors
    ///
    /// Returns error if the token file cannot be opened or the HTTP client
    /// cannot be built.
    pub async fn http(config: EcobeeConfig) -> Result<(Self, AuthOutcome)> {
        let store = FileTokenStore::open(config.token_path()?)?;
        let transport = config.http.clone().into_transport()?;
        Self::new(config, transport, store).await
    }
}

impl<T: Transport, S: TokenStore> Ecobee<T, S> {
    /// Creates a client over the given transport and token store.
    ///
    /// Runs one authorization step before returning.
    ///
    /// # Errors
    ///
    /// Returns error if the token store fails.
    pub async fn new(config: EcobeeConfig, transport: T, store: S) -> Result<(Self, AuthOutcome)> {
        let authorizer = Authorizer::new(store, config.api_key, config.scope);
        let mut client = Self {
            gateway: ApiGateway::new(transport, authorizer),
            registry: config.thermostat_ids.into_iter().collect(),
            tracker: RevisionTracker::new(),
            cache: BTreeMap::new(),
            stale: BTreeSet::new(),
        };

        let outcome = client.authorize(false).await?;
        Ok((client, outcome))
    }

    // ========== Authorization ==========

    /// Runs one authorization step.
    ///
    /// # Errors
    ///
    /// See [`Authorizer::ensure_valid`].
    pub async fn authorize(&mut self, force: bool) -> Result<AuthOutcome> {
        self.gateway.ensure_authorized(force).await
    }

    /// Returns whether the user still has to authorize the application.
    #[must_use]
    pub fn authentication_required(&self) -> bool {
        self.gateway.authorizer().authentication_required()
    }

    /// Returns the current authorization state.
    ///
    /// # Errors
    ///
    /// Returns error if the stored record is corrupt.
    pub fn auth_state(&self) -> std::result::Result<AuthState, StoreError> {
        self.gateway.authorizer().state()
    }

    /// Repeats authorization steps every `interval` while the user has not
    /// approved the pin.
    ///
    /// Returns once tokens are held, or with [`AuthOutcome::SoftFailed`] as
    /// soon as a step fails, e.g. a refused refresh or an unreachable server.
    /// An expired pin is replaced by a new one and logged. Waiting for the
    /// user has no deadline; wrap the call in [`tokio::time::timeout`] to
    /// bound it.
    ///
    /// # Errors
    ///
    /// See [`Authorizer::ensure_valid`].
    pub async fn wait_for_authorization(&mut self, interval: Duration) -> Result<AuthOutcome> {
        loop {
            let outcome = self.authorize(false).await?;
            match outcome {
                AuthOutcome::Ready | AuthOutcome::Refreshed | AuthOutcome::Authorized => {
                    return Ok(outcome);
                }
                AuthOutcome::SoftFailed(ref reason) => {
                    tracing::warn!(%reason, "Authorization step failed, stopped waiting");
                    return Ok(outcome);
                }
                AuthOutcome::PinIssued(_) | AuthOutcome::AwaitingUser => {
                    tracing::debug!(?outcome, ?interval, "Waiting for authorization");
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    /// Returns the gateway.
    pub fn gateway(&self) -> &ApiGateway<T, S> {
        &self.gateway
    }

    /// Returns the gateway mutably.
    pub fn gateway_mut(&mut self) -> &mut ApiGateway<T, S> {
        &mut self.gateway
    }

    // ========== Registry ==========

    /// Returns the known thermostat ids.
    pub fn thermostat_ids(&self) -> impl Iterator<Item = &str> {
        self.registry.iter().map(String::as_str)
    }

    /// Returns the cached state of a thermostat.
    #[must_use]
    pub fn thermostat(&self, id: &str) -> Option<&Thermostat> {
        self.cache.get(id)
    }

    /// Returns every cached thermostat.
    pub fn cached_thermostats(&self) -> impl Iterator<Item = &Thermostat> {
        self.cache.values()
    }

    fn register(&mut self, id: &str) {
        if !self.registry.contains(id) {
            tracing::info!(thermostat = id, "Discovered thermostat");
            self.registry.insert(id.to_string());
        }
    }

    fn require_known(&self, id: &str) -> Result<()> {
        if self.registry.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownThermostat(id.to_string()))
        }
    }

    // ========== Polling ==========

    /// Fetches the thermostat summary and registers every listed thermostat.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn summary(&mut self) -> Result<Option<ThermostatSummaryResponse>> {
        let summary: Option<ThermostatSummaryResponse> = self
            .gateway
            .get(SUMMARY_ENDPOINT, &SummaryRequest::registered())
            .await?;

        if let Some(revisions) = summary.as_ref().and_then(|s| s.revision_list.as_ref()) {
            let ids: Vec<String> = revisions
                .iter()
                .filter_map(|line| RevisionEntry::parse(line).ok())
                .map(|entry| entry.identifier)
                .collect();
            for id in &ids {
                self.register(id);
            }
        }

        Ok(summary)
    }

    /// Returns the thermostats whose interval revision changed since the
    /// last poll.
    ///
    /// Every thermostat is reported on the first poll. The set is empty when
    /// the call yielded no result or the summary has no revision list.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn poll(&mut self) -> Result<BTreeSet<String>> {
        let Some(summary) = self.summary().await? else {
            return Ok(BTreeSet::new());
        };
        let Some(revisions) = summary.revision_list else {
            tracing::debug!("Summary has no revision list");
            return Ok(BTreeSet::new());
        };

        let changed = self.tracker.diff_revisions(&revisions);
        tracing::debug!(changed = changed.len(), "Polled thermostat revisions");
        Ok(changed)
    }

    /// Fetches thermostats with the given objects included and caches them.
    ///
    /// Fetches the known thermostats, or every registered one if none is
    /// known yet.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn thermostats(&mut self, includes: Includes) -> Result<Option<Vec<Thermostat>>> {
        let request = if self.registry.is_empty() {
            ThermostatRequest {
                selection: Selection::registered().with_includes(includes),
            }
        } else {
            ThermostatRequest::new(&self.registry, includes)
        };
        self.fetch(&request).await
    }

    /// Polls, then fetches the current state of the changed thermostats into
    /// the cache.
    ///
    /// Changes whose fetch failed or yielded no result are fetched again by
    /// the next call, even if the summary has not changed since.
    ///
    /// Returns the ids whose cached state was updated.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::call`].
    pub async fn refresh(&mut self) -> Result<BTreeSet<String>> {
        let changed = self.poll().await?;
        self.stale.extend(changed);
        if self.stale.is_empty() {
            return Ok(BTreeSet::new());
        }

        let request = ThermostatRequest::new(&self.stale, Includes::current_state());
        let Some(thermostats) = self.fetch(&request).await? else {
            tracing::warn!(
                stale = self.stale.len(),
                "Thermostat fetch yielded no result, cache not updated"
            );
            return Ok(BTreeSet::new());
        };

        let updated: BTreeSet<String> = thermostats.into_iter().map(|t| t.identifier).collect();
        let missing = std::mem::take(&mut self.stale);
        let missing = missing.difference(&updated).count();
        if missing > 0 {
            tracing::debug!(missing, "Changed thermostats absent from fetch result");
        }
        Ok(updated)
    }

    async fn fetch(&mut self, request: &ThermostatRequest) -> Result<Option<Vec<Thermostat>>> {
        let Some(response) = self
            .gateway
            .get::<_, ThermostatResponse>(THERMOSTAT_ENDPOINT, request)
            .await?
        else {
            return Ok(None);
        };

        for thermostat in &response.thermostat_list {
            self.register(&thermostat.identifier);
            self.cache
                .insert(thermostat.identifier.clone(), thermostat.clone());
        }
        Ok(Some(response.thermostat_list))
    }

    // ========== Reports ==========

    /// Fetches the runtime report of every known thermostat.
    ///
    /// The window runs from `start_date` to today, or covers the last day
    /// when `start_date` is `None`. `columns` replaces the standard column
    /// set. Report data only changes every 15 minutes.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidDateRange` if `start_date` is in the
    /// future. See also [`ApiGateway::call`].
    pub async fn runtime_report(
        &mut self,
        start_date: Option<NaiveDate>,
        include_sensors: bool,
        columns: Option<&[&str]>,
    ) -> Result<Option<RuntimeReportResponse>> {
        if self.registry.is_empty() && self.summary().await?.is_none() {
            return Ok(None);
        }

        let today = chrono::Local::now().date_naive();
        let mut request = match start_date {
            Some(start) => RuntimeReportRequest::new(&self.registry, start, today)?,
            None => RuntimeReportRequest::last_day(&self.registry, today),
        }
        .with_sensors(include_sensors);
        if let Some(columns) = columns {
            request = request.with_columns(columns);
        }

        self.gateway.get(REPORT_ENDPOINT, &request).await
    }

    // ========== Holds ==========

    /// Applies a hold to a thermostat.
    ///
    /// Returns `false` when the call yielded no result.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownThermostat` if the id is not registered. See
    /// also [`ApiGateway::call`].
    pub async fn set_hold(&mut self, id: &str, hold: Hold) -> Result<bool> {
        self.require_known(id)?;
        tracing::info!(thermostat = id, hold_type = %hold.hold_type(), "Setting hold");
        let request = FunctionRequest::set_hold(Selection::thermostats([id]), hold);
        self.post_function(&request).await
    }

    /// Holds heat and cool setpoints in degrees Fahrenheit.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::TemperatureOutOfRange` for a setpoint the
    /// thermostat does not accept. See also [`set_hold`](Self::set_hold).
    pub async fn set_temperature(
        &mut self,
        id: &str,
        heat: f64,
        cool: f64,
        hold_type: HoldType,
    ) -> Result<bool> {
        let hold = Hold::temperatures(Temperature::setpoint(heat)?, Temperature::setpoint(cool)?)
            .with_hold_type(hold_type);
        self.set_hold(id, hold).await
    }

    /// Holds a named climate.
    ///
    /// # Errors
    ///
    /// See [`set_hold`](Self::set_hold).
    pub async fn set_climate(
        &mut self,
        id: &str,
        climate_ref: &str,
        hold_type: HoldType,
    ) -> Result<bool> {
        self.set_hold(id, Hold::climate(climate_ref).with_hold_type(hold_type))
            .await
    }

    /// Holds the `home` climate until the next program transition.
    ///
    /// # Errors
    ///
    /// See [`set_hold`](Self::set_hold).
    pub async fn set_home(&mut self, id: &str) -> Result<bool> {
        self.set_climate(id, "home", HoldType::NextTransition).await
    }

    /// Holds the `away` climate until the next program transition.
    ///
    /// # Errors
    ///
    /// See [`set_hold`](Self::set_hold).
    pub async fn set_away(&mut self, id: &str) -> Result<bool> {
        self.set_climate(id, "away", HoldType::NextTransition).await
    }

    /// Cancels the current hold, or every stacked hold with `resume_all`.
    ///
    /// # Errors
    ///
    /// See [`set_hold`](Self::set_hold).
    pub async fn resume_program(&mut self, id: &str, resume_all: bool) -> Result<bool> {
        self.require_known(id)?;
        tracing::info!(thermostat = id, resume_all, "Resuming program");
        let request = FunctionRequest::resume_program(Selection::thermostats([id]), resume_all);
        self.post_function(&request).await
    }

    async fn post_function(&mut self, request: &FunctionRequest) -> Result<bool> {
        Ok(self
            .gateway
            .call(HttpMethod::Post, THERMOSTAT_ENDPOINT, request)
            .await?
            .is_some())
    }

    /// Flushes the token store and returns it.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be flushed.
    pub fn close(self) -> std::result::Result<S, StoreError> {
        self.gateway.close()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use serde_json::{Value, json};

    use super::*;
    use crate::auth::{Credentials, PIN_TOKEN_TYPE};
    use crate::protocol::testing::ScriptedTransport;
    use crate::store::MemoryTokenStore;

    fn authorized_store() -> MemoryTokenStore {
        let mut store = MemoryTokenStore::new();
        Credentials {
            access_token: Some("access-1".to_string()),
            refresh_token: Some("refresh-1".to_string()),
            token_type: Some("Bearer".to_string()),
            expiration: Some(Utc::now() + TimeDelta::hours(1)),
            required: false,
        }
        .install(&mut store)
        .unwrap();
        store
    }

    async fn client<'a>(
        transport: &'a ScriptedTransport,
        ids: &[&str],
    ) -> Ecobee<&'a ScriptedTransport, MemoryTokenStore> {
        let config = EcobeeConfig::new("api-key").with_thermostat_ids(ids.iter().copied());
        let (client, outcome) = Ecobee::new(config, transport, authorized_store())
            .await
            .unwrap();
        assert_eq!(outcome, AuthOutcome::Ready);
        client
    }

    fn summary(revisions: &[&str]) -> Value {
        json!({
            "thermostatCount": revisions.len(),
            "revisionList": revisions,
            "status": {"code": 0, "message": ""}
        })
    }

    fn thermostat(id: &str, temperature: i32) -> Value {
        json!({
            "identifier": id,
            "name": format!("T{id}"),
            "runtime": {"connected": true, "actualTemperature": temperature, "actualHumidity": 40},
            "equipmentStatus": "fan"
        })
    }

    fn ok() -> Value {
        json!({"status": {"code": 0, "message": ""}})
    }

    #[tokio::test]
    async fn poll_reports_each_change_once() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;

        transport.reply(
            200,
            summary(&[
                "123456789:Up:true:t:a:r:REV1",
                "987654321:Down:true:t:a:r:REV2",
            ]),
        );
        let changed = ecobee.poll().await.unwrap();
        assert_eq!(
            changed,
            BTreeSet::from(["123456789".to_string(), "987654321".to_string()])
        );

        transport.reply(
            200,
            summary(&[
                "123456789:Up:true:t:a:r:REV1",
                "987654321:Down:true:t:a:r:REV2",
            ]),
        );
        assert!(ecobee.poll().await.unwrap().is_empty());

        transport.reply(
            200,
            summary(&[
                "123456789:Up:true:t:a:r:REV3",
                "987654321:Down:true:t:a:r:REV2",
            ]),
        );
        assert_eq!(
            ecobee.poll().await.unwrap(),
            BTreeSet::from(["123456789".to_string()])
        );
    }

    #[tokio::test]
    async fn summary_grows_registry() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111"]).await;

        transport.reply(200, summary(&["222:Den:true:t:a:r:R1"]));
        ecobee.summary().await.unwrap();

        assert_eq!(ecobee.thermostat_ids().collect::<Vec<_>>(), vec!["111", "222"]);
    }

    #[tokio::test]
    async fn poll_without_revision_list_is_empty() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;

        transport.reply(200, json!({"thermostatCount": 0, "status": {"code": 0}}));
        assert!(ecobee.poll().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn poll_after_refresh_needed_is_empty() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;

        transport.reply(500, json!({"status": {"code": 14, "message": "Token expired."}}));
        assert!(ecobee.poll().await.unwrap().is_empty());
        assert!(ecobee.gateway().authorizer().refresh_pending());
    }

    #[tokio::test]
    async fn refresh_fetches_changed_thermostats() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;

        transport.reply(200, summary(&["111:A:true:t:a:r:R1", "222:B:true:t:a:r:R1"]));
        transport.reply(
            200,
            json!({"thermostatList": [thermostat("111", 705), thermostat("222", 688)], "status": {"code": 0}}),
        );
        let updated = ecobee.refresh().await.unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(
            ecobee.thermostat("111").unwrap().temperature(),
            Some(Temperature::from_tenths(705))
        );

        let request = &transport.requests()[1];
        let json: Value = serde_json::from_str(request.query_value("json").unwrap()).unwrap();
        assert_eq!(json["selection"]["selectionMatch"], "111:222");
        assert_eq!(json["selection"]["includeRuntime"], true);

        // Only the changed thermostat is fetched next time
        transport.reply(200, summary(&["111:A:true:t:a:r:R1", "222:B:true:t:a:r:R2"]));
        transport.reply(
            200,
            json!({"thermostatList": [thermostat("222", 690)], "status": {"code": 0}}),
        );
        let updated = ecobee.refresh().await.unwrap();
        assert_eq!(updated, BTreeSet::from(["222".to_string()]));
        let request = &transport.requests()[3];
        let json: Value = serde_json::from_str(request.query_value("json").unwrap()).unwrap();
        assert_eq!(json["selection"]["selectionMatch"], "222");
    }

    #[tokio::test]
    async fn refresh_with_no_change_sends_one_request() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;
        transport.reply(200, summary(&["111:A:true:t:a:r:R1"]));
        transport.reply(200, json!({"thermostatList": [thermostat("111", 700)]}));
        ecobee.refresh().await.unwrap();

        transport.reply(200, summary(&["111:A:true:t:a:r:R1"]));
        assert!(ecobee.refresh().await.unwrap().is_empty());
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn refresh_retries_change_after_refresh_needed() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;

        transport.reply(200, summary(&["111:A:true:t:a:r:R1"]));
        transport.reply(500, json!({"status": {"code": 14, "message": "Token expired."}}));
        assert!(ecobee.refresh().await.unwrap().is_empty());
        assert!(ecobee.thermostat("111").is_none());

        transport.reply(
            200,
            json!({"access_token": "access-2", "token_type": "Bearer", "expires_in": 3599, "refresh_token": "refresh-2"}),
        );
        transport.reply(200, summary(&["111:A:true:t:a:r:R1"]));
        transport.reply(200, json!({"thermostatList": [thermostat("111", 712)]}));
        let updated = ecobee.refresh().await.unwrap();

        assert_eq!(updated, BTreeSet::from(["111".to_string()]));
        assert_eq!(
            ecobee.thermostat("111").unwrap().temperature(),
            Some(Temperature::from_tenths(712))
        );
        assert_eq!(transport.request_count(), 5);
        let json: Value =
            serde_json::from_str(transport.requests()[4].query_value("json").unwrap()).unwrap();
        assert_eq!(json["selection"]["selectionMatch"], "111");

        // Fetched changes are not requested again
        transport.reply(200, summary(&["111:A:true:t:a:r:R1"]));
        assert!(ecobee.refresh().await.unwrap().is_empty());
        assert_eq!(transport.request_count(), 6);
    }

    #[tokio::test]
    async fn refresh_retries_change_after_connection_failure() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;

        transport.reply(200, summary(&["111:A:true:t:a:r:R1", "222:B:true:t:a:r:R1"]));
        transport.fail("connection reset");
        assert!(ecobee.refresh().await.is_err());

        transport.reply(200, summary(&["111:A:true:t:a:r:R1", "222:B:true:t:a:r:R2"]));
        transport.reply(
            200,
            json!({"thermostatList": [thermostat("111", 700), thermostat("222", 690)]}),
        );
        let updated = ecobee.refresh().await.unwrap();

        assert_eq!(updated.len(), 2);
        let json: Value =
            serde_json::from_str(transport.requests()[3].query_value("json").unwrap()).unwrap();
        assert_eq!(json["selection"]["selectionMatch"], "111:222");
    }

    #[tokio::test]
    async fn thermostats_without_registry_selects_registered() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &[]).await;
        transport.reply(200, json!({"thermostatList": [thermostat("111", 700)]}));

        let thermostats = ecobee.thermostats(Includes::all()).await.unwrap().unwrap();

        assert_eq!(thermostats.len(), 1);
        assert_eq!(ecobee.thermostat_ids().collect::<Vec<_>>(), vec!["111"]);
        let json: Value =
            serde_json::from_str(transport.requests()[0].query_value("json").unwrap()).unwrap();
        assert_eq!(json["selection"]["selectionType"], "registered");
        assert_eq!(json["selection"]["includeProgram"], true);
    }

    #[tokio::test]
    async fn set_hold_posts_function() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111"]).await;
        transport.reply(200, ok());

        let applied = ecobee
            .set_temperature("111", 68.0, 76.5, HoldType::Indefinite)
            .await
            .unwrap();

        assert!(applied);
        let request = &transport.requests()[0];
        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.path(), "1/thermostat");
        let body: Value = serde_json::from_str(request.body_text().unwrap()).unwrap();
        assert_eq!(
            body["functions"][0],
            json!({"type": "setHold", "params": {"holdType": "indefinite", "heatHoldTemp": 680, "coolHoldTemp": 765}})
        );
    }

    #[tokio::test]
    async fn set_away_and_resume() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111"]).await;
        transport.reply(200, ok());
        transport.reply(200, ok());

        assert!(ecobee.set_away("111").await.unwrap());
        assert!(ecobee.resume_program("111", true).await.unwrap());

        let requests = transport.requests();
        let away: Value = serde_json::from_str(requests[0].body_text().unwrap()).unwrap();
        assert_eq!(away["functions"][0]["params"]["holdClimateRef"], "away");
        let resume: Value = serde_json::from_str(requests[1].body_text().unwrap()).unwrap();
        assert_eq!(resume["functions"][0]["type"], "resumeProgram");
    }

    #[tokio::test]
    async fn hold_on_unknown_thermostat_is_rejected() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111"]).await;

        let result = ecobee.set_home("999").await;

        assert!(matches!(result, Err(Error::UnknownThermostat(ref id)) if id == "999"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn out_of_range_setpoint_is_rejected() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111"]).await;

        let result = ecobee
            .set_temperature("111", 20.0, 75.0, HoldType::NextTransition)
            .await;

        assert!(matches!(result, Err(Error::Value(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn hold_after_revocation_is_not_applied() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111"]).await;
        transport.reply(500, json!({"status": {"code": 16, "message": "Revoked."}}));
        transport.reply(200, json!({"ecobeePin": "ab12", "code": "pin-code", "expires_in": 9}));

        assert!(!ecobee.set_home("111").await.unwrap());
        assert!(ecobee.authentication_required());
        assert!(matches!(
            ecobee.auth_state().unwrap(),
            AuthState::PendingUserGrant { .. }
        ));
    }

    #[tokio::test]
    async fn runtime_report_uses_registry() {
        let transport = ScriptedTransport::new();
        let mut ecobee = client(&transport, &["111", "222"]).await;
        transport.reply(
            200,
            json!({
                "startDate": "2024-03-01", "startInterval": 0,
                "endDate": "2024-03-02", "endInterval": 287,
                "columns": "zoneAveTemp",
                "reportList": [{"thermostatIdentifier": "111", "rowCount": 1, "rowList": ["2024-03-01,00:00:00,70.1"]}]
            }),
        );

        let report = ecobee
            .runtime_report(None, true, Some(&["zoneAveTemp"]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.column_names(), vec!["zoneAveTemp"]);
        assert_eq!(report.report("111").unwrap().row_count, 1);
        let json: Value =
            serde_json::from_str(transport.requests()[0].query_value("json").unwrap()).unwrap();
        assert_eq!(json["columns"], "zoneAveTemp");
        assert_eq!(json["includeSensors"], true);
        assert_eq!(json["selection"]["selectionMatch"], "111:222");
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_authorization_polls_until_granted() {
        let transport = ScriptedTransport::new();
        transport.reply(200, json!({"ecobeePin": "ab12", "code": "pin-code", "expires_in": 9}));
        let (mut ecobee, outcome) = Ecobee::new(
            EcobeeConfig::new("api-key"),
            &transport,
            MemoryTokenStore::new(),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, AuthOutcome::PinIssued(_)));
        assert_eq!(
            ecobee.auth_state().unwrap().name(),
            "pending_user_grant"
        );

        let pending = json!({"error": "authorization_pending", "error_description": "Waiting for user."});
        transport.reply(401, pending.clone());
        transport.reply(401, pending);
        transport.reply(
            200,
            json!({"access_token": "access-2", "token_type": "Bearer", "expires_in": 3599, "refresh_token": "refresh-2"}),
        );

        let start = tokio::time::Instant::now();
        let outcome = ecobee
            .wait_for_authorization(Duration::from_secs(30))
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Authorized);
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        assert_eq!(transport.request_count(), 4);
        assert_eq!(transport.pending_replies(), 0);
        assert!(!ecobee.authentication_required());
        assert_eq!(
            ecobee.auth_state().unwrap().authorization_header().as_deref(),
            Some("Bearer access-2")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_authorization_returns_refused_refresh() {
        let transport = ScriptedTransport::new();
        let mut store = MemoryTokenStore::new();
        Credentials {
            access_token: Some("access-1".to_string()),
            refresh_token: Some("refresh-1".to_string()),
            token_type: Some("Bearer".to_string()),
            expiration: Some(Utc::now() - TimeDelta::minutes(5)),
            required: false,
        }
        .install(&mut store)
        .unwrap();
        let refused =
            json!({"error": "invalid_grant", "error_description": "The refresh token is invalid."});
        transport.reply(400, refused.clone());
        transport.reply(400, refused);

        let (mut ecobee, outcome) = Ecobee::new(EcobeeConfig::new("api-key"), &transport, store)
            .await
            .unwrap();
        assert!(matches!(outcome, AuthOutcome::SoftFailed(_)));

        let start = tokio::time::Instant::now();
        let outcome = ecobee
            .wait_for_authorization(Duration::from_secs(30))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::SoftFailed("The refresh token is invalid.".to_string())
        );
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(transport.request_count(), 2);
        assert_eq!(ecobee.auth_state().unwrap().name(), "expired");
    }

    #[tokio::test]
    async fn startup_pin_is_stored() {
        let transport = ScriptedTransport::new();
        transport.reply(200, json!({"ecobeePin": "ab12", "code": "pin-code", "expires_in": 9}));

        let (ecobee, _) = Ecobee::new(
            EcobeeConfig::new("api-key"),
            &transport,
            MemoryTokenStore::new(),
        )
        .await
        .unwrap();

        let store = ecobee.close().unwrap();
        let credentials = Credentials::load(&store).unwrap();
        assert_eq!(credentials.token_type.as_deref(), Some(PIN_TOKEN_TYPE));
        assert_eq!(credentials.access_token.as_deref(), Some("pin-code"));
    }
}
