//! Request execution for the Places web service.
//!
//! The client facade here stays small:
//! - wire dispatch is delegated to `transport` (or any `PlacesTransport`).
//! - retry decisions are delegated to `retry`.
//! - status classification lives in `api::status`.

mod retry;
mod transport;

use std::borrow::Cow;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::params::PlaceRequest;
use super::PlacesTransport;
use crate::config::ApiConfig;
use crate::error::PlacesError;
use crate::types::ResponseEnvelope;

pub use retry::RetryOptions;
pub use transport::HttpTransport;

use retry::RetryStep;

/// Client for the Places web service.
///
/// Holds the credentials injected into every request (`key`, `sensor`).
/// Each `execute` call keeps its own attempt counter and timer, so one
/// client can serve concurrent callers.
pub struct PlacesClient<T = HttpTransport> {
    transport: T,
    api_key: String,
    sensor: bool,
    language: Option<String>,
}

impl PlacesClient<HttpTransport> {
    /// Build an HTTP-backed client from resolved API configuration.
    pub fn new(config: &ApiConfig, timeout: Duration) -> Self {
        let transport = HttpTransport::new(&config.base_url, timeout);
        let client = Self::with_transport(transport, config.api_key.trim(), config.sensor);
        match config.language.as_deref() {
            Some(language) => client.with_language(language),
            None => client,
        }
    }
}

impl<T: PlacesTransport> PlacesClient<T> {
    pub fn with_transport(transport: T, api_key: impl Into<String>, sensor: bool) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            sensor,
            language: None,
        }
    }

    /// Language applied to requests that don't set one.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = (!language.trim().is_empty()).then_some(language);
        self
    }

    pub fn sensor(&self) -> bool {
        self.sensor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, dispatch and classify one request, retrying under `retry`.
    ///
    /// `OK` and `ZERO_RESULTS` return the envelope. Local validation
    /// failures, `NOT_FOUND` and `REQUEST_DENIED` are never retried. Other
    /// failing statuses are retried only when `retry` names them; the loop
    /// stops with `Retry` once `max` attempts failed or with `RetryTimeout`
    /// once the policy's deadline passes, whichever comes first.
    pub async fn execute(
        &self,
        request: &PlaceRequest,
        retry: Option<&RetryOptions>,
    ) -> Result<ResponseEnvelope, PlacesError> {
        request.validate()?;

        let endpoint = request.kind();
        let query = self.query_for(request);
        let started = Instant::now();
        let mut attempt: u32 = 1;

        loop {
            debug!(%endpoint, attempt, "dispatching places request");
            let envelope = self.transport.get(endpoint, &query).await?;
            let status = envelope.place_status();
            let message = envelope.error_message().map(str::to_string);
            let Some(err) = PlacesError::from_status(&status, message) else {
                debug!(%endpoint, attempt, %status, "places request succeeded");
                return Ok(envelope);
            };

            let Some(policy) = retry.filter(|policy| policy.retries_on(&status)) else {
                debug!(%endpoint, attempt, %status, "places request failed");
                return Err(err);
            };

            match policy.next_step(attempt, started.elapsed()) {
                RetryStep::Wait(delay) => {
                    warn!(%endpoint, attempt, %status, ?delay, "retrying places request");
                    sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
                RetryStep::WaitForDeadline(remaining) => {
                    sleep(remaining).await;
                    return Err(PlacesError::RetryTimeout {
                        attempts: attempt,
                        status,
                        elapsed: started.elapsed(),
                    });
                }
                RetryStep::TimedOut => {
                    return Err(PlacesError::RetryTimeout {
                        attempts: attempt,
                        status,
                        elapsed: started.elapsed(),
                    });
                }
                RetryStep::Exhausted => {
                    return Err(PlacesError::Retry {
                        attempts: attempt,
                        status,
                        elapsed: started.elapsed(),
                    });
                }
            }
        }
    }

    /// Endpoint parameters plus the injected `key` and `sensor`.
    fn query_for(&self, request: &PlaceRequest) -> Vec<(&'static str, String)> {
        let request = match self.language.as_deref() {
            Some(language) => {
                let mut owned = request.clone();
                owned.default_language(language);
                Cow::Owned(owned)
            }
            None => Cow::Borrowed(request),
        };
        let mut query = request.query_pairs();
        query.push(("key", self.api_key.clone()));
        query.push(("sensor", self.sensor.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::{Location, NearbySearch, PlaceDetails, RadarSearch, TextSearch};
    use crate::api::status::PlaceStatus;
    use crate::error::{RequestOrigin, TransportError};
    use crate::testsupport::{envelope, ScriptedTransport};

    fn sydney() -> Location {
        Location::new(-33.8670522, 151.1957362)
    }

    fn scripted(transport: ScriptedTransport) -> PlacesClient<ScriptedTransport> {
        PlacesClient::with_transport(transport, "test-key", false)
    }

    fn invalid_request_policy(delay_secs: u64) -> RetryOptions {
        RetryOptions::new(3, PlaceStatus::InvalidRequest, Duration::from_secs(delay_secs))
            .expect("policy")
    }

    fn assert_about(actual: Duration, expected: Duration) {
        let slack = Duration::from_millis(50);
        assert!(
            actual >= expected && actual <= expected + slack,
            "expected about {expected:?}, got {actual:?}"
        );
    }

    fn nearby() -> PlaceRequest {
        NearbySearch::new(sydney()).radius(200).into()
    }

    #[tokio::test]
    async fn missing_parameters_fail_locally_without_dispatch() {
        let requests: Vec<PlaceRequest> = vec![
            TextSearch::new("").into(),
            PlaceDetails::new("  ").into(),
            RadarSearch::new(sydney()).radius(200).into(),
            NearbySearch::new(Location::new(f64::NAN, 0.0)).into(),
        ];
        for request in requests {
            let transport = ScriptedTransport::always("OK");
            let client = scripted(transport);
            let policy = invalid_request_policy(1);
            let err = client
                .execute(&request, Some(&policy))
                .await
                .expect_err("validation should fail");
            assert!(
                matches!(
                    err,
                    PlacesError::InvalidRequest {
                        origin: RequestOrigin::Local,
                        ..
                    }
                ),
                "unexpected error for {:?}: {err}",
                request.kind()
            );
            assert_eq!(client.transport().calls(), 0);
        }
    }

    #[tokio::test]
    async fn injects_key_and_sensor_into_query() {
        let client = PlacesClient::with_transport(ScriptedTransport::always("OK"), "k-123", true);
        client.execute(&nearby(), None).await.expect("ok");
        let query = client.transport().last_query().expect("one dispatch");
        assert!(query.contains(&("key".to_string(), "k-123".to_string())));
        assert!(query.contains(&("sensor".to_string(), "true".to_string())));
        assert!(query.contains(&("location".to_string(), "-33.8670522,151.1957362".to_string())));
    }

    #[tokio::test]
    async fn client_language_fills_requests_without_one() {
        let client = scripted(ScriptedTransport::always("OK")).with_language("ja");
        client.execute(&nearby(), None).await.expect("ok");
        let query = client.transport().last_query().expect("one dispatch");
        assert!(query.contains(&("language".to_string(), "ja".to_string())));
    }

    #[tokio::test]
    async fn zero_results_is_success_with_empty_results() {
        let client = scripted(ScriptedTransport::always("ZERO_RESULTS"));
        let envelope = client.execute(&nearby(), None).await.expect("success");
        assert_eq!(envelope.place_status(), PlaceStatus::ZeroResults);
        assert!(envelope.results().is_empty());
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn retryable_statuses_without_policy_fail_after_one_dispatch() {
        for raw in ["INVALID_REQUEST", "OVER_QUERY_LIMIT", "UNKNOWN_ERROR"] {
            let client = scripted(ScriptedTransport::always(raw));
            let err = client.execute(&nearby(), None).await.expect_err("failure");
            assert_eq!(client.transport().calls(), 1, "status {raw}");
            match (raw, &err) {
                (
                    "INVALID_REQUEST",
                    PlacesError::InvalidRequest {
                        origin: RequestOrigin::Remote,
                        ..
                    },
                ) => {}
                ("OVER_QUERY_LIMIT", PlacesError::OverQueryLimit { .. }) => {}
                ("UNKNOWN_ERROR", PlacesError::Unknown { status, .. })
                    if status == "UNKNOWN_ERROR" => {}
                _ => panic!("status {raw} produced unexpected error: {err}"),
            }
        }
    }

    #[tokio::test]
    async fn request_denied_carries_service_message() {
        let transport = ScriptedTransport::new(vec![Ok(envelope(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "This API project is not authorized to use this API."
        })))]);
        let client = scripted(transport);
        let err = client.execute(&nearby(), None).await.expect_err("denied");
        match err {
            PlacesError::RequestDenied { message } => assert_eq!(
                message.as_deref(),
                Some("This API project is not authorized to use this API.")
            ),
            other => panic!("expected RequestDenied, got: {other}"),
        }
    }

    #[tokio::test]
    async fn not_found_is_never_retried() {
        let client = scripted(ScriptedTransport::always("NOT_FOUND"));
        let policy = invalid_request_policy(1)
            .also_on(PlaceStatus::Unknown("UNKNOWN_ERROR".into()))
            .expect("widened");
        let err = client
            .execute(&PlaceDetails::new("abc123").into(), Some(&policy))
            .await
            .expect_err("not found");
        assert!(matches!(err, PlacesError::NotFound { .. }), "got: {err}");
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn request_denied_is_never_retried() {
        let client = scripted(ScriptedTransport::always("REQUEST_DENIED"));
        let policy = invalid_request_policy(1)
            .also_on(PlaceStatus::OverQueryLimit)
            .expect("widened");
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("denied");
        assert!(matches!(err, PlacesError::RequestDenied { .. }), "got: {err}");
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_attempts_with_fixed_delay() {
        let client = scripted(ScriptedTransport::always("INVALID_REQUEST"));
        let policy = invalid_request_policy(1);
        let started = Instant::now();
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("retry error");
        match err {
            PlacesError::Retry {
                attempts, status, ..
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(status, PlaceStatus::InvalidRequest);
            }
            other => panic!("expected Retry, got: {other}"),
        }
        assert_eq!(client.transport().calls(), 3);
        // Two waits of one second between three attempts.
        assert_about(started.elapsed(), Duration::from_secs(2));
        let gaps = client.transport().call_gaps();
        assert_eq!(gaps.len(), 2);
        for gap in gaps {
            assert_about(gap, Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_cuts_the_wait_short() {
        let client = scripted(ScriptedTransport::always("INVALID_REQUEST"));
        let policy = invalid_request_policy(10)
            .with_timeout(Duration::from_secs(1))
            .expect("timeout");
        let started = Instant::now();
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("timeout error");
        match err {
            PlacesError::RetryTimeout {
                attempts, elapsed, ..
            } => {
                assert!(attempts < 3, "attempts: {attempts}");
                assert_about(elapsed, Duration::from_secs(1));
            }
            other => panic!("expected RetryTimeout, got: {other}"),
        }
        assert_about(started.elapsed(), Duration::from_secs(1));
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_wins_when_deadline_and_ceiling_coincide() {
        // Each dispatch takes one second; the second attempt ends exactly at
        // the two-second deadline with the attempt ceiling also reached.
        let transport =
            ScriptedTransport::always("INVALID_REQUEST").with_latency(Duration::from_secs(1));
        let client = scripted(transport);
        let policy = RetryOptions::new(2, PlaceStatus::InvalidRequest, Duration::ZERO)
            .expect("policy")
            .with_timeout(Duration::from_secs(2))
            .expect("timeout");
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("timeout error");
        assert!(
            matches!(err, PlacesError::RetryTimeout { attempts: 2, .. }),
            "got: {err}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn policy_is_scoped_to_its_named_status() {
        let client = scripted(ScriptedTransport::always("OVER_QUERY_LIMIT"));
        let policy = invalid_request_policy(1);
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("over limit");
        assert!(matches!(err, PlacesError::OverQueryLimit { .. }), "got: {err}");
        assert_eq!(client.transport().calls(), 1);

        let client = scripted(ScriptedTransport::always("UNKNOWN_ERROR"));
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("unknown");
        assert!(matches!(err, PlacesError::Unknown { .. }), "got: {err}");
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_recovers_when_service_returns_ok() {
        let transport = ScriptedTransport::statuses(["OVER_QUERY_LIMIT", "OVER_QUERY_LIMIT", "OK"]);
        let client = scripted(transport);
        let policy = RetryOptions::new(5, PlaceStatus::OverQueryLimit, Duration::from_millis(500))
            .expect("policy");
        let envelope = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect("recovered");
        assert_eq!(envelope.place_status(), PlaceStatus::Ok);
        assert_eq!(client.transport().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_status_during_retry_surfaces_its_own_error() {
        let transport = ScriptedTransport::statuses(["INVALID_REQUEST", "NOT_FOUND"]);
        let client = scripted(transport);
        let policy = invalid_request_policy(1);
        let err = client
            .execute(&PlaceDetails::new("abc123").into(), Some(&policy))
            .await
            .expect_err("not found");
        assert!(matches!(err, PlacesError::NotFound { .. }), "got: {err}");
        assert_eq!(client.transport().calls(), 2);
    }

    #[tokio::test]
    async fn transport_errors_are_not_reclassified() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Status {
            code: 502,
            body: "bad gateway".to_string(),
        })]);
        let client = scripted(transport);
        let policy = invalid_request_policy(1);
        let err = client
            .execute(&nearby(), Some(&policy))
            .await
            .expect_err("transport");
        assert!(
            matches!(err, PlacesError::Transport(TransportError::Status { code: 502, .. })),
            "got: {err}"
        );
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn radar_search_accepts_keyword_or_name() {
        for request in [
            RadarSearch::new(sydney()).keyword("attractions"),
            RadarSearch::new(sydney()).name("park"),
        ] {
            let client = scripted(ScriptedTransport::always("OK"));
            let envelope = client
                .execute(&request.into(), None)
                .await
                .expect("radar ok");
            assert_eq!(envelope.status(), "OK");
            assert_eq!(client.transport().calls(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_calls_keep_independent_counters() {
        let client = std::sync::Arc::new(scripted(ScriptedTransport::always("INVALID_REQUEST")));
        let policy = invalid_request_policy(1);
        let a = {
            let client = client.clone();
            let policy = policy.clone();
            tokio::spawn(async move { client.execute(&nearby(), Some(&policy)).await })
        };
        let b = {
            let client = client.clone();
            let policy = policy.clone();
            tokio::spawn(async move { client.execute(&nearby(), Some(&policy)).await })
        };
        for handle in [a, b] {
            let err = handle.await.expect("join").expect_err("retry");
            assert!(matches!(err, PlacesError::Retry { attempts: 3, .. }), "got: {err}");
        }
        assert_eq!(client.transport().calls(), 6);
    }
}
