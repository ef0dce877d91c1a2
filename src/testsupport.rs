//! Shared test fixtures for client and config test modules.
//!
//! `ScriptedTransport` replays canned envelopes in order and records every
//! dispatch so tests can assert on call counts, query strings and timing.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::api::{EndpointKind, PlacesTransport};
use crate::error::TransportError;
use crate::types::ResponseEnvelope;

/// Build an envelope from a JSON literal.
pub fn envelope(value: Value) -> ResponseEnvelope {
    ResponseEnvelope::from_value(value).expect("fixture envelope must carry a status")
}

/// Envelope carrying only `status` (plus empty `results` for success).
pub fn status_envelope(status: &str) -> ResponseEnvelope {
    if status == "OK" || status == "ZERO_RESULTS" {
        let results = if status == "OK" {
            json!([{ "name": "fixture place" }])
        } else {
            json!([])
        };
        envelope(json!({ "status": status, "results": results }))
    } else {
        envelope(json!({ "status": status }))
    }
}

#[derive(Default)]
struct Recorded {
    queries: Vec<Vec<(String, String)>>,
    started_at: Vec<Instant>,
}

/// In-memory transport replaying a script of responses.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<ResponseEnvelope, TransportError>>>,
    /// Status replayed once the script runs dry.
    repeat: Option<String>,
    latency: Duration,
    recorded: Mutex<Recorded>,
}

impl ScriptedTransport {
    /// Replay exactly these responses; further calls fail with a 599.
    pub fn new(script: Vec<Result<ResponseEnvelope, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            latency: Duration::ZERO,
            recorded: Mutex::new(Recorded::default()),
        }
    }

    /// Answer every call with `status`.
    pub fn always(status: &str) -> Self {
        let mut transport = Self::new(Vec::new());
        transport.repeat = Some(status.to_string());
        transport
    }

    /// Answer with each status in turn, then keep repeating the last one.
    pub fn statuses<const N: usize>(statuses: [&str; N]) -> Self {
        let mut transport = Self::new(
            statuses
                .iter()
                .map(|status| Ok(status_envelope(status)))
                .collect(),
        );
        transport.repeat = statuses.last().map(|status| status.to_string());
        transport
    }

    /// Make every call take `latency` of (tokio) time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.recorded.lock().expect("recorded lock").queries.len()
    }

    pub fn last_query(&self) -> Option<Vec<(String, String)>> {
        self.recorded
            .lock()
            .expect("recorded lock")
            .queries
            .last()
            .cloned()
    }

    /// Time between the starts of consecutive dispatches.
    pub fn call_gaps(&self) -> Vec<Duration> {
        let recorded = self.recorded.lock().expect("recorded lock");
        recorded
            .started_at
            .windows(2)
            .map(|pair| pair[1].duration_since(pair[0]))
            .collect()
    }
}

#[async_trait]
impl PlacesTransport for ScriptedTransport {
    async fn get(
        &self,
        _endpoint: EndpointKind,
        query: &[(&'static str, String)],
    ) -> Result<ResponseEnvelope, TransportError> {
        {
            let mut recorded = self.recorded.lock().expect("recorded lock");
            recorded.queries.push(
                query
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
            );
            recorded.started_at.push(Instant::now());
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(next) = self.script.lock().expect("script lock").pop_front() {
            return next;
        }
        match &self.repeat {
            Some(status) => Ok(status_envelope(status)),
            None => Err(TransportError::Status {
                code: 599,
                body: "script exhausted".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_replays_in_order_then_repeats_last() {
        let transport = ScriptedTransport::statuses(["OVER_QUERY_LIMIT", "OK"]);
        let first = transport.get(EndpointKind::QuerySearch, &[]).await.unwrap();
        let second = transport.get(EndpointKind::QuerySearch, &[]).await.unwrap();
        let third = transport.get(EndpointKind::QuerySearch, &[]).await.unwrap();
        assert_eq!(first.status(), "OVER_QUERY_LIMIT");
        assert_eq!(second.status(), "OK");
        assert_eq!(third.status(), "OK");
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn exhausted_script_fails() {
        let transport = ScriptedTransport::new(Vec::new());
        let err = transport
            .get(EndpointKind::SingleRecord, &[("placeid", "x".into())])
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { code: 599, .. }));
        assert_eq!(
            transport.last_query(),
            Some(vec![("placeid".to_string(), "x".to_string())])
        );
    }
}
