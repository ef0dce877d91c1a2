//! Response envelope returned by every Places endpoint.
//!
//! The body is kept as a JSON object; only the envelope fields the client
//! needs are read out.

use serde_json::{Map, Value};

use crate::api::status::{classify, PlaceStatus};
use crate::error::TransportError;

/// Decoded response body of one Places call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    body: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Wrap a decoded JSON value. The body must be an object carrying a
    /// string `status`.
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        let Value::Object(body) = value else {
            return Err(decode_error("response body is not a JSON object"));
        };
        if !body.get("status").is_some_and(Value::is_string) {
            return Err(decode_error("response body has no string `status` field"));
        }
        Ok(Self { body })
    }

    /// Parse raw response text.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TransportError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Raw `status` string.
    pub fn status(&self) -> &str {
        self.body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn place_status(&self) -> PlaceStatus {
        classify(self.status())
    }

    /// `results` of list endpoints; empty when absent (e.g. `ZERO_RESULTS`).
    pub fn results(&self) -> &[Value] {
        self.body
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `result` of the details endpoint.
    pub fn result(&self) -> Option<&Value> {
        self.body.get("result").filter(|value| !value.is_null())
    }

    /// Human-readable reason the service attaches to failures.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error_message").and_then(Value::as_str)
    }

    /// Token for the next page of a list search.
    pub fn next_page_token(&self) -> Option<&str> {
        self.body.get("next_page_token").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

fn decode_error(msg: &str) -> TransportError {
    TransportError::Decode(serde::de::Error::custom(msg))
}
