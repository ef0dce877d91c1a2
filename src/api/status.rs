//! Places `status` vocabulary and its classification.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Status reported in every Places response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceStatus {
    Ok,
    /// Valid request with nothing to return. Not an error.
    ZeroResults,
    /// The service judged the parameters missing or malformed.
    InvalidRequest,
    /// Usually a bad key or a missing `sensor` flag.
    RequestDenied,
    /// Quota exhausted.
    OverQueryLimit,
    /// The referenced place does not exist.
    NotFound,
    /// Anything outside the documented vocabulary, kept verbatim.
    Unknown(String),
}

/// Classify a raw status string. Total and side-effect free.
pub fn classify(status: &str) -> PlaceStatus {
    match status {
        "OK" => PlaceStatus::Ok,
        "ZERO_RESULTS" => PlaceStatus::ZeroResults,
        "INVALID_REQUEST" => PlaceStatus::InvalidRequest,
        "REQUEST_DENIED" => PlaceStatus::RequestDenied,
        "OVER_QUERY_LIMIT" => PlaceStatus::OverQueryLimit,
        "NOT_FOUND" => PlaceStatus::NotFound,
        other => PlaceStatus::Unknown(other.to_string()),
    }
}

impl PlaceStatus {
    /// Wire form of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::NotFound => "NOT_FOUND",
            Self::Unknown(raw) => raw,
        }
    }

    /// `OK` and `ZERO_RESULTS` both hand the envelope back to the caller.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok | Self::ZeroResults)
    }

    /// Statuses a retry policy is allowed to act on.
    ///
    /// `NOT_FOUND` and `REQUEST_DENIED` never change on a resend.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest | Self::OverQueryLimit | Self::Unknown(_)
        )
    }
}

impl fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(classify(s.trim()))
    }
}

impl Serialize for PlaceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlaceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(classify(&raw))
    }
}
