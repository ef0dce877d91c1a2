//! HTTP client for the Places web service.
//!
//! The API layer is split into cohesive modules:
//! - `status`: the service's `status` vocabulary and its classification
//! - `params`: typed per-endpoint parameters and pre-flight validation
//! - `client`: request execution, retry policy and the HTTP transport

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::ResponseEnvelope;

mod client;
pub mod params;
pub mod status;

pub use client::{HttpTransport, PlacesClient, RetryOptions};
pub use params::{
    EndpointKind, ListFilters, Location, NearbySearch, PlaceDetails, PlaceRef, PlaceRequest,
    RadarSearch, RankBy, TextSearch,
};
pub use status::{classify, PlaceStatus};

/// One GET round trip to a Places endpoint.
///
/// This trait lets tests provide deterministic scripted responses without
/// network calls while the production path uses [`HttpTransport`].
#[async_trait]
pub trait PlacesTransport: Send + Sync {
    async fn get(
        &self,
        endpoint: EndpointKind,
        query: &[(&'static str, String)],
    ) -> Result<ResponseEnvelope, TransportError>;
}
