//! Places: a client for the Google Places web service.
//!
//! Requests are validated locally, sent with the configured API key and
//! sensor flag, and classified by the `status` field of the response. An
//! optional retry policy repeats a request while the service keeps answering
//! with a named status, bounded by attempt count and an optional timeout.
//!
//! # Quick start
//!
//! ```no_run
//! use places::api::{Location, NearbySearch, PlaceStatus, PlacesClient, RetryOptions};
//! use places::config::load_config;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), places::error::PlacesError> {
//! let config = load_config(None)?;
//! let client = PlacesClient::new(&config.api, Duration::from_secs(30));
//!
//! let search = NearbySearch::new(Location::new(-33.8670522, 151.1957362)).radius(500);
//! let retry = RetryOptions::new(3, PlaceStatus::OverQueryLimit, Duration::from_secs(2))?;
//! let envelope = client.execute(&search.into(), Some(&retry)).await?;
//! println!("{} results", envelope.results().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
#[cfg(test)]
pub mod testsupport;
pub mod types;
