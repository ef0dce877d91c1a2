//! CLI argument parsing via clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use places::api::{
    Location, NearbySearch, PlaceDetails, PlaceRequest, PlaceStatus, RadarSearch, RankBy,
    RetryOptions, TextSearch,
};
use places::config::{parse_seconds, DEFAULT_RETRY_DELAY_SECS};
use places::error::ConfigError;

/// Query the Google Places web service and print the raw JSON response.
#[derive(Debug, Parser)]
#[command(name = "places", disable_version_flag = true)]
pub struct Args {
    /// Path to config file (default: ./places.toml or ~/.config/places/places.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override API base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Send `sensor=true`.
    #[arg(long = "sensor", global = true, conflicts_with = "no_sensor")]
    pub sensor: bool,

    /// Send `sensor=false`, even if the config file enables it.
    #[arg(long = "no-sensor", global = true)]
    pub no_sensor: bool,

    /// Default language for results.
    #[arg(long = "language", global = true)]
    pub language: Option<String>,

    #[command(flatten)]
    pub retry: RetryArgs,

    /// Increase log verbosity (-v, -vv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print version and build metadata.
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// `Some` when `--sensor` or `--no-sensor` was given.
    pub fn sensor_override(&self) -> Option<bool> {
        match (self.sensor, self.no_sensor) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Retry flags; `--retry-max` enables retries and overrides `[retry]`.
#[derive(Debug, Clone, ClapArgs)]
pub struct RetryArgs {
    /// Total attempts, including the first.
    #[arg(long = "retry-max", global = true)]
    pub max: Option<u32>,

    /// Status that triggers a retry (repeatable).
    #[arg(long = "retry-status", global = true, default_value = "INVALID_REQUEST")]
    pub status: Vec<PlaceStatus>,

    /// Seconds between attempts.
    #[arg(long = "retry-delay", global = true, default_value_t = DEFAULT_RETRY_DELAY_SECS)]
    pub delay: f64,

    /// Give up after this many seconds.
    #[arg(long = "retry-timeout", global = true)]
    pub timeout: Option<f64>,
}

impl RetryArgs {
    /// Policy from the flags when `--retry-max` is given, else `fallback`.
    pub fn resolve(
        &self,
        fallback: Option<RetryOptions>,
    ) -> Result<Option<RetryOptions>, ConfigError> {
        let Some(max) = self.max else {
            return Ok(fallback);
        };
        let mut statuses = self.status.iter().cloned();
        let first = statuses.next().unwrap_or(PlaceStatus::InvalidRequest);
        let delay = parse_seconds("--retry-delay", self.delay)?;
        let mut options = statuses.try_fold(RetryOptions::new(max, first, delay)?, |options, status| {
            options.also_on(status)
        })?;
        if let Some(timeout) = self.timeout {
            options = options.with_timeout(parse_seconds("--retry-timeout", timeout)?)?;
        }
        Ok(Some(options))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Places near a location.
    Nearby {
        /// `lat,lng`
        #[arg(long, allow_hyphen_values = true)]
        location: Location,
        #[arg(long)]
        radius: Option<u32>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Place type filter (repeatable).
        #[arg(long = "type")]
        types: Vec<String>,
        /// Rank by distance instead of prominence.
        #[arg(long = "by-distance")]
        by_distance: bool,
        #[arg(long = "page-token")]
        page_token: Option<String>,
    },
    /// Free-text search.
    Text {
        query: String,
        /// Bias results around `lat,lng`.
        #[arg(long, allow_hyphen_values = true)]
        location: Option<Location>,
        #[arg(long)]
        radius: Option<u32>,
        #[arg(long = "page-token")]
        page_token: Option<String>,
    },
    /// Details for one place.
    Details {
        place_id: String,
        /// Treat the identifier as a legacy `reference` token.
        #[arg(long)]
        reference: bool,
    },
    /// Radar search; needs --keyword or --name.
    Radar {
        #[arg(long, allow_hyphen_values = true)]
        location: Location,
        #[arg(long)]
        radius: Option<u32>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        types: Vec<String>,
    },
}

impl Command {
    /// Lookup request for this subcommand.
    pub fn to_request(&self) -> PlaceRequest {
        match self {
            Self::Nearby {
                location,
                radius,
                keyword,
                name,
                types,
                by_distance,
                page_token,
            } => {
                let mut search = NearbySearch::new(*location).types(types.iter().cloned());
                search.filters.radius = *radius;
                search.keyword = keyword.clone();
                search.name = name.clone();
                search.page_token = page_token.clone();
                if *by_distance {
                    search = search.rank_by(RankBy::Distance);
                }
                PlaceRequest::from(search)
            }
            Self::Text {
                query,
                location,
                radius,
                page_token,
            } => {
                let mut search = TextSearch::new(query.clone());
                search.location = *location;
                search.filters.radius = *radius;
                search.page_token = page_token.clone();
                PlaceRequest::from(search)
            }
            Self::Details {
                place_id,
                reference,
            } => {
                if *reference {
                    PlaceDetails::by_reference(place_id.clone()).into()
                } else {
                    PlaceDetails::new(place_id.clone()).into()
                }
            }
            Self::Radar {
                location,
                radius,
                keyword,
                name,
                types,
            } => {
                let mut search = RadarSearch::new(*location);
                search.filters.radius = *radius;
                search.filters.types = types.clone();
                search.keyword = keyword.clone();
                search.name = name.clone();
                PlaceRequest::from(search)
            }
        }
    }
}
