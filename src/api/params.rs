//! Typed request parameters for each Places endpoint.
//!
//! Every endpoint gets its own struct with named required/optional fields;
//! `PlaceRequest` tags them. `validate` is the pre-flight check run before
//! any dispatch, and `query_pairs` renders the endpoint-specific part of the
//! query string (`key` and `sensor` are appended by the client).

use std::fmt;
use std::str::FromStr;

use crate::error::PlacesError;

/// Largest price level the service accepts.
const MAX_PRICE_LEVEL: u8 = 4;

// ---------------------------------------------------------------------------
// Endpoint kinds
// ---------------------------------------------------------------------------

/// The four Places endpoints this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    LocationSearch,
    QuerySearch,
    SingleRecord,
    RadarSearch,
}

impl EndpointKind {
    /// Path below the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::LocationSearch => "nearbysearch/json",
            Self::QuerySearch => "textsearch/json",
            Self::SingleRecord => "details/json",
            Self::RadarSearch => "radarsearch/json",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LocationSearch => "location-search",
            Self::QuerySearch => "query-search",
            Self::SingleRecord => "single-record",
            Self::RadarSearch => "radar-search",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A latitude/longitude pair, sent as `lat,lng`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    fn check(&self) -> Result<(), String> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("latitude {} is out of range", self.lat));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(format!("longitude {} is out of range", self.lng));
        }
        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `lat,lng`, got `{s}`"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude `{}`: {e}", lat.trim()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude `{}`: {e}", lng.trim()))?;
        let location = Self { lat, lng };
        location.check()?;
        Ok(location)
    }
}

/// `rankby` ordering for nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Prominence,
    Distance,
}

impl RankBy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Prominence => "prominence",
            Self::Distance => "distance",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-endpoint parameters
// ---------------------------------------------------------------------------

/// Filters shared by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilters {
    /// Search radius in metres.
    pub radius: Option<u32>,
    /// Place types; joined with `|` on the wire.
    pub types: Vec<String>,
    pub min_price: Option<u8>,
    pub max_price: Option<u8>,
    pub open_now: bool,
}

impl ListFilters {
    fn check(&self) -> Result<(), String> {
        if self.radius == Some(0) {
            return Err("radius must be positive".to_string());
        }
        for (name, level) in [("minprice", self.min_price), ("maxprice", self.max_price)] {
            if level.is_some_and(|level| level > MAX_PRICE_LEVEL) {
                return Err(format!("{name} must be between 0 and {MAX_PRICE_LEVEL}"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(format!("minprice {min} exceeds maxprice {max}"));
            }
        }
        if self.types.iter().any(|t| t.trim().is_empty()) {
            return Err("types must not contain empty entries".to_string());
        }
        Ok(())
    }

    fn push_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(radius) = self.radius {
            pairs.push(("radius", radius.to_string()));
        }
        if !self.types.is_empty() {
            pairs.push(("types", self.types.join("|")));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minprice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxprice", max.to_string()));
        }
        if self.open_now {
            pairs.push(("opennow", "true".to_string()));
        }
    }
}

/// Nearby search around a location.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub location: Location,
    pub keyword: Option<String>,
    pub name: Option<String>,
    pub language: Option<String>,
    pub rank_by: Option<RankBy>,
    pub page_token: Option<String>,
    pub filters: ListFilters,
}

impl NearbySearch {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            keyword: None,
            name: None,
            language: None,
            rank_by: None,
            page_token: None,
            filters: ListFilters::default(),
        }
    }

    pub fn radius(mut self, metres: u32) -> Self {
        self.filters.radius = Some(metres);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn rank_by(mut self, rank_by: RankBy) -> Self {
        self.rank_by = Some(rank_by);
        self
    }

    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    fn check(&self) -> Result<(), String> {
        self.location.check()?;
        self.filters.check()?;
        // The service refuses a radius alongside distance ranking, and wants
        // something to rank by.
        if self.rank_by == Some(RankBy::Distance) {
            if self.filters.radius.is_some() {
                return Err("radius must be omitted when rankby=distance".to_string());
            }
            if !has_text(&self.keyword) && !has_text(&self.name) && self.filters.types.is_empty()
            {
                return Err("rankby=distance requires keyword, name, or types".to_string());
            }
        }
        Ok(())
    }
}

/// Free-text search.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSearch {
    pub query: String,
    pub location: Option<Location>,
    pub language: Option<String>,
    pub page_token: Option<String>,
    pub filters: ListFilters,
}

impl TextSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: None,
            language: None,
            page_token: None,
            filters: ListFilters::default(),
        }
    }

    pub fn near(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn radius(mut self, metres: u32) -> Self {
        self.filters.radius = Some(metres);
        self
    }

    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    fn check(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("missing required parameter `query`".to_string());
        }
        if let Some(location) = &self.location {
            location.check()?;
        }
        self.filters.check()
    }
}

/// How a single place is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceRef {
    PlaceId(String),
    /// Deprecated `reference` token, still accepted by the service.
    Reference(String),
}

impl PlaceRef {
    fn value(&self) -> &str {
        match self {
            Self::PlaceId(id) | Self::Reference(id) => id,
        }
    }

    fn param(&self) -> &'static str {
        match self {
            Self::PlaceId(_) => "placeid",
            Self::Reference(_) => "reference",
        }
    }
}

/// Details lookup for one place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub place: PlaceRef,
    pub language: Option<String>,
}

impl PlaceDetails {
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place: PlaceRef::PlaceId(place_id.into()),
            language: None,
        }
    }

    pub fn by_reference(reference: impl Into<String>) -> Self {
        Self {
            place: PlaceRef::Reference(reference.into()),
            language: None,
        }
    }

    fn check(&self) -> Result<(), String> {
        if self.place.value().trim().is_empty() {
            return Err(format!(
                "missing required parameter `{}`",
                self.place.param()
            ));
        }
        Ok(())
    }
}

/// Radar search: many places, few fields. Needs a keyword or a name.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSearch {
    pub location: Location,
    pub keyword: Option<String>,
    pub name: Option<String>,
    pub filters: ListFilters,
}

impl RadarSearch {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            keyword: None,
            name: None,
            filters: ListFilters::default(),
        }
    }

    pub fn radius(mut self, metres: u32) -> Self {
        self.filters.radius = Some(metres);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn check(&self) -> Result<(), String> {
        self.location.check()?;
        if !has_text(&self.keyword) && !has_text(&self.name) {
            return Err("radar search requires `keyword` or `name`".to_string());
        }
        self.filters.check()
    }
}

// ---------------------------------------------------------------------------
// PlaceRequest
// ---------------------------------------------------------------------------

/// One Places request, tagged by endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceRequest {
    Nearby(NearbySearch),
    Text(TextSearch),
    Details(PlaceDetails),
    Radar(RadarSearch),
}

impl PlaceRequest {
    pub fn kind(&self) -> EndpointKind {
        match self {
            Self::Nearby(_) => EndpointKind::LocationSearch,
            Self::Text(_) => EndpointKind::QuerySearch,
            Self::Details(_) => EndpointKind::SingleRecord,
            Self::Radar(_) => EndpointKind::RadarSearch,
        }
    }

    /// Pre-flight check of required and well-formed parameters.
    pub fn validate(&self) -> Result<(), PlacesError> {
        let checked = match self {
            Self::Nearby(p) => p.check(),
            Self::Text(p) => p.check(),
            Self::Details(p) => p.check(),
            Self::Radar(p) => p.check(),
        };
        checked.map_err(|msg| PlacesError::local(format!("{}: {msg}", self.kind())))
    }

    /// Endpoint-specific query parameters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        match self {
            Self::Nearby(p) => {
                pairs.push(("location", p.location.to_string()));
                push_opt(&mut pairs, "keyword", &p.keyword);
                push_opt(&mut pairs, "name", &p.name);
                push_opt(&mut pairs, "language", &p.language);
                if let Some(rank_by) = p.rank_by {
                    pairs.push(("rankby", rank_by.as_str().to_string()));
                }
                p.filters.push_pairs(&mut pairs);
                push_opt(&mut pairs, "pagetoken", &p.page_token);
            }
            Self::Text(p) => {
                pairs.push(("query", p.query.clone()));
                if let Some(location) = p.location {
                    pairs.push(("location", location.to_string()));
                }
                push_opt(&mut pairs, "language", &p.language);
                p.filters.push_pairs(&mut pairs);
                push_opt(&mut pairs, "pagetoken", &p.page_token);
            }
            Self::Details(p) => {
                pairs.push((p.place.param(), p.place.value().to_string()));
                push_opt(&mut pairs, "language", &p.language);
            }
            Self::Radar(p) => {
                pairs.push(("location", p.location.to_string()));
                push_opt(&mut pairs, "keyword", &p.keyword);
                push_opt(&mut pairs, "name", &p.name);
                p.filters.push_pairs(&mut pairs);
            }
        }
        pairs
    }

    /// Fill in `language` where the endpoint takes one and the caller left
    /// it unset.
    pub(crate) fn default_language(&mut self, language: &str) {
        let slot = match self {
            Self::Nearby(p) => &mut p.language,
            Self::Text(p) => &mut p.language,
            Self::Details(p) => &mut p.language,
            Self::Radar(_) => return,
        };
        if slot.is_none() {
            *slot = Some(language.to_string());
        }
    }
}

impl From<NearbySearch> for PlaceRequest {
    fn from(value: NearbySearch) -> Self {
        Self::Nearby(value)
    }
}

impl From<TextSearch> for PlaceRequest {
    fn from(value: TextSearch) -> Self {
        Self::Text(value)
    }
}

impl From<PlaceDetails> for PlaceRequest {
    fn from(value: PlaceDetails) -> Self {
        Self::Details(value)
    }
}

impl From<RadarSearch> for PlaceRequest {
    fn from(value: RadarSearch) -> Self {
        Self::Radar(value)
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        pairs.push((key, v.to_string()));
    }
}
