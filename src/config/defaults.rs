//! Default configuration constants.
//!
//! Keeping defaults in one module lets the file model, the resolver and the
//! tests share the same literals.

/// Google Places web service root; endpoint paths are appended to it.
pub(super) const DEFAULT_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
/// Default timeout for one HTTP round trip.
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Delay between retry attempts when neither `[retry].delay_secs` nor
/// `--retry-delay` sets one.
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 1.0;
/// File name searched for locally and under the config root.
pub(super) const CONFIG_FILE_NAME: &str = "places.toml";
/// Directory under the config root.
pub(super) const CONFIG_DIR_NAME: &str = "places";
