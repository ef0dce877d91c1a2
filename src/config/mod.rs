//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`PLACES_API_KEY`, `PLACES_BASE_URL`,
//!    `PLACES_TIMEOUT_SECS`).
//! 2. TOML file specified via --config CLI flag
//! 3. ./places.toml in the current directory
//! 4. $XDG_CONFIG_HOME/places/places.toml (or ~/.config/places/places.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod resolve;
mod sources;
mod types;

pub use defaults::DEFAULT_RETRY_DELAY_SECS;
pub use loader::{load_config, load_config_with_source};
pub use resolve::parse_seconds;
pub use types::{ApiConfig, Config, ConfigSource, LoadedConfig, NetworkConfig};
