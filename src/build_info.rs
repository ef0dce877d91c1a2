//! Build metadata baked in by `build.rs`.

/// Crate version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git revision at build time, or `unknown`.
pub const GIT_COMMIT: &str = env!("PLACES_BUILD_GIT_HASH");

/// UTC build timestamp.
pub const BUILD_TIMESTAMP: &str = env!("PLACES_BUILD_TIMESTAMP");

/// Text printed by `places --version`.
pub fn version_text() -> String {
    format!("places {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}

/// User agent sent with every lookup.
pub fn user_agent() -> String {
    format!("places/{VERSION}")
}
