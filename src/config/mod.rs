//! Configuration for a scrape run
//!
//! The main `ScrapeConfig` struct is immutable once built and is handed to
//! each pipeline component at construction. Every tunable has a stated
//! default; the builder only overrides.

mod builder;
mod getters;
mod types;

pub use builder::ScrapeConfigBuilder;
pub use types::{FtpConfig, ScrapeConfig};
