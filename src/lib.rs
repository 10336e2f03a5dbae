pub mod api; // JSON API: /api/risk, /api/ping
pub mod client;
pub mod config;
pub mod confirmation;
pub mod family;
pub mod models;
pub mod scoring;
pub mod session;
pub mod validation;

use tracing_subscriber::EnvFilter;

pub use models::{RiskBreakdown, RiskCategory, RiskInput};
pub use scoring::{assess, score};

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
