//! Tracing setup shared by the binaries

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when `RUST_LOG` is not set
pub fn default_directive(config: &LoggingConfig) -> String {
    format!("weightlog={},tower_http=debug", config.level)
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. `format = "json"`
/// switches to structured JSON lines, anything else uses the pretty layer.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
