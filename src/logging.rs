//! Tracing subscriber set-up for the Lambda process.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "fatwa_api=info";

/// Output format of log events.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// One JSON object per event, for CloudWatch.
    #[default]
    Json,
    /// Human-readable lines, for local runs.
    Text,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; anything but `text` means JSON.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("text") => Self::Text,
            _ => Self::Json,
        }
    }
}

/// Install the global subscriber.
///
/// Filtering follows `RUST_LOG` (default [`DEFAULT_FILTER`]) and the format
/// follows `LOG_FORMAT`. Calling this twice leaves the first subscriber in
/// place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);
    // Lambda stamps every line itself
    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .without_time()
                    .with_current_span(false)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().without_time().with_target(false))
            .try_init(),
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "subscriber already installed");
    }
}
