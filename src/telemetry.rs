//! Tracing setup for hosts embedding `chart-viewport`.
//!
//! Controller, gesture and fetch paths log through `tracing` under the
//! `chart_viewport` target. Installing a subscriber is left to the host;
//! `init_default_tracing` and `init_tracing_with_filter` cover the common case.

/// Filter used when `RUST_LOG` is unset: host logs at `info`, the viewport
/// layer at `warn` so per-gesture `debug!` lines stay quiet.
pub const DEFAULT_TRACING_FILTER: &str = "info,chart_viewport=warn";

/// Installs a compact stderr subscriber honouring `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_FILTER));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Installs a compact stderr subscriber with an explicit filter directive,
/// e.g. `"chart_viewport=debug"` to trace every gesture step.
///
/// Returns `false` for an unparsable directive, when the `telemetry` feature
/// is disabled, or when a global subscriber is already set.
#[must_use]
pub fn init_tracing_with_filter(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        match tracing_subscriber::EnvFilter::try_new(directive) {
            Ok(filter) => install(filter),
            Err(_) => false,
        }
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
