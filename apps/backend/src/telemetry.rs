use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the JSON subscriber used by binaries. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
