//! Tracing setup shared by the binaries.
use std::sync::OnceLock;

use color_eyre::eyre::{self, Context as _, eyre};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _};

static TELEMETRY_INIT: OnceLock<()> = OnceLock::new();

/// Transport crates that log every request at debug level.
const QUIET_TARGETS: [&str; 4] = [
    "hyper_util",
    "reqwest",
    "alloy_rpc_client",
    "alloy_transport_http",
];

/// `RUST_LOG` if set, otherwise `default_level`, with the transport crates capped at `warn`.
pub fn env_filter(default_level: &str) -> eyre::Result<EnvFilter> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .wrap_err_with(|| format!("invalid log level `{default_level}`"))?,
    };
    quiet_transports(filter)
}

fn quiet_transports(mut filter: EnvFilter) -> eyre::Result<EnvFilter> {
    for target in QUIET_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }
    Ok(filter)
}

/// Logs go to stderr so the panel rendered on stdout stays readable.
pub fn get_subscriber(default_level: &str) -> eyre::Result<impl Subscriber + Send + Sync> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true);

    Ok(tracing_subscriber::Registry::default()
        .with(env_filter(default_level)?)
        .with(fmt_layer))
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> eyre::Result<()> {
    TELEMETRY_INIT
        .set(())
        .map_err(|_| eyre!("global tracing subscriber already set"))?;
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting default subscriber failed")
}
