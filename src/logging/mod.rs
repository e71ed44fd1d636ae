//! Logging setup.
//!
//! `production`/`prod` environments get JSON lines for log aggregation; every
//! other environment gets coloured, human-readable output.

use crate::config::get_environment;
use std::io;
use tracing_subscriber::{
    fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

fn is_production(env: &str) -> bool {
    matches!(env, "production" | "prod")
}

fn install<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(writer);

    let registry = tracing_subscriber::registry().with(env_filter);
    if is_production(&get_environment()) {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.with_ansi(true)).init();
    }
}

/// Server logging on stdout
pub fn init_logging() {
    install(io::stdout);
}

/// CLI logging on stderr, keeping stdout for the JSON result
pub fn init_cli_logging() {
    install(io::stderr);
}
