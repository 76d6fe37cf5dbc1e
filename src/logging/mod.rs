use crate::config::DEFAULT_LOG_DIRECTIVE;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; stdout carries output.
///
/// `RUST_LOG` overrides the default `moltbot_env=info` filter.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
