use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, FmtSubscriber};

use crate::formatter::TickFormatter;

static SUBSCRIBER_INIT: Once = Once::new();

/// Installs the global subscriber. Safe to call more than once.
///
/// Logs go to stderr so they never interleave with a frame drawn on stdout.
/// `RUST_LOG` overrides the default of `warn` for dependencies and `info` for this crate.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let subscriber = FmtSubscriber::builder()
            .with_writer(std::io::stderr)
            .event_format(TickFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Could not set global default subscriber: {e}");
        }
    });
}
