use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::formatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Installs the global tracing subscriber. Later calls do nothing.
///
/// `RUST_LOG` overrides the default filter, which shows this crate's debug output and
/// only warnings from dependencies.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=debug", name = env!("CARGO_CRATE_NAME"))));

        let subscriber = FmtSubscriber::builder()
            .with_target(true)
            .event_format(formatter::CustomFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::warn!("A global tracing subscriber was already installed");
        }
    });
}
