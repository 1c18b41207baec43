//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Default filter directive for an environment. `RUST_LOG` overrides it.
pub fn default_directive(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    }
}

/// Initialize the global tracing subscriber.
///
/// `local` logs human readable lines, `dev` and `prod` log JSON.
pub fn init_tracing(env: Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(env).into());

    let registry = tracing_subscriber::registry().with(filter);

    match env {
        Environment::Local => registry.with(tracing_subscriber::fmt::layer()).init(),
        Environment::Dev | Environment::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
