// src/util/testing.rs

use std::env;
use std::sync::OnceLock;
use tracing::debug;
use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

/// Set exactly once for the whole test binary.
static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes logging for tests exactly once.
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
    });
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing`
/// is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "debug");
    }

    let noisy_modules = ["reqwest", "mio", "want", "hyper_util"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_test_writer()
                .with_filter(EnvFilter::from_default_env())
                .with_filter(module_filter),
        )
        .try_init();
}

/// Saves the process environment this crate reads and restores it on drop,
/// so env-mutating tests leave no trace. Use together with #[serial].
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

const GUARDED_VARS: [&str; 5] = [
    "OLLAMA_HOST",
    "OLLO_EMBED_MODEL",
    "OLLO_GEN_MODEL",
    "OLLO_SERVER",
    "OLLO_LOG_LEVEL",
];

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: GUARDED_VARS
                .iter()
                .map(|&name| (name, env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(val) => env::set_var(name, val),
                None => env::remove_var(name),
            }
        }
    }
}
