// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the Understory demos.

use std::env;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Default filter: our crates at debug, everything else at warn.
const DEFAULT_FILTER: &str = "warn,understory_flex=debug,understory_interaction=debug";

/// Install a compact stdout `tracing` subscriber.
///
/// Accepts the standard `RUST_LOG` filter, appended to the defaults.
pub fn init_logging() {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(extra) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&extra);
    }
    let stdout_log = fmt::layer().compact().with_target(true);
    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stdout_log);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }
}
