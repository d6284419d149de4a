// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing_subscriber::EnvFilter;

/// Install a test subscriber once per process; `RUST_LOG` controls the level.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_test_writer()
		.try_init();
}
