// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Test support for the tonclient crates
//!
//! [`MockEngine`] stands in for the native engine: it implements
//! [`tonclient_abi::Native`] and answers requests from its own worker threads
//! through the real C callback, so the whole request protocol runs in tests.

pub mod logging;
pub mod mock;
pub mod util;

pub use logging::init_logging;
pub use mock::{MockEngine, MockOptions, Responder};
