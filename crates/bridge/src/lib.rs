// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Request correlation against a native engine context
//!
//! A [`Context`] owns one native context handle. Every call registers a
//! pending request in a process-wide table keyed by correlation id before the
//! native request is issued; the C callback looks the request up there, so the
//! table (not the caller's stack) keeps the completion path alive until the
//! engine reports `finished`.

mod context;
mod dispatch;
mod envelope;
mod pending;
mod stream;

pub use context::{Context, ContextState};
pub use envelope::ResponseEnvelope;
pub use stream::{StreamEvent, StreamHandler};
pub use tonclient_type::{Error, Result};

/// Number of requests in flight across every context of the process.
pub fn pending_requests() -> usize {
	pending::PENDING.len()
}
