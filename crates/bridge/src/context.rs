// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicU64, Ordering},
	},
};

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tonclient_abi::{ContextHandle, Native, NativeString};
use tonclient_type::{ClientError, Error, Numeric, Result};
use tracing::{debug, instrument};

use crate::{
	dispatch::on_response,
	pending::{Event, PENDING, PendingRequest},
	stream::{StreamHandler, pump},
};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a native context.
///
/// A [`Context`] value exists only once creation succeeded, so
/// [`Context::state`] reports `Active` or `Destroyed`. `Uninitialized` names
/// the state before creation; a failed [`Context::create`] stays there and
/// returns an error instead of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
	Uninitialized,
	Active,
	Destroyed,
}

/// One native engine context.
///
/// Created active; destroyed exactly once, explicitly or on drop. Calls after
/// destruction fail with [`Error::ContextClosed`] without reaching the engine.
pub struct Context {
	native: Arc<dyn Native>,
	handle: ContextHandle,
	owner: u64,
	destroyed: AtomicBool,
}

impl Context {
	/// Create a context from a JSON configuration document.
	#[instrument(name = "bridge::context::create", level = "debug", skip_all)]
	pub fn create(native: Arc<dyn Native>, config: &str) -> Result<Self> {
		let config = NativeString::new(config)?;
		let response = native
			.create_context(&config)
			.ok_or_else(|| Error::NativeInit(ClientError::new("native engine returned no context")))?;
		let handle = parse_handle(&response)?;

		let owner = NEXT_OWNER.fetch_add(1, Ordering::Relaxed);
		debug!("created context {}", handle);

		Ok(Self {
			native,
			handle,
			owner,
			destroyed: AtomicBool::new(false),
		})
	}

	pub fn handle(&self) -> ContextHandle {
		self.handle
	}

	pub fn state(&self) -> ContextState {
		if self.destroyed.load(Ordering::Acquire) {
			ContextState::Destroyed
		} else {
			ContextState::Active
		}
	}

	pub fn is_destroyed(&self) -> bool {
		self.state() == ContextState::Destroyed
	}

	/// Requests of this context the engine has not finished yet.
	pub fn in_flight(&self) -> usize {
		PENDING.count_owner(self.owner)
	}

	/// Call `function` and wait for its result document.
	///
	/// An empty string means the engine finished the call without a payload.
	#[instrument(name = "bridge::call", level = "debug", skip_all, fields(function = %function))]
	pub async fn call(&self, function: &str, params: &str) -> Result<String> {
		let mut events = self.start(function, params, false)?;
		while let Some(event) = events.recv().await {
			if let Event::Done(outcome) = event {
				return outcome;
			}
		}
		Err(Error::ContextClosed)
	}

	/// Call `function`, feeding its intermediate events to `handler`.
	///
	/// Events emitted before the result are handled before the result is
	/// returned. Events emitted after it keep reaching `handler` until the
	/// engine finishes the request.
	#[instrument(name = "bridge::call_streaming", level = "debug", skip_all, fields(function = %function))]
	pub async fn call_streaming<H: StreamHandler>(&self, function: &str, params: &str, handler: H) -> Result<String> {
		let events = self.start(function, params, true)?;
		let (result_tx, result_rx) = oneshot::channel();
		tokio::spawn(pump(function.to_string(), events, handler, result_tx));
		result_rx.await.unwrap_or(Err(Error::ContextClosed))
	}

	fn start(&self, function: &str, params: &str, streaming: bool) -> Result<mpsc::UnboundedReceiver<Event>> {
		if self.is_destroyed() {
			return Err(Error::ContextClosed);
		}

		debug!("calling function {} with parameters {}", function, params);
		let function_name = NativeString::new(function)?;
		let params = NativeString::new(params)?;

		let (events_tx, events_rx) = mpsc::unbounded_channel();
		let request_id = PENDING.register(PendingRequest::new(self.owner, function, streaming, events_tx));

		// a destroy racing this call either saw the registration or is seen here
		if self.is_destroyed() {
			PENDING.retire(request_id);
			return Err(Error::ContextClosed);
		}

		if let Err(err) = self.native.request(self.handle, &function_name, &params, request_id, on_response) {
			PENDING.retire(request_id);
			return Err(Error::RequestRejected {
				function: function.to_string(),
				reason: err.to_string(),
			});
		}

		Ok(events_rx)
	}

	/// Destroy the native context. Idempotent.
	///
	/// Requests still pending on this context fail with `ContextClosed`.
	pub fn destroy(&self) {
		if self.destroyed.swap(true, Ordering::AcqRel) {
			return;
		}
		let closed = PENDING.close_owner(self.owner);
		self.native.destroy_context(self.handle);
		debug!("destroyed context {} ({} pending requests closed)", self.handle, closed);
	}
}

impl Drop for Context {
	fn drop(&mut self) {
		self.destroy();
	}
}

impl fmt::Debug for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Context").field("handle", &self.handle).field("state", &self.state()).finish()
	}
}

/// Read `{"result": <handle>}` or `{"error": {...}}`.
fn parse_handle(response: &str) -> Result<ContextHandle> {
	let value: Value = serde_json::from_str(response).map_err(|_| Error::NativeInit(ClientError::from_json(response)))?;

	if let Some(error) = value.get("error") {
		return Err(Error::NativeInit(ClientError::from_value(error)));
	}

	match value.get("result") {
		Some(Value::Number(number)) => ContextHandle::from_number(number).ok_or_else(|| {
			Error::NativeInit(ClientError::new(format!("context handle {} does not fit {}", number, u32::SPEC)))
		}),
		_ => Err(Error::NativeInit(ClientError::from_value(&value))),
	}
}
