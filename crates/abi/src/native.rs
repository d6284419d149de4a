// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tonclient_type::Result;

use crate::buffer::{NativeString, StringData};

/// Opaque id of a native context. Zero never names a live context.
pub type ContextHandle = u32;

/// Response callback registered with every request.
///
/// Invoked zero or more times per request, from arbitrary native threads,
/// possibly before `request` returns. `params_json` is only valid for the
/// duration of the invocation.
pub type ResponseHandler = extern "C" fn(request_id: u32, params_json: StringData, response_type: u32, finished: bool);

/// Entry points of the native engine.
///
/// Implemented by [`crate::DynamicLibrary`] for the real shared library and by
/// in-process doubles in tests.
pub trait Native: Send + Sync {
	/// Create a context from a JSON configuration.
	///
	/// Returns the engine's JSON answer, `{"result": <handle>}` or
	/// `{"error": {...}}`, or `None` when the engine returned no string.
	fn create_context(&self, config: &NativeString) -> Option<String>;

	/// Start an asynchronous request.
	///
	/// `Err` means the request never started and `handler` will not be
	/// invoked for `request_id`.
	fn request(
		&self,
		context: ContextHandle,
		function: &NativeString,
		params: &NativeString,
		request_id: u32,
		handler: ResponseHandler,
	) -> Result<()>;

	fn destroy_context(&self, context: ContextHandle);
}
