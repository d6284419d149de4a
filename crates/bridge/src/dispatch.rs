// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! The C callback every native request is issued with.

use std::{
	any::Any,
	panic::{AssertUnwindSafe, catch_unwind},
};

use tonclient_abi::StringData;
use tonclient_type::{ClientError, Error};
use tracing::{error, trace, warn};

use crate::{envelope::ResponseEnvelope, pending::PENDING, stream::StreamEvent};

/// Entry point of every native response.
///
/// Runs on engine threads, possibly before the issuing `request` returned.
/// Panics must not unwind into the engine.
pub(crate) extern "C" fn on_response(request_id: u32, params_json: StringData, response_type: u32, finished: bool) {
	let outcome = catch_unwind(AssertUnwindSafe(|| dispatch(request_id, params_json, response_type, finished)));
	if let Err(panic) = outcome {
		error!("native response handler panicked for request {}: {}", request_id, panic_message(&*panic));
	}
}

fn dispatch(request_id: u32, params_json: StringData, response_type: u32, finished: bool) {
	trace!(request_id, response_type, finished, "native response");

	let Some(request) = PENDING.get(request_id) else {
		warn!("response type {} for unknown request {}", response_type, request_id);
		return;
	};

	// SAFETY: the engine keeps the buffer alive for this invocation; it is
	// copied out before returning
	match unsafe { params_json.read() } {
		Ok(payload) => match ResponseEnvelope::new(response_type, payload) {
			ResponseEnvelope::Success(result) => {
				request.resolve(Ok(result));
			}
			ResponseEnvelope::Error(document) => {
				request.resolve(Err(Error::Remote(ClientError::from_json(&document))));
			}
			ResponseEnvelope::NoOp => {}
			ResponseEnvelope::Reserved(code) => {
				trace!("ignoring reserved response type {} for request {}", code, request_id);
			}
			ResponseEnvelope::Stream {
				kind,
				payload,
			} => {
				if request.streaming {
					request.stream(StreamEvent {
						kind,
						payload,
					});
				} else {
					warn!("{} produced stream event {} without a stream handler", request.function, kind);
				}
			}
		},
		Err(err) => {
			warn!("unreadable response for request {} ({}): {}", request_id, request.function, err);
			request.resolve(Err(err.into()));
		}
	}

	if finished && let Some(request) = PENDING.retire(request_id) {
		// finished without a terminal result resolves as empty success
		request.resolve(Ok(String::new()));
		trace!("request {} ({}) retired", request_id, request.function);
	}
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
	if let Some(message) = panic.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = panic.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic".to_string()
	}
}
