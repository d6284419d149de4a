// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tonclient_abi::ResponseType;

/// One native callback invocation, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEnvelope {
	/// Result document of the call.
	Success(String),
	/// Error document of the call.
	Error(String),
	NoOp,
	/// Protocol-internal code; only its `finished` flag matters.
	Reserved(u32),
	/// Intermediate payload for the call's stream handler.
	Stream {
		kind: u32,
		payload: String,
	},
}

impl ResponseEnvelope {
	pub fn new(response_type: u32, payload: String) -> Self {
		match ResponseType::from_code(response_type) {
			ResponseType::Success => ResponseEnvelope::Success(payload),
			ResponseType::Error => ResponseEnvelope::Error(payload),
			ResponseType::Nop => ResponseEnvelope::NoOp,
			ResponseType::Reserved(code) => ResponseEnvelope::Reserved(code),
			ResponseType::Stream(kind) => ResponseEnvelope::Stream {
				kind,
				payload,
			},
		}
	}
}
