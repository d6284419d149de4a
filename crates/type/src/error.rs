// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{document::ClientError, numeric::NumericSpec};

/// Unified error type for every tonclient operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The native engine refused to create a context. Fatal to that client.
	#[error("native context initialization failed: {0}")]
	NativeInit(ClientError),

	/// A call was issued after the context was destroyed. Never reaches the native layer.
	#[error("context is closed")]
	ContextClosed,

	/// The native engine answered with an error document.
	#[error("{0}")]
	Remote(ClientError),

	#[error(transparent)]
	Decode(#[from] DecodeError),

	#[error("failed to encode value: {0}")]
	Encode(String),

	/// The native library could not be loaded or is missing a symbol.
	#[error("native library error: {0}")]
	Library(String),

	/// The native layer refused to start the request; nothing was registered.
	#[error("request `{function}` was not accepted by the native layer: {reason}")]
	RequestRejected {
		function: String,
		reason: String,
	},

	#[error("variant set registration failed: {0}")]
	Registration(String),

	#[error("configuration error: {0}")]
	Config(String),

	/// An application object failed to process a request from the engine.
	#[error("app object failed: {0}")]
	AppObject(String),
}

impl Error {
	/// Stable diagnostic code of this error.
	pub fn code(&self) -> &'static str {
		match self {
			Error::NativeInit(_) => "CONTEXT_001",
			Error::ContextClosed => "CONTEXT_002",
			Error::Remote(_) => "REMOTE_001",
			Error::Decode(err) => err.code(),
			Error::Encode(_) => "CODEC_001",
			Error::Library(_) => "NATIVE_001",
			Error::RequestRejected {
				..
			} => "NATIVE_002",
			Error::Registration(_) => "CODEC_002",
			Error::Config(_) => "CONFIG_001",
			Error::AppObject(_) => "APP_001",
		}
	}

	/// The remote error document, if the native engine produced this error.
	pub fn client_error(&self) -> Option<&ClientError> {
		match self {
			Error::NativeInit(err) | Error::Remote(err) => Some(err),
			_ => None,
		}
	}

	pub fn is_context_closed(&self) -> bool {
		matches!(self, Error::ContextClosed)
	}
}

/// Failure to turn native JSON into a typed value.
///
/// Always a protocol or schema mismatch between binding and engine; it fails
/// the call it belongs to and nothing else.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
	/// The `type` discriminator names no member of the requested variant set.
	#[error("unknown variant `{variant}`, expected {expected}")]
	UnknownVariant {
		variant: String,
		expected: String,
	},

	/// A concrete variant was requested but the document names another one.
	#[error("expected variant `{expected}`, found `{found}`")]
	VariantMismatch {
		expected: String,
		found: String,
	},

	#[error("missing `type` discriminator for {set}")]
	MissingDiscriminator {
		set: String,
	},

	/// A number does not fit the native width it is declared with.
	#[error("numeric value {value} does not fit {expected}")]
	NumericOverflow {
		value: String,
		expected: NumericSpec,
	},

	#[error("invalid utf-8 in native buffer: {0}")]
	Utf8(String),

	#[error("malformed json: {0}")]
	Malformed(String),
}

impl DecodeError {
	pub fn code(&self) -> &'static str {
		match self {
			DecodeError::UnknownVariant {
				..
			} => "DECODE_001",
			DecodeError::VariantMismatch {
				..
			} => "DECODE_002",
			DecodeError::MissingDiscriminator {
				..
			} => "DECODE_003",
			DecodeError::NumericOverflow {
				..
			} => "DECODE_004",
			DecodeError::Utf8(_) => "DECODE_005",
			DecodeError::Malformed(_) => "DECODE_006",
		}
	}
}
