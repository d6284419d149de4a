// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Response-type codes passed to the response callback

use std::fmt::{self, Display, Formatter};

/// Terminal success; payload is the result document.
pub const RESPONSE_SUCCESS: u32 = 0;
/// Terminal failure; payload is an error document.
pub const RESPONSE_ERROR: u32 = 1;
/// Carries no payload of interest.
pub const RESPONSE_NOP: u32 = 2;
/// First code of the intermediate streaming range.
pub const RESPONSE_STREAM_BASE: u32 = 100;
/// The engine asks an application object for a result.
pub const RESPONSE_APP_REQUEST: u32 = 100;
/// The engine informs an application object; no answer expected.
pub const RESPONSE_APP_NOTIFY: u32 = 101;

/// Classified response-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
	Success,
	Error,
	Nop,
	/// Codes 3..=99, ignored apart from the finished flag.
	Reserved(u32),
	/// Codes >= 100, delivered in order to the stream handler.
	Stream(u32),
}

impl ResponseType {
	pub fn from_code(code: u32) -> Self {
		match code {
			RESPONSE_SUCCESS => ResponseType::Success,
			RESPONSE_ERROR => ResponseType::Error,
			RESPONSE_NOP => ResponseType::Nop,
			code if code >= RESPONSE_STREAM_BASE => ResponseType::Stream(code),
			code => ResponseType::Reserved(code),
		}
	}

	pub fn code(&self) -> u32 {
		match self {
			ResponseType::Success => RESPONSE_SUCCESS,
			ResponseType::Error => RESPONSE_ERROR,
			ResponseType::Nop => RESPONSE_NOP,
			ResponseType::Reserved(code) | ResponseType::Stream(code) => *code,
		}
	}

	/// Whether this response resolves the call by itself.
	pub fn is_terminal(&self) -> bool {
		matches!(self, ResponseType::Success | ResponseType::Error)
	}
}

impl Display for ResponseType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ResponseType::Success => f.write_str("success"),
			ResponseType::Error => f.write_str("error"),
			ResponseType::Nop => f.write_str("nop"),
			ResponseType::Reserved(code) => write!(f, "reserved({code})"),
			ResponseType::Stream(code) => write!(f, "stream({code})"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classification() {
		assert_eq!(ResponseType::from_code(0), ResponseType::Success);
		assert_eq!(ResponseType::from_code(1), ResponseType::Error);
		assert_eq!(ResponseType::from_code(2), ResponseType::Nop);
		assert_eq!(ResponseType::from_code(3), ResponseType::Reserved(3));
		assert_eq!(ResponseType::from_code(99), ResponseType::Reserved(99));
		assert_eq!(ResponseType::from_code(100), ResponseType::Stream(100));
		assert_eq!(ResponseType::from_code(u32::MAX), ResponseType::Stream(u32::MAX));
	}

	#[test]
	fn test_code_is_preserved() {
		for code in [0, 1, 2, 7, 99, 100, 101, 150] {
			assert_eq!(ResponseType::from_code(code).code(), code);
		}
	}

	#[test]
	fn test_only_success_and_error_are_terminal() {
		assert!(ResponseType::Success.is_terminal());
		assert!(ResponseType::Error.is_terminal());
		assert!(!ResponseType::Nop.is_terminal());
		assert!(!ResponseType::Stream(RESPONSE_APP_NOTIFY).is_terminal());
	}
}
