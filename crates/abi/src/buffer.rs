// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! UTF-8 string buffers crossing the C boundary

use std::{fmt, slice};

use tonclient_type::{DecodeError, Error, Result};

/// Borrowed view of a UTF-8 string, passed by value across the C boundary.
///
/// Never owns its bytes. Whoever produced it decides how long it stays valid:
/// buffers built from a [`NativeString`] live as long as that string, buffers
/// handed to a response callback only for that single invocation.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct StringData {
	/// Pointer to the first byte
	pub content: *const u8,
	/// Length in bytes
	pub len: u32,
}

impl StringData {
	pub const fn empty() -> Self {
		Self {
			content: std::ptr::null(),
			len: 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0 || self.content.is_null()
	}

	/// Get the buffer as a byte slice.
	///
	/// # Safety
	/// `content` must point to `len` readable bytes for the whole lifetime `'a`.
	pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
		if self.is_empty() {
			&[]
		} else {
			// SAFETY: upheld by the caller
			unsafe { slice::from_raw_parts(self.content, self.len as usize) }
		}
	}

	/// Copy the buffer out into an owned string.
	///
	/// # Safety
	/// Same contract as [`StringData::as_bytes`], for the duration of this call.
	pub unsafe fn read(&self) -> std::result::Result<String, DecodeError> {
		// SAFETY: upheld by the caller
		let bytes = unsafe { self.as_bytes() };
		String::from_utf8(bytes.to_vec()).map_err(|err| DecodeError::Utf8(err.to_string()))
	}
}

impl fmt::Debug for StringData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StringData").field("content", &self.content).field("len", &self.len).finish()
	}
}

/// Owned UTF-8 buffer handed to the native layer.
///
/// Must outlive every native call that received a [`StringData`] view of it.
/// The engine copies what it needs before `tc_request` / `tc_create_context`
/// return, so dropping it right after the call returns is sound.
#[derive(Debug, Clone)]
pub struct NativeString {
	text: Box<str>,
}

impl NativeString {
	pub fn new(text: impl Into<String>) -> Result<Self> {
		let text = text.into();
		if u32::try_from(text.len()).is_err() {
			return Err(Error::Encode(format!("string of {} bytes exceeds the native length limit", text.len())));
		}
		Ok(Self {
			text: text.into_boxed_str(),
		})
	}

	pub fn as_data(&self) -> StringData {
		StringData {
			content: self.text.as_ptr(),
			len: self.text.len() as u32,
		}
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}

	pub fn len(&self) -> usize {
		self.text.len()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_round_trip_utf8() {
		let owned = NativeString::new("crypto.sha256 ключ ✓").unwrap();
		let data = owned.as_data();
		assert_eq!(data.len as usize, "crypto.sha256 ключ ✓".len());
		assert_eq!(unsafe { data.read() }.unwrap(), "crypto.sha256 ключ ✓");
	}

	#[test]
	fn test_empty_buffers() {
		assert!(StringData::empty().is_empty());
		assert_eq!(unsafe { StringData::empty().read() }.unwrap(), "");

		let owned = NativeString::new("").unwrap();
		assert!(owned.is_empty());
		assert_eq!(unsafe { owned.as_data().read() }.unwrap(), "");
	}

	#[test]
	fn test_invalid_utf8_is_decode_error() {
		let bytes = [0x66u8, 0xff, 0x6f];
		let data = StringData {
			content: bytes.as_ptr(),
			len: bytes.len() as u32,
		};
		assert!(matches!(unsafe { data.read() }, Err(DecodeError::Utf8(_))));
	}
}
