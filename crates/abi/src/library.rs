// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Native engine loaded from a shared library

use std::{
	env,
	ffi::c_void,
	path::{Path, PathBuf},
};

use libloading::Library;
use tonclient_type::{Error, Result};
use tracing::{debug, instrument, warn};

use crate::{
	buffer::{NativeString, StringData},
	native::{ContextHandle, Native, ResponseHandler},
};

/// Environment variable overriding the library location.
pub const LIBRARY_ENV: &str = "TON_CLIENT_LIB";

type CreateContextFn = unsafe extern "C" fn(config: StringData) -> *const c_void;
type RequestFn = unsafe extern "C" fn(
	context: ContextHandle,
	function: StringData,
	params: StringData,
	request_id: u32,
	handler: ResponseHandler,
);
type DestroyContextFn = unsafe extern "C" fn(context: ContextHandle);
type ReadStringFn = unsafe extern "C" fn(handle: *const c_void) -> StringData;
type DestroyStringFn = unsafe extern "C" fn(handle: *const c_void);

/// Shared library exporting the `tc_*` entry points.
pub struct DynamicLibrary {
	path: PathBuf,
	create_context: CreateContextFn,
	request: RequestFn,
	destroy_context: DestroyContextFn,
	read_string: ReadStringFn,
	destroy_string: DestroyStringFn,
	// Keeps the function pointers above valid; dropped last.
	_library: Library,
}

impl DynamicLibrary {
	/// Load the engine from `path` and resolve every entry point.
	#[instrument(name = "abi::library::open", level = "debug", skip_all)]
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();

		// SAFETY: loading runs the library's initializers; the engine has none
		// with preconditions on the host.
		let library = unsafe { Library::new(path) }
			.map_err(|e| Error::Library(format!("failed to load {}: {}", path.display(), e)))?;

		// SAFETY: the signatures match the engine's C header.
		let (create_context, request, destroy_context, read_string, destroy_string) = unsafe {
			(
				symbol::<CreateContextFn>(&library, b"tc_create_context\0")?,
				symbol::<RequestFn>(&library, b"tc_request\0")?,
				symbol::<DestroyContextFn>(&library, b"tc_destroy_context\0")?,
				symbol::<ReadStringFn>(&library, b"tc_read_string\0")?,
				symbol::<DestroyStringFn>(&library, b"tc_destroy_string\0")?,
			)
		};

		debug!("loaded native engine");

		Ok(Self {
			path: path.to_path_buf(),
			create_context,
			request,
			destroy_context,
			read_string,
			destroy_string,
			_library: library,
		})
	}

	/// Load the engine from `TON_CLIENT_LIB`, or the platform default name.
	pub fn open_default() -> Result<Self> {
		Self::open(default_path())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

/// Library location: `TON_CLIENT_LIB` when set, else the platform file name
/// resolved by the loader's search path.
pub fn default_path() -> PathBuf {
	match env::var_os(LIBRARY_ENV) {
		Some(path) if !path.is_empty() => PathBuf::from(path),
		_ => PathBuf::from(default_file_name()),
	}
}

pub fn default_file_name() -> &'static str {
	if cfg!(target_os = "windows") {
		"ton_client.dll"
	} else if cfg!(target_os = "macos") {
		"libton_client.dylib"
	} else {
		"libton_client.so"
	}
}

unsafe fn symbol<T: Copy>(library: &Library, name: &[u8]) -> Result<T> {
	// SAFETY: `T` is the symbol's real type, upheld by the caller
	let symbol = unsafe { library.get::<T>(name) }.map_err(|e| {
		let name = String::from_utf8_lossy(&name[..name.len().saturating_sub(1)]).into_owned();
		Error::Library(format!("missing symbol `{}`: {}", name, e))
	})?;
	Ok(*symbol)
}

impl Native for DynamicLibrary {
	fn create_context(&self, config: &NativeString) -> Option<String> {
		// SAFETY: `config` outlives the call
		let handle = unsafe { (self.create_context)(config.as_data()) };
		if handle.is_null() {
			warn!("tc_create_context returned no string");
			return None;
		}

		// SAFETY: `handle` is a live string handle until destroyed below
		let text = unsafe { (self.read_string)(handle).read() };
		// SAFETY: the handle is destroyed exactly once, after its last read
		unsafe { (self.destroy_string)(handle) };

		match text {
			Ok(text) => Some(text),
			Err(e) => {
				warn!("tc_create_context returned unreadable string: {}", e);
				None
			}
		}
	}

	fn request(
		&self,
		context: ContextHandle,
		function: &NativeString,
		params: &NativeString,
		request_id: u32,
		handler: ResponseHandler,
	) -> Result<()> {
		// SAFETY: both buffers outlive the call; the engine copies them before
		// returning
		unsafe { (self.request)(context, function.as_data(), params.as_data(), request_id, handler) };
		Ok(())
	}

	fn destroy_context(&self, context: ContextHandle) {
		// SAFETY: `context` is only destroyed once by its owner
		unsafe { (self.destroy_context)(context) };
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_library_is_library_error() {
		let err = match DynamicLibrary::open("/nonexistent/libton_client_missing.so") {
			Ok(_) => panic!("library should not load"),
			Err(err) => err,
		};
		assert_eq!(err.code(), "NATIVE_001");
		assert!(err.to_string().contains("libton_client_missing"));
	}

	#[test]
	fn test_default_file_name_is_platform_specific() {
		let name = default_file_name();
		assert!(name.contains("ton_client"));
	}
}
