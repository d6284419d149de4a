// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for the native TON client engine
//!
//! This crate describes the narrow surface the engine exposes: UTF-8 string
//! buffers, the response callback signature with its response-type codes, and
//! the [`Native`] trait the request protocol talks to. [`DynamicLibrary`] is the
//! implementation backed by the shared library.

pub mod buffer;
pub mod library;
pub mod native;
pub mod response;

pub use buffer::{NativeString, StringData};
pub use library::{DynamicLibrary, LIBRARY_ENV};
pub use native::{ContextHandle, Native, ResponseHandler};
pub use response::ResponseType;
pub use tonclient_type::{Error, Result};
