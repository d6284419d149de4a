// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Shared types for the tonclient crates.
//!
//! Holds the unified [`Error`] model, the [`ClientError`] document the native
//! engine reports failures with, and the [`NumericSpec`] descriptors used to map
//! native scalar widths onto host integer and float types.

pub mod document;
pub mod error;
pub mod numeric;

pub use document::ClientError;
pub use error::{DecodeError, Error};
pub use numeric::{Numeric, NumericKind, NumericSpec};

pub type Result<T> = std::result::Result<T, Error>;
