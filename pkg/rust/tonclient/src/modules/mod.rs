// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Typed wrappers over the engine's functions, one type per engine module.
//!
//! Each method encodes its parameters, calls `<module>.<function>` and decodes
//! the result. Types mirror the engine's JSON names.

pub mod client;
pub mod crypto;
pub mod net;
pub mod processing;
pub mod utils;
