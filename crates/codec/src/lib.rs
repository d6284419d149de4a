// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! JSON encoding for values crossing the native bridge
//!
//! Plain structs go through serde as-is. Closed variant sets are declared with
//! [`tagged_union!`], which injects a `type` discriminator on encode and
//! dispatches on it on decode through a per-set table built once.
//!
//! ```ignore
//! tagged_union! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum AddressStringFormat {
//!         AccountId(AccountIdFormat),
//!         Hex(HexFormat),
//!         Base64(Base64Format),
//!     }
//! }
//! ```

mod classify;
mod codec;
mod narrow;
mod registry;
mod tagged;

pub use classify::classify;
pub use codec::{decode, decode_number, decode_raw, decode_value, decode_variant, encode, encode_value};
pub use narrow::{deserialize_f32, deserialize_option_f32};
pub use registry::VariantRegistry;
pub use tagged::{TAG, TaggedUnion, Variant, VariantParser, VariantTable, deserialize_tagged, serialize_tagged};
pub use tonclient_type::{DecodeError, Error, Result};

#[doc(hidden)]
pub mod __private {
	pub use once_cell::sync::Lazy;
	pub use serde;
	pub use serde_json;
}
