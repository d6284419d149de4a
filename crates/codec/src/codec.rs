// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tonclient_type::{DecodeError, Error, Numeric, Result};

use crate::{
	classify::classify,
	tagged::{TAG, Variant},
};

/// Encode `value` as compact JSON text.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
	serde_json::to_string(value).map_err(|e| Error::Encode(e.to_string()))
}

pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
	serde_json::to_value(value).map_err(|e| Error::Encode(e.to_string()))
}

/// Decode native JSON text into `T`.
///
/// Empty text is read as `null`, which is what a call resolved without a
/// payload carries.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
	decode_value(decode_raw(json)?)
}

pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T> {
	serde_json::from_value(value).map_err(|e| Error::Decode(classify(&e)))
}

/// Parse native JSON text without interpreting it.
pub fn decode_raw(json: &str) -> Result<Value> {
	if json.trim().is_empty() {
		return Ok(Value::Null);
	}
	serde_json::from_str(json).map_err(|e| Error::Decode(classify(&e)))
}

/// Decode a document that must hold the concrete variant `V`.
///
/// A `type` naming another member of the set is a `VariantMismatch`; an
/// absent one is accepted.
pub fn decode_variant<V>(json: &str) -> Result<V>
where
	V: Variant + DeserializeOwned,
{
	let mut value = decode_raw(json)?;
	if let Value::Object(fields) = &mut value {
		match fields.remove(TAG) {
			Some(Value::String(found)) if found != V::NAME => {
				return Err(DecodeError::VariantMismatch {
					expected: V::NAME.to_string(),
					found,
				}
				.into());
			}
			Some(Value::String(_)) | None => {}
			Some(other) => {
				return Err(DecodeError::Malformed(format!("invalid `type` discriminator {}", other)).into());
			}
		}
	}
	decode_value(value)
}

/// Decode a bare JSON number into the host type `N`, refusing overflow.
pub fn decode_number<N: Numeric>(json: &str) -> Result<N> {
	match decode_raw(json)? {
		Value::Number(number) => N::from_number(&number).ok_or_else(|| {
			DecodeError::NumericOverflow {
				value: number.to_string(),
				expected: N::SPEC,
			}
			.into()
		}),
		other => Err(DecodeError::Malformed(format!("expected {}, found {}", N::SPEC, other)).into()),
	}
}
