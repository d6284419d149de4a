// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Field deserializers for widths serde narrows silently.
//!
//! serde reads `f32` fields through `f64` and casts, so an out-of-range value
//! turns into infinity. Use these with `#[serde(deserialize_with = "...")]`.

use serde::{Deserialize, Deserializer, de};
use tonclient_type::NumericSpec;

pub fn deserialize_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
	D: Deserializer<'de>,
{
	narrow_f32(f64::deserialize(deserializer)?)
}

pub fn deserialize_option_f32<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<f64>::deserialize(deserializer)?.map(narrow_f32).transpose()
}

// message shape is the one serde uses, so classify maps it to NumericOverflow
fn narrow_f32<E: de::Error>(value: f64) -> Result<f32, E> {
	let narrowed = value as f32;
	if narrowed.is_finite() {
		Ok(narrowed)
	} else {
		Err(E::custom(format!("invalid value: floating point `{}`, expected {}", value, NumericSpec::float(32))))
	}
}
