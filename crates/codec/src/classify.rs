// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde_json::Number;
use tonclient_type::{DecodeError, NumericSpec};

/// Map a serde diagnostic onto a [`DecodeError`].
///
/// serde reports every failure as text; the variants callers match on are
/// recovered from the fixed message shapes serde and [`crate::deserialize_tagged`]
/// produce. Anything unrecognised is `Malformed`.
pub fn classify(err: &serde_json::Error) -> DecodeError {
	let message = err.to_string();
	if err.is_syntax() || err.is_eof() {
		return DecodeError::Malformed(message);
	}

	if let Some(err) = unknown_variant(&message) {
		return err;
	}
	if let Some(set) = message.strip_prefix("missing `type` discriminator for ") {
		return DecodeError::MissingDiscriminator {
			set: set.to_string(),
		};
	}
	if let Some(err) = numeric_overflow(&message) {
		return err;
	}

	DecodeError::Malformed(message)
}

// "unknown variant `X`, expected one of `A`, `B`"
fn unknown_variant(message: &str) -> Option<DecodeError> {
	let rest = message.strip_prefix("unknown variant `")?;
	let (variant, expected) = rest.split_once("`, ")?;
	let expected = expected.strip_prefix("expected ").unwrap_or(expected);
	Some(DecodeError::UnknownVariant {
		variant: variant.to_string(),
		expected: expected.to_string(),
	})
}

// "invalid value: integer `300`, expected u8"
// "invalid type: floating point `1e21`, expected u64"
// "invalid value: floating point `1e39`, expected f32"
fn numeric_overflow(message: &str) -> Option<DecodeError> {
	let (unexpected, expected) = message
		.strip_prefix("invalid value: ")
		.or_else(|| message.strip_prefix("invalid type: "))?
		.split_once(", expected ")?;

	let spec = NumericSpec::from_type_name(expected.trim())?;
	let value = match spec.integer_range() {
		Some((min, max)) => {
			if let Some(value) = backticked(unexpected, "integer `") {
				value
			} else {
				let value = backticked(unexpected, "floating point `")?;
				let float: f64 = value.parse().ok()?;
				// an integral float beyond the range stands for a number too wide for
				// the declared width; anything else is a type mismatch
				if float.fract() != 0.0 || (float >= min as f64 && float <= max as f64) {
					return None;
				}
				value
			}
		}
		None => {
			let value = backticked(unexpected, "floating point `")?;
			let number = Number::from_f64(value.parse().ok()?)?;
			if spec.fits(&number) {
				return None;
			}
			value
		}
	};

	Some(DecodeError::NumericOverflow {
		value: value.to_string(),
		expected: spec,
	})
}

fn backticked<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
	text.strip_prefix(prefix)?.strip_suffix('`')
}

#[cfg(test)]
mod tests {
	use serde::Deserialize;
	use tonclient_type::NumericSpec;

	use super::*;

	#[derive(Debug, Deserialize)]
	#[allow(dead_code)]
	struct Widths {
		#[serde(default)]
		small: u8,
		#[serde(default)]
		signed: i32,
		#[serde(default)]
		wide: u64,
		#[serde(default)]
		name: String,
	}

	fn decode(json: &str) -> DecodeError {
		let value: serde_json::Value = serde_json::from_str(json).unwrap();
		classify(&serde_json::from_value::<Widths>(value).unwrap_err())
	}

	#[test]
	fn test_out_of_range_integer() {
		assert_eq!(
			decode(r#"{"small":300}"#),
			DecodeError::NumericOverflow {
				value: "300".to_string(),
				expected: NumericSpec::unsigned(8),
			}
		);
	}

	#[test]
	fn test_negative_into_unsigned() {
		assert!(matches!(
			decode(r#"{"small":-1}"#),
			DecodeError::NumericOverflow { expected, .. } if expected == NumericSpec::unsigned(8)
		));
	}

	#[test]
	fn test_integer_too_wide_for_64_bits() {
		assert!(matches!(
			decode(r#"{"wide":100000000000000000000000}"#),
			DecodeError::NumericOverflow { expected, .. } if expected == NumericSpec::unsigned(64)
		));
	}

	#[test]
	fn test_fraction_is_not_overflow() {
		assert!(matches!(decode(r#"{"signed":1.5}"#), DecodeError::Malformed(_)));
	}

	#[test]
	fn test_narrowed_float_message() {
		let err = <serde_json::Error as serde::de::Error>::custom("invalid value: floating point `1e39`, expected f32");
		assert_eq!(
			classify(&err),
			DecodeError::NumericOverflow {
				value: "1e39".to_string(),
				expected: NumericSpec::float(32),
			}
		);

		let err = <serde_json::Error as serde::de::Error>::custom("invalid value: floating point `1.5`, expected f32");
		assert!(matches!(classify(&err), DecodeError::Malformed(_)));
	}

	#[test]
	fn test_wrong_type_is_malformed() {
		assert!(matches!(decode(r#"{"name":5}"#), DecodeError::Malformed(_)));
	}

	#[test]
	fn test_syntax_error_is_malformed() {
		let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		assert!(matches!(classify(&err), DecodeError::Malformed(_)));
	}

	#[test]
	fn test_unknown_variant_message() {
		let err = <serde_json::Error as serde::de::Error>::unknown_variant("Nope", &["Hex", "Base64"]);
		assert_eq!(
			classify(&err),
			DecodeError::UnknownVariant {
				variant: "Nope".to_string(),
				expected: "`Hex` or `Base64`".to_string(),
			}
		);
	}
}
