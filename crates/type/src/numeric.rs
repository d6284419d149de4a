// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Native scalar widths.
//!
//! JSON keeps numbers textual; the width only decides which host type a value
//! lands in and when decoding has to refuse it.

use std::fmt::{self, Display, Formatter};

use serde_json::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
	Signed,
	Unsigned,
	Float,
}

/// Native representation of one scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericSpec {
	pub kind: NumericKind,
	pub bits: u8,
}

impl NumericSpec {
	pub const fn signed(bits: u8) -> Self {
		Self {
			kind: NumericKind::Signed,
			bits,
		}
	}

	pub const fn unsigned(bits: u8) -> Self {
		Self {
			kind: NumericKind::Unsigned,
			bits,
		}
	}

	pub const fn float(bits: u8) -> Self {
		Self {
			kind: NumericKind::Float,
			bits,
		}
	}

	/// Resolve a host type name such as `u32` or `f64`.
	pub fn from_type_name(name: &str) -> Option<Self> {
		let spec = match name {
			"i8" => Self::signed(8),
			"i16" => Self::signed(16),
			"i32" => Self::signed(32),
			"i64" => Self::signed(64),
			"u8" => Self::unsigned(8),
			"u16" => Self::unsigned(16),
			"u32" => Self::unsigned(32),
			"u64" => Self::unsigned(64),
			"f32" => Self::float(32),
			"f64" => Self::float(64),
			_ => return None,
		};
		Some(spec)
	}

	pub fn is_integer(&self) -> bool {
		!matches!(self.kind, NumericKind::Float)
	}

	/// Inclusive integer range, `None` for floats.
	pub fn integer_range(&self) -> Option<(i128, i128)> {
		let bits = u32::from(self.bits);
		match self.kind {
			NumericKind::Signed => Some((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)),
			NumericKind::Unsigned => Some((0, (1i128 << bits) - 1)),
			NumericKind::Float => None,
		}
	}

	/// Whether `number` is representable without overflow.
	///
	/// Floats passed to an integer spec never fit; narrowing to `f32` fits
	/// as long as the result stays finite.
	pub fn fits(&self, number: &Number) -> bool {
		match self.integer_range() {
			Some((min, max)) => {
				let value = if let Some(value) = number.as_u64() {
					i128::from(value)
				} else if let Some(value) = number.as_i64() {
					i128::from(value)
				} else {
					return false;
				};
				value >= min && value <= max
			}
			None => match number.as_f64() {
				Some(value) if self.bits == 32 => (value as f32).is_finite(),
				Some(_) => true,
				None => false,
			},
		}
	}
}

impl Display for NumericSpec {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let prefix = match self.kind {
			NumericKind::Signed => 'i',
			NumericKind::Unsigned => 'u',
			NumericKind::Float => 'f',
		};
		write!(f, "{}{}", prefix, self.bits)
	}
}

/// Host numeric type bound to its native width.
pub trait Numeric: Copy + Sized {
	const SPEC: NumericSpec;

	/// Convert a JSON number, `None` when it does not fit.
	fn from_number(number: &Number) -> Option<Self>;

	fn to_number(self) -> Option<Number>;
}

macro_rules! impl_numeric_integer {
	($($ty:ty => $spec:expr),* $(,)?) => {
		$(
			impl Numeric for $ty {
				const SPEC: NumericSpec = $spec;

				fn from_number(number: &Number) -> Option<Self> {
					if let Some(value) = number.as_u64() {
						<$ty>::try_from(value).ok()
					} else if let Some(value) = number.as_i64() {
						<$ty>::try_from(value).ok()
					} else {
						None
					}
				}

				fn to_number(self) -> Option<Number> {
					Some(Number::from(self))
				}
			}
		)*
	};
}

impl_numeric_integer!(
	i8 => NumericSpec::signed(8),
	i16 => NumericSpec::signed(16),
	i32 => NumericSpec::signed(32),
	i64 => NumericSpec::signed(64),

	u8 => NumericSpec::unsigned(8),
	u16 => NumericSpec::unsigned(16),
	u32 => NumericSpec::unsigned(32),
	u64 => NumericSpec::unsigned(64),
);

impl Numeric for f32 {
	const SPEC: NumericSpec = NumericSpec::float(32);

	fn from_number(number: &Number) -> Option<Self> {
		let value = number.as_f64()? as f32;
		value.is_finite().then_some(value)
	}

	fn to_number(self) -> Option<Number> {
		Number::from_f64(f64::from(self))
	}
}

impl Numeric for f64 {
	const SPEC: NumericSpec = NumericSpec::float(64);

	fn from_number(number: &Number) -> Option<Self> {
		number.as_f64()
	}

	fn to_number(self) -> Option<Number> {
		Number::from_f64(self)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::Number;

	use super::*;

	#[test]
	fn test_type_names_round_trip() {
		for name in ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64"] {
			let spec = NumericSpec::from_type_name(name).unwrap();
			assert_eq!(spec.to_string(), name);
		}
		assert!(NumericSpec::from_type_name("u128").is_none());
	}

	#[test]
	fn test_integer_ranges() {
		assert_eq!(NumericSpec::signed(8).integer_range(), Some((-128, 127)));
		assert_eq!(NumericSpec::unsigned(16).integer_range(), Some((0, 65535)));
		assert_eq!(NumericSpec::unsigned(64).integer_range(), Some((0, u64::MAX as i128)));
		assert_eq!(NumericSpec::float(64).integer_range(), None);
	}

	#[test]
	fn test_fits() {
		assert!(NumericSpec::unsigned(8).fits(&Number::from(255u64)));
		assert!(!NumericSpec::unsigned(8).fits(&Number::from(256u64)));
		assert!(!NumericSpec::unsigned(32).fits(&Number::from(-1i64)));
		assert!(NumericSpec::signed(64).fits(&Number::from(i64::MIN)));
		assert!(!NumericSpec::signed(64).fits(&Number::from(u64::MAX)));
		assert!(!NumericSpec::signed(32).fits(&Number::from_f64(1.5).unwrap()));
		assert!(!NumericSpec::float(32).fits(&Number::from_f64(1e300).unwrap()));
		assert!(NumericSpec::float(64).fits(&Number::from_f64(1e300).unwrap()));
	}

	#[test]
	fn test_from_number_refuses_overflow() {
		assert_eq!(u8::from_number(&Number::from(200u64)), Some(200u8));
		assert_eq!(u8::from_number(&Number::from(300u64)), None);
		assert_eq!(i8::from_number(&Number::from(-128i64)), Some(-128i8));
		assert_eq!(i8::from_number(&Number::from(-129i64)), None);
		assert_eq!(u64::from_number(&Number::from(u64::MAX)), Some(u64::MAX));
		assert_eq!(i16::from_number(&Number::from_f64(2.0).unwrap()), None);
		assert_eq!(f32::from_number(&Number::from_f64(1e300).unwrap()), None);
		assert_eq!(f64::from_number(&Number::from(7u64)), Some(7.0));
	}
}
