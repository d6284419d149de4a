// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::Error as _,
	ser::{Error as _, SerializeMap},
};
use serde_json::{Map, Value};

/// Name of the discriminator field.
pub const TAG: &str = "type";

/// Decodes the remaining fields of one concrete variant.
pub type VariantParser<T> = fn(Value) -> Result<T, serde_json::Error>;

/// Closed set of concrete variants distinguished by [`TAG`].
pub trait TaggedUnion: Sized + 'static {
	/// Name of the variant set.
	const NAME: &'static str;
	/// Wire names of every member, in declaration order.
	const VARIANTS: &'static [&'static str];

	/// Wire name of the concrete variant held.
	fn variant(&self) -> &'static str;

	/// Dispatch table of this set, built on first use.
	fn table() -> &'static VariantTable<Self>;
}

/// Concrete member of exactly one variant set.
pub trait Variant: Sized {
	type Union: TaggedUnion + From<Self>;

	/// Wire name written into [`TAG`].
	const NAME: &'static str;
}

/// Maps discriminator strings to the parser of their concrete variant.
pub struct VariantTable<T> {
	set: &'static str,
	parsers: HashMap<&'static str, VariantParser<T>>,
}

impl<T> VariantTable<T> {
	/// Build the table of `set`.
	///
	/// Panics on a duplicate variant name: the set is malformed and no decode
	/// against it could be trusted.
	pub fn build(set: &'static str, entries: Vec<(&'static str, VariantParser<T>)>) -> Self {
		let mut parsers = HashMap::with_capacity(entries.len());
		for (name, parser) in entries {
			if parsers.insert(name, parser).is_some() {
				panic!("variant `{}` declared twice in `{}`", name, set);
			}
		}
		Self {
			set,
			parsers,
		}
	}

	pub fn set(&self) -> &'static str {
		self.set
	}

	pub fn parser(&self, name: &str) -> Option<VariantParser<T>> {
		self.parsers.get(name).copied()
	}

	pub fn len(&self) -> usize {
		self.parsers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parsers.is_empty()
	}
}

/// Serialize `inner` as an object carrying `type = variant`.
///
/// A unit-like inner value (`null` or `{}`) becomes `{"type": variant}`.
pub fn serialize_tagged<S, V>(variant: &'static str, inner: &V, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
	V: Serialize + ?Sized,
{
	let fields = match serde_json::to_value(inner).map_err(S::Error::custom)? {
		Value::Object(fields) => fields,
		Value::Null => Map::new(),
		other => {
			return Err(S::Error::custom(format!(
				"variant `{}` must serialize to an object, got {}",
				variant, other
			)));
		}
	};

	let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
	map.serialize_entry(TAG, variant)?;
	for (key, value) in &fields {
		if key != TAG {
			map.serialize_entry(key, value)?;
		}
	}
	map.end()
}

/// Read [`TAG`] and dispatch to the matching member of `T`.
pub fn deserialize_tagged<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: TaggedUnion,
{
	let mut fields = Map::<String, Value>::deserialize(deserializer)?;

	let tag = match fields.remove(TAG) {
		Some(Value::String(tag)) => tag,
		Some(other) => {
			return Err(D::Error::custom(format!("invalid `type` discriminator {} for {}", other, T::NAME)));
		}
		None => return Err(D::Error::custom(format!("missing `type` discriminator for {}", T::NAME))),
	};

	let parser = T::table().parser(&tag).ok_or_else(|| D::Error::unknown_variant(&tag, T::VARIANTS))?;
	parser(Value::Object(fields)).map_err(D::Error::custom)
}

/// Declare a closed variant set.
///
/// Each member names its wire variant and a braced concrete struct. The
/// macro generates the enum, its [`TaggedUnion`] table, one [`Variant`] and
/// one `From` impl per concrete type, and serde impls that carry `type`.
/// Declaring a concrete type in two sets fails to compile.
#[macro_export]
macro_rules! tagged_union {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$vmeta:meta])*
				$variant:ident($ty:ty)
			),+ $(,)?
		}
	) => {
		$(#[$meta])*
		$vis enum $name {
			$(
				$(#[$vmeta])*
				$variant($ty),
			)+
		}

		impl $crate::TaggedUnion for $name {
			const NAME: &'static str = stringify!($name);
			const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

			fn variant(&self) -> &'static str {
				match self {
					$($name::$variant(_) => stringify!($variant),)+
				}
			}

			fn table() -> &'static $crate::VariantTable<Self> {
				static TABLE: $crate::__private::Lazy<$crate::VariantTable<$name>> =
					$crate::__private::Lazy::new(|| {
						$crate::VariantTable::build(
							stringify!($name),
							vec![$((
								stringify!($variant),
								(|value: $crate::__private::serde_json::Value| {
									$crate::__private::serde_json::from_value::<$ty>(value).map($name::$variant)
								}) as $crate::VariantParser<$name>,
							)),+],
						)
					});
				&TABLE
			}
		}

		$(
			impl $crate::Variant for $ty {
				type Union = $name;
				const NAME: &'static str = stringify!($variant);
			}

			impl ::std::convert::From<$ty> for $name {
				fn from(value: $ty) -> Self {
					$name::$variant(value)
				}
			}
		)+

		impl $crate::__private::serde::Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
			where
				S: $crate::__private::serde::Serializer,
			{
				match self {
					$($name::$variant(inner) => $crate::serialize_tagged(stringify!($variant), inner, serializer),)+
				}
			}
		}

		impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
			where
				D: $crate::__private::serde::Deserializer<'de>,
			{
				$crate::deserialize_tagged::<D, Self>(deserializer)
			}
		}
	};
}
