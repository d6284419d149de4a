// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use tonclient_type::{Error, Result};
use tracing::debug;

use crate::tagged::TaggedUnion;

/// Every variant set a client decodes against, checked up front.
///
/// Registering builds the set's dispatch table immediately so a malformed set
/// fails when the client is built rather than on the first response that uses it.
#[derive(Debug, Default)]
pub struct VariantRegistry {
	sets: BTreeMap<&'static str, &'static [&'static str]>,
}

impl VariantRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register<T: TaggedUnion>(&mut self) -> Result<&mut Self> {
		if self.sets.contains_key(T::NAME) {
			return Err(Error::Registration(format!("variant set `{}` registered twice", T::NAME)));
		}

		let table = T::table();
		if table.len() != T::VARIANTS.len() {
			return Err(Error::Registration(format!(
				"variant set `{}` declares {} variants but dispatches {}",
				T::NAME,
				T::VARIANTS.len(),
				table.len()
			)));
		}

		debug!("registered variant set {} with {} variants", T::NAME, table.len());
		self.sets.insert(T::NAME, T::VARIANTS);
		Ok(self)
	}

	pub fn contains(&self, set: &str) -> bool {
		self.sets.contains_key(set)
	}

	/// Member names of `set`, in declaration order.
	pub fn variants(&self, set: &str) -> Option<&'static [&'static str]> {
		self.sets.get(set).copied()
	}

	pub fn sets(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.sets.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.sets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sets.is_empty()
	}
}
