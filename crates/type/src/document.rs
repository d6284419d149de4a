// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Error document reported by the native engine.
///
/// Wire shape is `{ "code": int?, "message": string?, "data": object? }`.
/// Decoding goes through [`ClientError::from_value`], so a nested document
/// without a message still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientError {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<i64>,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

impl ClientError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			code: None,
			message: message.into(),
			data: None,
		}
	}

	/// Build an error from raw native text. Never fails: text that is not a
	/// JSON document becomes the message itself.
	pub fn from_json(text: &str) -> Self {
		if text.trim().is_empty() {
			return Self::new("<empty JSON>");
		}

		match serde_json::from_str::<Value>(text) {
			Ok(value) => Self::from_value(&value),
			Err(_) => Self::new(text),
		}
	}

	/// Build an error from an already parsed document.
	///
	/// A missing or empty `message` falls back to the document text.
	pub fn from_value(value: &Value) -> Self {
		let message = value
			.get("message")
			.and_then(Value::as_str)
			.filter(|message| !message.is_empty())
			.map(str::to_string)
			.unwrap_or_else(|| value.to_string());

		let code = value.get("code").and_then(Value::as_i64);
		let data = value.get("data").filter(|data| !data.is_null()).cloned();

		Self {
			code,
			message,
			data,
		}
	}
}

impl<'de> Deserialize<'de> for ClientError {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Value::deserialize(deserializer).map(|value| Self::from_value(&value))
	}
}

impl Display for ClientError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}
