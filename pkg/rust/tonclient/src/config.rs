// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine configuration, sent verbatim when the context is created.
//!
//! Every field is optional; absent fields are omitted from the document and
//! the engine applies its own defaults.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tonclient_type::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub network: Option<NetworkConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub crypto: Option<CryptoConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub abi: Option<AbiConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub boc: Option<BocConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub proofs: Option<ProofsConfig>,
	/// Directory for the engine's local storage.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub local_storage_path: Option<String>,
}

impl ClientConfig {
	/// Load a configuration from a JSON file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path)
			.map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
		serde_json::from_str(&text).map_err(|e| Error::Config(format!("invalid config {}: {}", path.display(), e)))
	}

	/// Configuration of a client talking to the given endpoints.
	pub fn with_endpoints<I, S>(endpoints: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			network: Some(NetworkConfig {
				endpoints: Some(endpoints.into_iter().map(Into::into).collect()),
				..NetworkConfig::default()
			}),
			..Self::default()
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkQueriesProtocol {
	/// Each query is a separate HTTP request.
	#[default]
	Http,
	/// All queries share one WebSocket connection.
	Ws,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub server_address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub endpoints: Option<Vec<String>>,
	/// Negative means unlimited.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub network_retries_count: Option<i8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_reconnect_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message_retries_count: Option<i8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message_processing_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wait_for_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub out_of_sync_threshold: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sending_endpoint_count: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub latency_detection_interval: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_latency: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub query_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub queries_protocol: Option<NetworkQueriesProtocol>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_remp_status_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub next_remp_status_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub access_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mnemonic_dictionary: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mnemonic_word_count: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hdkey_derivation_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbiConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub workchain: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message_expiration_timeout: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none", deserialize_with = "tonclient_codec::deserialize_option_f32")]
	pub message_expiration_timeout_grow_factor: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BocConfig {
	/// Cache size in kilobytes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cache_max_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofsConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cache_in_local_storage: Option<bool>,
}

#[cfg(test)]
mod tests {
	use std::env;

	use serde_json::json;
	use tonclient_codec::decode;
	use tonclient_type::{DecodeError, NumericSpec};

	use super::*;

	#[test]
	fn test_default_is_empty_document() {
		assert_eq!(serde_json::to_string(&ClientConfig::default()).unwrap(), "{}");
	}

	#[test]
	fn test_only_present_fields_are_sent() {
		let mut config = ClientConfig::with_endpoints(["https://devnet.example"]);
		config.abi = Some(AbiConfig {
			workchain: Some(-1),
			..AbiConfig::default()
		});

		assert_eq!(
			serde_json::to_value(&config).unwrap(),
			json!({
				"network": { "endpoints": ["https://devnet.example"] },
				"abi": { "workchain": -1 },
			})
		);
	}

	#[test]
	fn test_protocol_names() {
		assert_eq!(serde_json::to_value(NetworkQueriesProtocol::Http).unwrap(), json!("HTTP"));
		assert_eq!(serde_json::to_value(NetworkQueriesProtocol::Ws).unwrap(), json!("WS"));
	}

	#[test]
	fn test_grow_factor_range() {
		let config: ClientConfig = decode(r#"{"abi":{"message_expiration_timeout_grow_factor":1.5}}"#).unwrap();
		assert_eq!(config.abi.unwrap().message_expiration_timeout_grow_factor, Some(1.5));

		let config: ClientConfig = decode(r#"{"abi":{"workchain":0}}"#).unwrap();
		assert_eq!(config.abi.unwrap().message_expiration_timeout_grow_factor, None);

		let err = decode::<ClientConfig>(r#"{"abi":{"message_expiration_timeout_grow_factor":1e39}}"#).unwrap_err();
		match err {
			Error::Decode(DecodeError::NumericOverflow {
				expected,
				..
			}) => assert_eq!(expected, NumericSpec::float(32)),
			other => panic!("unexpected error: {:?}", other),
		}
	}

	#[test]
	fn test_from_file() {
		let path = env::temp_dir().join(format!("tonclient-config-{}.json", std::process::id()));
		fs::write(&path, r#"{"network":{"queries_protocol":"WS","sending_endpoint_count":2}}"#).unwrap();

		let config = ClientConfig::from_file(&path).unwrap();
		let network = config.network.unwrap();
		assert_eq!(network.queries_protocol, Some(NetworkQueriesProtocol::Ws));
		assert_eq!(network.sending_endpoint_count, Some(2));

		fs::remove_file(&path).unwrap();
	}

	#[test]
	fn test_from_missing_file() {
		let err = ClientConfig::from_file("/nonexistent/tonclient.json").unwrap_err();
		assert_eq!(err.code(), "CONFIG_001");
	}
}
