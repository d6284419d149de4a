// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{future::Future, sync::Arc};

use serde::{Deserialize, Serialize};
use tonclient_type::{Error, Result};

use crate::Client;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfHash {
	/// Input data, base64.
	pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfHash {
	/// Hex-encoded hash.
	pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfFactorize {
	/// Hex-encoded 64-bit composite.
	pub composite: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfFactorize {
	pub factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfModularPower {
	pub base: String,
	pub exponent: String,
	pub modulus: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfModularPower {
	pub modular_power: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfTonCrc16 {
	pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfTonCrc16 {
	pub crc: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfGenerateRandomBytes {
	pub length: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfGenerateRandomBytes {
	/// Base64.
	pub bytes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredSigningBox {
	pub handle: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfSigningBoxGetPublicKey {
	pub pubkey: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsOfAppSigningBoxGetPublicKey {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfAppSigningBoxSign {
	/// Data to sign, base64.
	pub unsigned: String,
}

tonclient_codec::tagged_union! {
	/// Requests the engine sends to an application signing box.
	#[derive(Debug, Clone, PartialEq)]
	pub enum ParamsOfAppSigningBox {
		GetPublicKey(ParamsOfAppSigningBoxGetPublicKey),
		Sign(ParamsOfAppSigningBoxSign),
	}
}

impl Default for ParamsOfAppSigningBox {
	fn default() -> Self {
		Self::GetPublicKey(ParamsOfAppSigningBoxGetPublicKey {})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfAppSigningBoxGetPublicKey {
	pub public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfAppSigningBoxSign {
	pub signature: String,
}

tonclient_codec::tagged_union! {
	#[derive(Debug, Clone, PartialEq)]
	pub enum ResultOfAppSigningBox {
		GetPublicKey(ResultOfAppSigningBoxGetPublicKey),
		Sign(ResultOfAppSigningBoxSign),
	}
}

impl Default for ResultOfAppSigningBox {
	fn default() -> Self {
		Self::GetPublicKey(ResultOfAppSigningBoxGetPublicKey::default())
	}
}

/// Key holder implemented by the application.
///
/// The engine never sees the private key; it asks the box for the public key
/// and for signatures through app requests.
pub trait SigningBox: Send + Sync + 'static {
	/// Hex-encoded public key.
	fn get_public_key(&self) -> impl Future<Output = Result<String>> + Send;

	/// Sign base64 `unsigned` data, returning the hex-encoded signature.
	fn sign(&self, unsigned: String) -> impl Future<Output = Result<String>> + Send;
}

pub struct CryptoModule<'a> {
	client: &'a Client,
}

impl<'a> CryptoModule<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self {
			client,
		}
	}

	pub async fn sha256(&self, params: &ParamsOfHash) -> Result<ResultOfHash> {
		self.client.call("crypto.sha256", params).await
	}

	pub async fn sha512(&self, params: &ParamsOfHash) -> Result<ResultOfHash> {
		self.client.call("crypto.sha512", params).await
	}

	pub async fn factorize(&self, params: &ParamsOfFactorize) -> Result<ResultOfFactorize> {
		self.client.call("crypto.factorize", params).await
	}

	pub async fn modular_power(&self, params: &ParamsOfModularPower) -> Result<ResultOfModularPower> {
		self.client.call("crypto.modular_power", params).await
	}

	pub async fn ton_crc16(&self, params: &ParamsOfTonCrc16) -> Result<ResultOfTonCrc16> {
		self.client.call("crypto.ton_crc16", params).await
	}

	pub async fn generate_random_bytes(&self, params: &ParamsOfGenerateRandomBytes) -> Result<ResultOfGenerateRandomBytes> {
		self.client.call("crypto.generate_random_bytes", params).await
	}

	/// Register an application signing box with the engine.
	///
	/// The box answers the engine's requests for as long as the registration
	/// lives; it does not keep the client alive.
	pub async fn register_signing_box<S: SigningBox>(&self, signing_box: S) -> Result<RegisteredSigningBox> {
		let signing_box = Arc::new(signing_box);
		self.client
			.call_with_app_object("crypto.register_signing_box", &(), move |request: ParamsOfAppSigningBox| {
				let signing_box = signing_box.clone();
				async move {
					let result = match request {
						ParamsOfAppSigningBox::GetPublicKey(_) => {
							ResultOfAppSigningBox::GetPublicKey(ResultOfAppSigningBoxGetPublicKey {
								public_key: signing_box.get_public_key().await?,
							})
						}
						ParamsOfAppSigningBox::Sign(params) => ResultOfAppSigningBox::Sign(ResultOfAppSigningBoxSign {
							signature: signing_box.sign(params.unsigned).await?,
						}),
					};
					Ok::<_, Error>(result)
				}
			})
			.await
	}

	pub async fn signing_box_get_public_key(&self, signing_box: &RegisteredSigningBox) -> Result<ResultOfSigningBoxGetPublicKey> {
		self.client.call("crypto.signing_box_get_public_key", signing_box).await
	}

	pub async fn remove_signing_box(&self, signing_box: &RegisteredSigningBox) -> Result<()> {
		self.client.call_unit("crypto.remove_signing_box", signing_box).await
	}
}
