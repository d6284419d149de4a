// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tonclient_type::Result;

use crate::Client;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountIdFormat {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HexFormat {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Base64Format {
	pub url: bool,
	pub test: bool,
	pub bounce: bool,
}

tonclient_codec::tagged_union! {
	#[derive(Debug, Clone, PartialEq)]
	pub enum AddressStringFormat {
		AccountId(AccountIdFormat),
		Hex(HexFormat),
		Base64(Base64Format),
	}
}

impl Default for AddressStringFormat {
	fn default() -> Self {
		Self::AccountId(AccountIdFormat {})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfConvertAddress {
	pub address: String,
	pub output_format: AddressStringFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfConvertAddress {
	pub address: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountAddressType {
	#[default]
	AccountId,
	Hex,
	Base64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfGetAddressType {
	pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfGetAddressType {
	pub address_type: AccountAddressType,
}

pub struct UtilsModule<'a> {
	client: &'a Client,
}

impl<'a> UtilsModule<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self {
			client,
		}
	}

	/// Re-encode an address in another string format.
	pub async fn convert_address(&self, params: &ParamsOfConvertAddress) -> Result<ResultOfConvertAddress> {
		self.client.call("utils.convert_address", params).await
	}

	pub async fn get_address_type(&self, params: &ParamsOfGetAddressType) -> Result<ResultOfGetAddressType> {
		self.client.call("utils.get_address_type", params).await
	}
}
