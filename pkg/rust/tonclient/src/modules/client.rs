// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tonclient_type::Result;

use crate::{AppRequestResult, Client, ClientConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfVersion {
	/// Core library version.
	pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfoDependency {
	pub name: String,
	pub git_commit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfBuildInfo {
	pub build_number: u32,
	pub dependencies: Vec<BuildInfoDependency>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfGetApiReference {
	/// The engine's API description, passed through unparsed.
	pub api: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfResolveAppRequest {
	pub app_request_id: u32,
	pub result: AppRequestResult,
}

pub struct ClientModule<'a> {
	client: &'a Client,
}

impl<'a> ClientModule<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self {
			client,
		}
	}

	pub async fn version(&self) -> Result<ResultOfVersion> {
		self.client.call("client.version", &()).await
	}

	pub async fn build_info(&self) -> Result<ResultOfBuildInfo> {
		self.client.call("client.build_info", &()).await
	}

	pub async fn get_api_reference(&self) -> Result<ResultOfGetApiReference> {
		self.client.call("client.get_api_reference", &()).await
	}

	/// The configuration the engine is actually running with.
	pub async fn config(&self) -> Result<ClientConfig> {
		self.client.call("client.config", &()).await
	}

	pub async fn resolve_app_request(&self, params: &ParamsOfResolveAppRequest) -> Result<()> {
		self.client.call_unit("client.resolve_app_request", params).await
	}
}
