// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tonclient_type::Result;

use crate::Client;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBy {
	pub path: String,
	pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfQueryCollection {
	pub collection: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filter: Option<Value>,
	/// Projection, in GraphQL selection syntax.
	pub result: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub order: Option<Vec<OrderBy>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfQueryCollection {
	pub result: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfWaitForCollection {
	pub collection: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filter: Option<Value>,
	pub result: String,
	/// Milliseconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationFn {
	#[default]
	Count,
	Min,
	Max,
	Sum,
	Average,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAggregation {
	pub field: String,
	#[serde(rename = "fn")]
	pub r#fn: AggregationFn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfAggregateCollection {
	pub collection: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filter: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fields: Option<Vec<FieldAggregation>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfQueryCounterparties {
	pub account: String,
	pub result: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub after: Option<String>,
}

tonclient_codec::tagged_union! {
	/// One query of a batch.
	#[derive(Debug, Clone, PartialEq)]
	pub enum ParamsOfQueryOperation {
		QueryCollection(ParamsOfQueryCollection),
		WaitForCollection(ParamsOfWaitForCollection),
		AggregateCollection(ParamsOfAggregateCollection),
		QueryCounterparties(ParamsOfQueryCounterparties),
	}
}

impl Default for ParamsOfQueryOperation {
	fn default() -> Self {
		Self::QueryCollection(ParamsOfQueryCollection::default())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfBatchQuery {
	pub operations: Vec<ParamsOfQueryOperation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfBatchQuery {
	/// One result per operation, in order.
	pub results: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfSubscribeCollection {
	pub collection: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filter: Option<Value>,
	pub result: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfSubscribeCollection {
	/// Subscription handle, passed to `unsubscribe`.
	pub handle: u32,
}

pub struct NetModule<'a> {
	client: &'a Client,
}

impl<'a> NetModule<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self {
			client,
		}
	}

	pub async fn query_collection(&self, params: &ParamsOfQueryCollection) -> Result<ResultOfQueryCollection> {
		self.client.call("net.query_collection", params).await
	}

	pub async fn batch_query(&self, params: &ParamsOfBatchQuery) -> Result<ResultOfBatchQuery> {
		self.client.call("net.batch_query", params).await
	}

	/// Subscribe to collection changes.
	///
	/// Returns once the subscription is established; `callback` keeps
	/// receiving raw event documents until the subscription is closed.
	pub async fn subscribe_collection<F, Fut>(
		&self,
		params: &ParamsOfSubscribeCollection,
		callback: F,
	) -> Result<ResultOfSubscribeCollection>
	where
		F: FnMut(Value, u32) -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		self.client.call_with_callback("net.subscribe_collection", params, callback).await
	}

	pub async fn unsubscribe(&self, params: &ResultOfSubscribeCollection) -> Result<()> {
		self.client.call_unit("net.unsubscribe", params).await
	}

	/// Suspend every network module subscription.
	pub async fn suspend(&self) -> Result<()> {
		self.client.call_unit("net.suspend", &()).await
	}

	pub async fn resume(&self) -> Result<()> {
		self.client.call_unit("net.resume", &()).await
	}
}
