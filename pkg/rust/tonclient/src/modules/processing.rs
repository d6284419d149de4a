// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tonclient_type::{ClientError, Result};

use crate::Client;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WillFetchFirstBlock {
	pub message_id: String,
	pub message_dst: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchFirstBlockFailed {
	pub error: ClientError,
	pub message_id: String,
	pub message_dst: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WillSend {
	pub shard_block_id: String,
	pub message_id: String,
	pub message_dst: String,
	pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DidSend {
	pub shard_block_id: String,
	pub message_id: String,
	pub message_dst: String,
	pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendFailed {
	pub shard_block_id: String,
	pub message_id: String,
	pub message_dst: String,
	pub message: String,
	pub error: ClientError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WillFetchNextBlock {
	pub shard_block_id: String,
	pub message_id: String,
	pub message_dst: String,
	pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchNextBlockFailed {
	pub shard_block_id: String,
	pub message_id: String,
	pub message_dst: String,
	pub message: String,
	pub error: ClientError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageExpired {
	pub message_id: String,
	pub message_dst: String,
	pub message: String,
	pub error: ClientError,
}

tonclient_codec::tagged_union! {
	/// Progress of a message through sending and transaction lookup.
	#[derive(Debug, Clone, PartialEq)]
	pub enum ProcessingEvent {
		WillFetchFirstBlock(WillFetchFirstBlock),
		FetchFirstBlockFailed(FetchFirstBlockFailed),
		WillSend(WillSend),
		DidSend(DidSend),
		SendFailed(SendFailed),
		WillFetchNextBlock(WillFetchNextBlock),
		FetchNextBlockFailed(FetchNextBlockFailed),
		MessageExpired(MessageExpired),
	}
}

impl Default for ProcessingEvent {
	fn default() -> Self {
		Self::WillFetchFirstBlock(WillFetchFirstBlock::default())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfSendMessage {
	/// Message BOC, base64.
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub abi: Option<Value>,
	pub send_events: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfSendMessage {
	pub shard_block_id: String,
	pub sending_endpoints: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfWaitForTransaction {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub abi: Option<Value>,
	pub message: String,
	pub shard_block_id: String,
	pub send_events: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sending_endpoints: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfProcessMessage {
	/// Parameters of `abi.encode_message`, passed through.
	pub message_encode_params: Value,
	pub send_events: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodedOutput {
	pub out_messages: Vec<Option<Value>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output: Option<Value>,
}

/// Fee amounts in nanotokens, as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFees {
	pub in_msg_fwd_fee: String,
	pub storage_fee: String,
	pub gas_fee: String,
	pub out_msgs_fwd_fee: String,
	pub total_account_fees: String,
	pub total_output: String,
	pub ext_in_msg_fee: String,
	pub total_fwd_fees: String,
	pub account_fees: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOfProcessMessage {
	pub transaction: Value,
	pub out_messages: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decoded: Option<DecodedOutput>,
	pub fees: TransactionFees,
}

pub struct ProcessingModule<'a> {
	client: &'a Client,
}

impl<'a> ProcessingModule<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self {
			client,
		}
	}

	pub async fn send_message<F, Fut>(&self, params: &ParamsOfSendMessage, callback: F) -> Result<ResultOfSendMessage>
	where
		F: FnMut(ProcessingEvent, u32) -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		self.client.call_with_callback("processing.send_message", params, callback).await
	}

	pub async fn wait_for_transaction<F, Fut>(
		&self,
		params: &ParamsOfWaitForTransaction,
		callback: F,
	) -> Result<ResultOfProcessMessage>
	where
		F: FnMut(ProcessingEvent, u32) -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		self.client.call_with_callback("processing.wait_for_transaction", params, callback).await
	}

	/// Encode, send and wait for the transaction of a message.
	///
	/// With `send_events` set, every [`ProcessingEvent`] reaches `callback`
	/// before the result is returned.
	pub async fn process_message<F, Fut>(&self, params: &ParamsOfProcessMessage, callback: F) -> Result<ResultOfProcessMessage>
	where
		F: FnMut(ProcessingEvent, u32) -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		self.client.call_with_callback("processing.process_message", params, callback).await
	}
}
