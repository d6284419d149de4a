// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Application objects: engine-to-client requests carried on a stream.

use std::{
	future::Future,
	sync::{Arc, Weak},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tonclient_abi::response::{RESPONSE_APP_NOTIFY, RESPONSE_APP_REQUEST};
use tonclient_bridge::StreamEvent;
use tonclient_codec::{decode, decode_value, encode_value};
use tonclient_type::Result;
use tracing::{error, trace, warn};

use crate::{
	client::{Client, ClientInner},
	modules::client::ParamsOfResolveAppRequest,
};

/// Request from the engine that expects an answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOfAppRequest {
	pub app_request_id: u32,
	pub request_data: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppRequestResultError {
	pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppRequestResultOk {
	pub result: Value,
}

tonclient_codec::tagged_union! {
	/// Answer to an app request, sent back through `client.resolve_app_request`.
	#[derive(Debug, Clone, PartialEq)]
	pub enum AppRequestResult {
		Error(AppRequestResultError),
		Ok(AppRequestResultOk),
	}
}

impl Default for AppRequestResult {
	fn default() -> Self {
		Self::Ok(AppRequestResultOk::default())
	}
}

/// Handle one stream event of a call registered with an app object.
///
/// Handler failures are reported back to the engine; only an undecodable
/// envelope fails the call.
pub(crate) async fn dispatch<Req, Res, F, Fut>(client: Weak<ClientInner>, app_object: Arc<F>, event: StreamEvent) -> Result<()>
where
	Req: DeserializeOwned + Send + 'static,
	Res: Serialize + Send + 'static,
	F: Fn(Req) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Res>> + Send + 'static,
{
	match event.kind {
		RESPONSE_APP_REQUEST => {
			let request: ParamsOfAppRequest = decode(&event.payload)?;
			let app_request_id = request.app_request_id;
			let result = match answer::<Req, Res, F, Fut>(app_object.as_ref(), request.request_data).await {
				Ok(result) => AppRequestResult::Ok(AppRequestResultOk {
					result,
				}),
				Err(err) => {
					error!("app request {} failed: {}", app_request_id, err);
					AppRequestResult::Error(AppRequestResultError {
						text: err.to_string(),
					})
				}
			};

			let Some(inner) = client.upgrade() else {
				warn!("client dropped before app request {} was resolved", app_request_id);
				return Ok(());
			};
			let client = Client::from_inner(inner);
			let resolved = client
				.client()
				.resolve_app_request(&ParamsOfResolveAppRequest {
					app_request_id,
					result,
				})
				.await;
			if let Err(err) = resolved {
				error!("failed to resolve app request {}: {}", app_request_id, err);
			}
		}
		RESPONSE_APP_NOTIFY => match decode::<Req>(&event.payload) {
			Ok(notification) => {
				if let Err(err) = (*app_object)(notification).await {
					warn!("app notification handler failed: {}", err);
				}
			}
			Err(err) => warn!("undecodable app notification: {}", err),
		},
		kind => trace!("ignoring stream event {} for app object", kind),
	}
	Ok(())
}

async fn answer<Req, Res, F, Fut>(app_object: &F, request_data: Value) -> Result<Value>
where
	Req: DeserializeOwned,
	Res: Serialize,
	F: Fn(Req) -> Fut,
	Fut: Future<Output = Result<Res>>,
{
	let request = decode_value::<Req>(request_data)?;
	let response = app_object(request).await?;
	encode_value(&response)
}
