// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{fmt, future::Future, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tonclient_bridge::{Context, StreamEvent};
use tonclient_codec::{VariantRegistry, decode, encode_value};
use tonclient_type::{Error, Result};

use crate::{
	app,
	builder::ClientBuilder,
	modules::{
		client::ClientModule, crypto::CryptoModule, net::NetModule, processing::ProcessingModule,
		utils::UtilsModule,
	},
};

pub(crate) struct ClientInner {
	pub(crate) context: Context,
	pub(crate) registry: VariantRegistry,
}

/// Handle to one native engine context.
///
/// Cheap to clone; every clone talks to the same context, which is destroyed
/// when the last clone is dropped or on [`Client::close`].
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}

impl Client {
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}

	pub(crate) fn new(context: Context, registry: VariantRegistry) -> Self {
		Self {
			inner: Arc::new(ClientInner {
				context,
				registry,
			}),
		}
	}

	pub(crate) fn from_inner(inner: Arc<ClientInner>) -> Self {
		Self {
			inner,
		}
	}

	pub fn context(&self) -> &Context {
		&self.inner.context
	}

	/// Variant sets known to this client.
	pub fn variant_registry(&self) -> &VariantRegistry {
		&self.inner.registry
	}

	/// Destroy the native context. Pending and later calls fail with `ContextClosed`.
	pub fn close(&self) {
		self.inner.context.destroy();
	}

	/// Call a native function with typed parameters and result.
	pub async fn call<P, R>(&self, function: &str, params: &P) -> Result<R>
	where
		P: Serialize + ?Sized,
		R: DeserializeOwned,
	{
		let params = encode_params(params)?;
		let result = self.inner.context.call(function, &params).await?;
		decode(&result)
	}

	/// Call a native function whose result carries nothing of interest.
	pub async fn call_unit<P>(&self, function: &str, params: &P) -> Result<()>
	where
		P: Serialize + ?Sized,
	{
		let params = encode_params(params)?;
		self.inner.context.call(function, &params).await?;
		Ok(())
	}

	/// Call a native function that reports progress through stream events.
	///
	/// Each event payload is decoded into `E` and handed to `callback` with its
	/// response-type code. An event that fails to decode fails the call.
	pub async fn call_with_callback<P, R, E, F, Fut>(&self, function: &str, params: &P, mut callback: F) -> Result<R>
	where
		P: Serialize + ?Sized,
		R: DeserializeOwned,
		E: DeserializeOwned + Send + 'static,
		F: FnMut(E, u32) -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let params = encode_params(params)?;
		let result = self
			.inner
			.context
			.call_streaming(function, &params, move |event: StreamEvent| {
				let delivery = decode::<E>(&event.payload).map(|decoded| callback(decoded, event.kind));
				async move {
					delivery?.await;
					Ok::<(), Error>(())
				}
			})
			.await?;
		decode(&result)
	}

	/// Call a native function that sends app requests and notifications back.
	///
	/// `app_object` answers each request; its result (or failure) is returned
	/// to the engine through `client.resolve_app_request`. The registration
	/// holds the client weakly.
	pub async fn call_with_app_object<P, R, Req, Res, F, Fut>(&self, function: &str, params: &P, app_object: F) -> Result<R>
	where
		P: Serialize + ?Sized,
		R: DeserializeOwned,
		Req: DeserializeOwned + Send + 'static,
		Res: Serialize + Send + 'static,
		F: Fn(Req) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Res>> + Send + 'static,
	{
		let params = encode_params(params)?;
		let client = Arc::downgrade(&self.inner);
		let app_object = Arc::new(app_object);
		let result = self
			.inner
			.context
			.call_streaming(function, &params, move |event: StreamEvent| {
				app::dispatch::<Req, Res, F, Fut>(client.clone(), app_object.clone(), event)
			})
			.await?;
		decode(&result)
	}

	pub fn client(&self) -> ClientModule<'_> {
		ClientModule::new(self)
	}

	pub fn crypto(&self) -> CryptoModule<'_> {
		CryptoModule::new(self)
	}

	pub fn utils(&self) -> UtilsModule<'_> {
		UtilsModule::new(self)
	}

	pub fn net(&self) -> NetModule<'_> {
		NetModule::new(self)
	}

	pub fn processing(&self) -> ProcessingModule<'_> {
		ProcessingModule::new(self)
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client").field("context", &self.inner.context).finish()
	}
}

/// Parameters that encode to `null` are sent as empty text.
fn encode_params<P: Serialize + ?Sized>(params: &P) -> Result<String> {
	match encode_value(params)? {
		Value::Null => Ok(String::new()),
		value => Ok(value.to_string()),
	}
}
