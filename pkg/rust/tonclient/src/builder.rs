// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, sync::Arc};

use tonclient_abi::{DynamicLibrary, Native};
use tonclient_bridge::Context;
use tonclient_codec::{VariantRegistry, encode};
use tonclient_type::Result;
use tracing::{debug, instrument};

use crate::{
	AppRequestResult, Client, ClientConfig,
	modules::{
		crypto::{ParamsOfAppSigningBox, ResultOfAppSigningBox},
		net::ParamsOfQueryOperation,
		processing::ProcessingEvent,
		utils::AddressStringFormat,
	},
};

/// Builds a [`Client`] over the shared library or any other [`Native`].
#[derive(Default)]
pub struct ClientBuilder {
	config: ClientConfig,
	library: Option<PathBuf>,
	native: Option<Arc<dyn Native>>,
}

impl ClientBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn config(mut self, config: ClientConfig) -> Self {
		self.config = config;
		self
	}

	/// Load the engine from `path` instead of the default location.
	pub fn library(mut self, path: impl Into<PathBuf>) -> Self {
		self.library = Some(path.into());
		self
	}

	/// Use an already loaded engine. Takes precedence over [`Self::library`].
	pub fn native(mut self, native: Arc<dyn Native>) -> Self {
		self.native = Some(native);
		self
	}

	#[instrument(name = "tonclient::build", level = "debug", skip_all)]
	pub fn build(self) -> Result<Client> {
		let native: Arc<dyn Native> = match (self.native, self.library) {
			(Some(native), _) => native,
			(None, Some(path)) => Arc::new(DynamicLibrary::open(path)?),
			(None, None) => Arc::new(DynamicLibrary::open_default()?),
		};

		let registry = variant_registry()?;
		debug!("registered {} variant sets", registry.len());

		let config = encode(&self.config)?;
		let context = Context::create(native, &config)?;
		Ok(Client::new(context, registry))
	}
}

fn variant_registry() -> Result<VariantRegistry> {
	let mut registry = VariantRegistry::new();
	registry
		.register::<AppRequestResult>()?
		.register::<ParamsOfAppSigningBox>()?
		.register::<ResultOfAppSigningBox>()?
		.register::<AddressStringFormat>()?
		.register::<ParamsOfQueryOperation>()?
		.register::<ProcessingEvent>()?;
	Ok(registry)
}
