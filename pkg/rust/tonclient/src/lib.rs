// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Async client for the native TON client engine
//!
//! ```no_run
//! use tonclient::{Client, ClientConfig, modules::crypto::ParamsOfHash};
//!
//! # async fn run() -> tonclient::Result<()> {
//! let client = Client::builder().config(ClientConfig::default()).build()?;
//! let version = client.client().version().await?;
//! let hash = client
//! 	.crypto()
//! 	.sha256(&ParamsOfHash {
//! 		data: "aGVsbG8=".to_string(),
//! 	})
//! 	.await?;
//! # Ok(())
//! # }
//! ```

mod app;
mod builder;
mod client;
pub mod config;
pub mod modules;

pub use app::{AppRequestResult, AppRequestResultError, AppRequestResultOk, ParamsOfAppRequest};
pub use builder::ClientBuilder;
pub use client::Client;
pub use config::ClientConfig;
pub use tonclient_abi::{DynamicLibrary, LIBRARY_ENV, Native};
pub use tonclient_bridge::{ContextState, StreamEvent};
pub use tonclient_codec::{TaggedUnion, Variant, VariantRegistry};
pub use tonclient_type::{ClientError, DecodeError, Error, NumericSpec, Result};
