// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use std::sync::Arc;

use tonclient::{Client, ClientConfig};
use tonclient_testing::{MockEngine, init_logging};

pub fn client(engine: &Arc<MockEngine>) -> Client {
	client_with_config(engine, ClientConfig::default())
}

pub fn client_with_config(engine: &Arc<MockEngine>, config: ClientConfig) -> Client {
	init_logging();
	Client::builder().config(config).native(engine.clone()).build().unwrap()
}
