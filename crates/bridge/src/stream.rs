// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::future::Future;

use tokio::sync::{mpsc, oneshot};
use tonclient_type::{Error, Result};
use tracing::warn;

use crate::pending::Event;

/// Intermediate payload delivered to a streaming call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
	/// Response-type code, `>= 100`.
	pub kind: u32,
	/// JSON text as produced by the engine.
	pub payload: String,
}

/// Receives the stream events of one call, one at a time, in native order.
///
/// An `Err` fails the call if its result has not been observed yet; later
/// events are still delivered.
pub trait StreamHandler: Send + 'static {
	fn on_event(&mut self, event: StreamEvent) -> impl Future<Output = Result<()>> + Send;
}

impl<F, Fut> StreamHandler for F
where
	F: FnMut(StreamEvent) -> Fut + Send + 'static,
	Fut: Future<Output = Result<()>> + Send,
{
	fn on_event(&mut self, event: StreamEvent) -> impl Future<Output = Result<()>> + Send {
		(self)(event)
	}
}

/// Drive one streaming request until the engine closes it.
///
/// The outcome is sent as soon as it is known, but the pump keeps delivering
/// events after it until the request is retired.
pub(crate) async fn pump<H: StreamHandler>(
	function: String,
	mut events: mpsc::UnboundedReceiver<Event>,
	mut handler: H,
	result: oneshot::Sender<Result<String>>,
) {
	let mut result = Some(result);
	while let Some(event) = events.recv().await {
		match event {
			Event::Stream(event) => {
				if let Err(err) = handler.on_event(event).await {
					warn!("stream handler of {} failed: {}", function, err);
					if let Some(result) = result.take() {
						let _ = result.send(Err(err));
					}
				}
			}
			Event::Done(outcome) => {
				if let Some(result) = result.take() {
					let _ = result.send(outcome);
				}
			}
		}
	}

	if let Some(result) = result.take() {
		let _ = result.send(Err(Error::ContextClosed));
	}
}
