// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{HashMap, HashSet},
	sync::{
		Arc,
		atomic::{AtomicU32, AtomicUsize, Ordering},
	},
	thread::{self, JoinHandle},
	time::Duration,
};

use crossbeam_channel::{Sender, bounded, unbounded};
use parking_lot::{Mutex, RwLock};
use serde_json::{Value, json};
use tonclient_abi::{
	ContextHandle, Native, NativeString, ResponseHandler, StringData,
	response::{RESPONSE_APP_NOTIFY, RESPONSE_APP_REQUEST, RESPONSE_ERROR, RESPONSE_NOP, RESPONSE_SUCCESS},
};
use tonclient_type::{Error, Result};
use tracing::{debug, trace, warn};

/// Native function implemented by the mock.
pub type Handler = Arc<dyn Fn(Value, Responder) + Send + Sync>;

/// How long [`Responder::app_request`] waits for `client.resolve_app_request`.
pub const APP_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const RESOLVE_APP_REQUEST: &str = "client.resolve_app_request";

#[derive(Debug, Clone)]
pub struct MockOptions {
	/// Worker threads answering requests.
	pub workers: usize,
	/// Run handlers inside `request`, before it returns.
	pub inline: bool,
	/// Error document returned by `create_context` instead of a handle.
	pub init_error: Option<Value>,
	/// Make `create_context` return no string at all.
	pub null_context: bool,
	/// Refuse to start every request.
	pub reject_requests: bool,
}

impl Default for MockOptions {
	fn default() -> Self {
		Self {
			workers: 4,
			inline: false,
			init_error: None,
			null_context: false,
			reject_requests: false,
		}
	}
}

struct Shared {
	options: MockOptions,
	handlers: RwLock<HashMap<String, Handler>>,
	contexts: Mutex<HashSet<ContextHandle>>,
	app_requests: Mutex<HashMap<u32, Sender<Value>>>,
	last_config: Mutex<Option<Value>>,
	next_context: AtomicU32,
	next_app_request: AtomicU32,
	creates: AtomicUsize,
	requests: AtomicUsize,
	destroys: AtomicUsize,
}

struct Job {
	handler: Handler,
	params: Value,
	responder: Responder,
}

/// In-process native engine.
///
/// Answers through the real [`ResponseHandler`] from its own worker threads,
/// the way the shared library does. Functions are registered by name with
/// [`MockEngine::on`]; unknown functions answer with an error document.
pub struct MockEngine {
	shared: Arc<Shared>,
	queue: Option<Sender<Job>>,
	workers: Vec<JoinHandle<()>>,
}

impl MockEngine {
	pub fn new() -> Arc<Self> {
		Self::with_options(MockOptions::default())
	}

	pub fn with_options(options: MockOptions) -> Arc<Self> {
		let (queue, jobs) = unbounded::<Job>();

		let workers = (0..options.workers.max(1))
			.map(|index| {
				let jobs = jobs.clone();
				thread::Builder::new()
					.name(format!("mock-engine-{}", index))
					.spawn(move || {
						while let Ok(job) = jobs.recv() {
							(job.handler)(job.params, job.responder);
						}
					})
					.expect("failed to spawn mock engine worker")
			})
			.collect();

		Arc::new(Self {
			shared: Arc::new(Shared {
				options,
				handlers: RwLock::new(HashMap::new()),
				contexts: Mutex::new(HashSet::new()),
				app_requests: Mutex::new(HashMap::new()),
				last_config: Mutex::new(None),
				next_context: AtomicU32::new(0),
				next_app_request: AtomicU32::new(0),
				creates: AtomicUsize::new(0),
				requests: AtomicUsize::new(0),
				destroys: AtomicUsize::new(0),
			}),
			queue: Some(queue),
			workers,
		})
	}

	/// Mock that replies from inside `request`, before it returns.
	pub fn inline() -> Arc<Self> {
		Self::with_options(MockOptions {
			inline: true,
			..MockOptions::default()
		})
	}

	/// Register the implementation of `function`.
	pub fn on<F>(&self, function: &str, handler: F) -> &Self
	where
		F: Fn(Value, Responder) + Send + Sync + 'static,
	{
		self.shared.handlers.write().insert(function.to_string(), Arc::new(handler));
		self
	}

	/// Register `function` as an echo of its parameters.
	pub fn echo(&self, function: &str) -> &Self {
		self.on(function, |params, responder| responder.success(params))
	}

	pub fn create_count(&self) -> usize {
		self.shared.creates.load(Ordering::SeqCst)
	}

	pub fn request_count(&self) -> usize {
		self.shared.requests.load(Ordering::SeqCst)
	}

	pub fn destroy_count(&self) -> usize {
		self.shared.destroys.load(Ordering::SeqCst)
	}

	pub fn live_contexts(&self) -> usize {
		self.shared.contexts.lock().len()
	}

	/// Configuration document received by the last `create_context`.
	pub fn last_config(&self) -> Option<Value> {
		self.shared.last_config.lock().clone()
	}

	fn handler(&self, function: &str) -> Handler {
		if let Some(handler) = self.shared.handlers.read().get(function) {
			return handler.clone();
		}
		let message = format!("Unknown function: {}", function);
		Arc::new(move |_: Value, responder: Responder| responder.error(22, &message))
	}

	fn resolve_app_request(&self, params: Value, responder: Responder) {
		let id = params.get("app_request_id").and_then(Value::as_u64).unwrap_or(0) as u32;
		let result = params.get("result").cloned().unwrap_or(Value::Null);
		let waiter = self.shared.app_requests.lock().remove(&id);
		match waiter {
			Some(waiter) => {
				let _ = waiter.send(result);
				responder.success(json!({}));
			}
			None => responder.error(25, &format!("Unknown app request: {}", id)),
		}
	}
}

impl Native for MockEngine {
	fn create_context(&self, config: &NativeString) -> Option<String> {
		self.shared.creates.fetch_add(1, Ordering::SeqCst);
		*self.shared.last_config.lock() = serde_json::from_str(config.as_str()).ok();

		if self.shared.options.null_context {
			return None;
		}
		if let Some(error) = &self.shared.options.init_error {
			return Some(json!({ "error": error }).to_string());
		}

		let handle = self.shared.next_context.fetch_add(1, Ordering::SeqCst) + 1;
		self.shared.contexts.lock().insert(handle);
		debug!("mock context {} created", handle);
		Some(json!({ "result": handle }).to_string())
	}

	fn request(
		&self,
		context: ContextHandle,
		function: &NativeString,
		params: &NativeString,
		request_id: u32,
		handler: ResponseHandler,
	) -> Result<()> {
		self.shared.requests.fetch_add(1, Ordering::SeqCst);
		if self.shared.options.reject_requests {
			return Err(Error::Library("mock engine rejects requests".to_string()));
		}

		let params = if params.is_empty() {
			Value::Null
		} else {
			serde_json::from_str(params.as_str()).unwrap_or_else(|_| Value::String(params.as_str().to_string()))
		};
		let responder = Responder {
			request_id,
			handler,
			shared: self.shared.clone(),
		};

		if !self.shared.contexts.lock().contains(&context) {
			responder.error(2, &format!("Invalid context handle: {}", context));
			return Ok(());
		}

		if function.as_str() == RESOLVE_APP_REQUEST {
			self.resolve_app_request(params, responder);
			return Ok(());
		}

		let handler = self.handler(function.as_str());
		if self.shared.options.inline {
			handler(params, responder);
			return Ok(());
		}

		let job = Job {
			handler,
			params,
			responder,
		};
		match &self.queue {
			Some(queue) => queue
				.send(job)
				.map_err(|_| Error::Library("mock engine is shut down".to_string())),
			None => Err(Error::Library("mock engine is shut down".to_string())),
		}
	}

	fn destroy_context(&self, context: ContextHandle) {
		self.shared.destroys.fetch_add(1, Ordering::SeqCst);
		if !self.shared.contexts.lock().remove(&context) {
			warn!("mock context {} destroyed twice", context);
		}
	}
}

impl Drop for MockEngine {
	fn drop(&mut self) {
		drop(self.queue.take());
		for worker in self.workers.drain(..) {
			let _ = worker.join();
		}
	}
}

/// Answers one request through the native callback.
#[derive(Clone)]
pub struct Responder {
	request_id: u32,
	handler: ResponseHandler,
	shared: Arc<Shared>,
}

impl Responder {
	pub fn request_id(&self) -> u32 {
		self.request_id
	}

	/// Invoke the callback with an arbitrary response type.
	pub fn raw(&self, response_type: u32, json: &str, finished: bool) {
		trace!("mock response {} type={} finished={}", self.request_id, response_type, finished);
		let data = StringData {
			content: json.as_ptr(),
			len: json.len() as u32,
		};
		(self.handler)(self.request_id, data, response_type, finished);
	}

	pub fn success(&self, result: Value) {
		self.raw(RESPONSE_SUCCESS, &result.to_string(), true);
	}

	/// Resolve the call but keep the request open for later events.
	pub fn success_and_continue(&self, result: Value) {
		self.raw(RESPONSE_SUCCESS, &result.to_string(), false);
	}

	pub fn error(&self, code: i64, message: &str) {
		self.raw(RESPONSE_ERROR, &json!({ "code": code, "message": message }).to_string(), true);
	}

	pub fn nop(&self, finished: bool) {
		self.raw(RESPONSE_NOP, "", finished);
	}

	/// Close the request without a payload.
	pub fn finish(&self) {
		self.nop(true);
	}

	pub fn stream(&self, response_type: u32, payload: Value) {
		self.raw(response_type, &payload.to_string(), false);
	}

	pub fn app_notify(&self, data: Value) {
		self.stream(RESPONSE_APP_NOTIFY, data);
	}

	/// Ask the application object for a result and wait until the client
	/// resolves it, returning the `AppRequestResult` document.
	///
	/// Must run on a worker thread: the answer arrives through another request.
	pub fn app_request(&self, data: Value) -> Option<Value> {
		let id = self.shared.next_app_request.fetch_add(1, Ordering::SeqCst) + 1;
		let (waiter, result) = bounded(1);
		self.shared.app_requests.lock().insert(id, waiter);

		self.stream(RESPONSE_APP_REQUEST, json!({ "app_request_id": id, "request_data": data }));

		let resolved = result.recv_timeout(APP_REQUEST_TIMEOUT).ok();
		self.shared.app_requests.lock().remove(&id);
		resolved
	}
}
