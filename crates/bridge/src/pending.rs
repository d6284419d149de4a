// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Process-wide table of in-flight requests.
//!
//! The native callback carries nothing but the correlation id, so routing
//! goes through one table shared by every context.

use std::sync::{
	Arc,
	atomic::{AtomicBool, AtomicU32, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use once_cell::sync::Lazy;
use tokio::sync::mpsc;
use tonclient_type::{Error, Result};

use crate::stream::StreamEvent;

pub(crate) static PENDING: Lazy<PendingTable> = Lazy::new(PendingTable::new);

/// Delivered to the waiting side of one request, in native order.
pub(crate) enum Event {
	Stream(StreamEvent),
	Done(Result<String>),
}

pub(crate) struct PendingRequest {
	/// Process-unique id of the owning [`crate::Context`].
	pub(crate) owner: u64,
	pub(crate) function: String,
	pub(crate) streaming: bool,
	resolved: AtomicBool,
	events: mpsc::UnboundedSender<Event>,
}

impl PendingRequest {
	pub(crate) fn new(
		owner: u64,
		function: &str,
		streaming: bool,
		events: mpsc::UnboundedSender<Event>,
	) -> Self {
		Self {
			owner,
			function: function.to_string(),
			streaming,
			resolved: AtomicBool::new(false),
			events,
		}
	}

	/// Deliver the call's outcome. Only the first outcome counts.
	pub(crate) fn resolve(&self, outcome: Result<String>) -> bool {
		if self.resolved.swap(true, Ordering::AcqRel) {
			return false;
		}
		let _ = self.events.send(Event::Done(outcome));
		true
	}

	#[cfg(test)]
	pub(crate) fn is_resolved(&self) -> bool {
		self.resolved.load(Ordering::Acquire)
	}

	pub(crate) fn stream(&self, event: StreamEvent) {
		let _ = self.events.send(Event::Stream(event));
	}
}

pub(crate) struct PendingTable {
	requests: DashMap<u32, Arc<PendingRequest>>,
	next_id: AtomicU32,
}

impl PendingTable {
	fn new() -> Self {
		Self {
			requests: DashMap::new(),
			next_id: AtomicU32::new(0),
		}
	}

	/// Insert `request` under a fresh correlation id.
	///
	/// Ids are never 0 and never collide with a request still in flight,
	/// even after the counter wraps.
	pub(crate) fn register(&self, request: PendingRequest) -> u32 {
		let request = Arc::new(request);
		loop {
			let id = self.next_id.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
			if id == 0 {
				continue;
			}
			match self.requests.entry(id) {
				Entry::Occupied(_) => continue,
				Entry::Vacant(vacant) => {
					vacant.insert(request);
					return id;
				}
			}
		}
	}

	pub(crate) fn get(&self, id: u32) -> Option<Arc<PendingRequest>> {
		self.requests.get(&id).map(|entry| entry.value().clone())
	}

	/// Remove `id`. Only the first caller gets the request back.
	pub(crate) fn retire(&self, id: u32) -> Option<Arc<PendingRequest>> {
		self.requests.remove(&id).map(|(_, request)| request)
	}

	/// Retire every request of `owner`, failing the unresolved ones with
	/// `ContextClosed`. Returns how many were retired.
	pub(crate) fn close_owner(&self, owner: u64) -> usize {
		let ids: Vec<u32> =
			self.requests.iter().filter(|entry| entry.value().owner == owner).map(|entry| *entry.key()).collect();

		let mut closed = 0;
		for id in ids {
			if let Some(request) = self.retire(id) {
				request.resolve(Err(Error::ContextClosed));
				closed += 1;
			}
		}
		closed
	}

	pub(crate) fn count_owner(&self, owner: u64) -> usize {
		self.requests.iter().filter(|entry| entry.value().owner == owner).count()
	}

	pub(crate) fn len(&self) -> usize {
		self.requests.len()
	}
}
