// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, Mutex};

use futures_util::future::join_all;
use serde_json::{Value, json};
use tonclient_bridge::{Context, ContextState, Error, StreamEvent};
use tonclient_testing::{MockEngine, MockOptions, Responder, init_logging, util::wait::wait_for};
use uuid::Uuid;

fn context(engine: &Arc<MockEngine>) -> Context {
	Context::create(engine.clone(), "{}").unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_call_resolves_with_result() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("client.version", |_, responder| responder.success(json!({ "version": "1.44.0" })));

	let ctx = context(&engine);
	let result = ctx.call("client.version", "").await.unwrap();
	assert_eq!(serde_json::from_str::<Value>(&result).unwrap(), json!({ "version": "1.44.0" }));
	assert_eq!(engine.request_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_document_is_remote_error() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("crypto.factorize", |_, responder| responder.error(106, "Invalid factorize challenge"));

	let ctx = context(&engine);
	let err = ctx.call("crypto.factorize", r#"{"composite":"zz"}"#).await.unwrap_err();
	match err {
		Error::Remote(document) => {
			assert_eq!(document.code, Some(106));
			assert_eq!(document.message, "Invalid factorize challenge");
		}
		other => panic!("unexpected error: {:?}", other),
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_function_fails_only_that_call() {
	init_logging();
	let engine = MockEngine::new();
	engine.echo("test.echo");

	let ctx = context(&engine);
	assert!(matches!(ctx.call("test.missing", "{}").await, Err(Error::Remote(_))));
	assert_eq!(ctx.call("test.echo", r#"{"a":1}"#).await.unwrap(), r#"{"a":1}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_calls_do_not_cross_talk() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("test.derive", |params, responder| {
		let payload = params["payload"].as_str().unwrap_or_default().to_uppercase();
		responder.success(json!({ "derived": payload }));
	});

	let ctx = Arc::new(context(&engine));
	let calls = (0..1000).map(|_| {
		let ctx = ctx.clone();
		tokio::spawn(async move {
			let payload = Uuid::new_v4().to_string();
			let params = json!({ "payload": payload }).to_string();
			let result = ctx.call("test.derive", &params).await.unwrap();
			let result: Value = serde_json::from_str(&result).unwrap();
			assert_eq!(result["derived"], payload.to_uppercase());
		})
	});

	for outcome in join_all(calls).await {
		outcome.unwrap();
	}
	wait_for(|| ctx.in_flight() == 0, "all requests retired").await;
	assert_eq!(engine.request_count(), 1000);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inline_replies_before_request_returns() {
	init_logging();
	let engine = MockEngine::inline();
	engine.echo("test.echo");

	let ctx = context(&engine);
	for i in 0..50 {
		let params = json!({ "i": i }).to_string();
		assert_eq!(ctx.call("test.echo", &params).await.unwrap(), params);
	}
	assert_eq!(ctx.in_flight(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_call_after_destroy_never_reaches_native() {
	init_logging();
	let engine = MockEngine::new();
	engine.echo("test.echo");

	let ctx = context(&engine);
	ctx.destroy();
	assert_eq!(ctx.state(), ContextState::Destroyed);

	let err = ctx.call("test.echo", "{}").await.unwrap_err();
	assert!(err.is_context_closed());
	let err = ctx.call_streaming("test.echo", "{}", |_: StreamEvent| async { Ok::<_, Error>(()) }).await.unwrap_err();
	assert!(err.is_context_closed());
	assert_eq!(engine.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destroy_is_idempotent() {
	init_logging();
	let engine = MockEngine::new();
	let ctx = context(&engine);
	assert_eq!(ctx.state(), ContextState::Active);

	ctx.destroy();
	ctx.destroy();
	drop(ctx);
	assert_eq!(engine.destroy_count(), 1);
	assert_eq!(engine.live_contexts(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drop_destroys_context() {
	let engine = MockEngine::new();
	{
		let _ctx = context(&engine);
		assert_eq!(engine.live_contexts(), 1);
	}
	assert_eq!(engine.destroy_count(), 1);
}

#[test]
fn test_init_error_document() {
	init_logging();
	let engine = MockEngine::with_options(MockOptions {
		init_error: Some(json!({ "code": 23, "message": "Invalid network config" })),
		..MockOptions::default()
	});

	let err = Context::create(engine.clone(), r#"{"network":{}}"#).unwrap_err();
	match &err {
		Error::NativeInit(document) => assert_eq!(document.message, "Invalid network config"),
		other => panic!("unexpected error: {:?}", other),
	}
	assert_eq!(engine.create_count(), 1);
	assert_eq!(engine.destroy_count(), 0);
}

#[test]
fn test_context_state_follows_lifecycle() {
	let engine = MockEngine::new();
	let ctx = context(&engine);
	assert_eq!(ctx.state(), ContextState::Active);
	assert_ne!(ctx.state(), ContextState::Uninitialized);

	ctx.destroy();
	assert_eq!(ctx.state(), ContextState::Destroyed);
	assert!(ctx.is_destroyed());
}

#[test]
fn test_null_context_is_init_error() {
	let engine = MockEngine::with_options(MockOptions {
		null_context: true,
		..MockOptions::default()
	});
	assert_eq!(Context::create(engine, "{}").unwrap_err().code(), "CONTEXT_001");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_request_leaves_nothing_pending() {
	init_logging();
	let engine = MockEngine::with_options(MockOptions {
		reject_requests: true,
		..MockOptions::default()
	});

	let ctx = context(&engine);
	let err = ctx.call("test.echo", "{}").await.unwrap_err();
	assert!(matches!(err, Error::RequestRejected { ref function, .. } if function == "test.echo"));
	assert_eq!(ctx.in_flight(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stream_events_precede_result() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("processing.process_message", |_, responder| {
		for step in 0..5 {
			responder.stream(100, json!({ "step": step }));
		}
		responder.success(json!({ "done": true }));
	});

	let ctx = context(&engine);
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	let result = ctx
		.call_streaming("processing.process_message", "{}", move |event: StreamEvent| {
			let sink = sink.clone();
			async move {
				let payload: Value = serde_json::from_str(&event.payload).unwrap();
				sink.lock().unwrap().push(payload["step"].as_u64().unwrap());
				Ok::<_, Error>(())
			}
		})
		.await
		.unwrap();

	assert_eq!(result, r#"{"done":true}"#);
	assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_events_after_result_until_finished() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("net.subscribe_collection", |_, responder| {
		responder.success_and_continue(json!({ "handle": 1 }));
		for id in 0..3 {
			responder.stream(100, json!({ "result": { "id": id } }));
		}
		responder.finish();
	});

	let ctx = context(&engine);
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	let result = ctx
		.call_streaming("net.subscribe_collection", "{}", move |event: StreamEvent| {
			let sink = sink.clone();
			async move {
				sink.lock().unwrap().push(event.kind);
				Ok::<_, Error>(())
			}
		})
		.await
		.unwrap();

	assert_eq!(result, r#"{"handle":1}"#);
	wait_for(|| seen.lock().unwrap().len() == 3, "late stream events delivered").await;
	wait_for(|| ctx.in_flight() == 0, "subscription retired").await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stream_handler_error_fails_call() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("test.stream", |_, responder| {
		responder.stream(100, json!({}));
		responder.success(json!({}));
	});

	let ctx = context(&engine);
	let err = ctx
		.call_streaming("test.stream", "{}", |_: StreamEvent| async { Err::<(), _>(Error::AppObject("rejected".to_string())) })
		.await
		.unwrap_err();
	assert!(matches!(err, Error::AppObject(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_finished_without_result_is_empty_success() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("test.nop", |_, responder| responder.finish());
	engine.on("test.reserved", |_, responder| responder.raw(7, "ignored", true));

	let ctx = context(&engine);
	assert_eq!(ctx.call("test.nop", "").await.unwrap(), "");
	assert_eq!(ctx.call("test.reserved", "").await.unwrap(), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_finished_is_harmless() {
	init_logging();
	let engine = MockEngine::new();
	engine.on("test.twice", |params, responder| {
		responder.success(params);
		responder.finish();
		responder.finish();
	});
	engine.echo("test.echo");

	let ctx = context(&engine);
	assert_eq!(ctx.call("test.twice", r#"{"n":1}"#).await.unwrap(), r#"{"n":1}"#);
	wait_for(|| ctx.in_flight() == 0, "request retired once").await;
	assert_eq!(ctx.call("test.echo", r#"{"n":2}"#).await.unwrap(), r#"{"n":2}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destroy_fails_pending_calls() {
	init_logging();
	let engine = MockEngine::new();
	let parked: Arc<Mutex<Vec<Responder>>> = Arc::new(Mutex::new(Vec::new()));
	let park = parked.clone();
	engine.on("test.park", move |_, responder| park.lock().unwrap().push(responder));

	let ctx = Arc::new(context(&engine));
	let call = {
		let ctx = ctx.clone();
		tokio::spawn(async move { ctx.call("test.park", "{}").await })
	};

	wait_for(|| parked.lock().unwrap().len() == 1, "request reached the engine").await;
	assert_eq!(ctx.in_flight(), 1);

	ctx.destroy();
	let err = call.await.unwrap().unwrap_err();
	assert!(err.is_context_closed());
	assert_eq!(ctx.in_flight(), 0);

	// a late answer for the closed request is dropped
	let late = parked.lock().unwrap().pop();
	if let Some(responder) = late {
		responder.success(json!({}));
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn test_contexts_are_independent() {
	init_logging();
	let first = MockEngine::new();
	let second = MockEngine::new();
	let parked: Arc<Mutex<Vec<Responder>>> = Arc::new(Mutex::new(Vec::new()));
	let park = parked.clone();
	second.on("test.park", move |_, responder| park.lock().unwrap().push(responder));

	// both engines hand out handle 1
	let a = context(&first);
	let b = Arc::new(context(&second));
	assert_eq!(a.handle(), b.handle());

	let call = {
		let b = b.clone();
		tokio::spawn(async move { b.call("test.park", "{}").await })
	};
	wait_for(|| parked.lock().unwrap().len() == 1, "request reached the engine").await;

	a.destroy();
	assert_eq!(b.in_flight(), 1);

	let responder = parked.lock().unwrap().pop();
	if let Some(responder) = responder {
		responder.success(json!({ "ok": true }));
	}
	assert_eq!(call.await.unwrap().unwrap(), r#"{"ok":true}"#);
}
