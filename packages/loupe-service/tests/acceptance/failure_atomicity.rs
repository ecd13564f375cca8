use std::sync::Arc;

use crate::acceptance::suite::{service_with, static_service, traced_request};
use loupe_service::Error;
use loupe_testkit::{FailingGeneration, FailingSearch, StaticGeneration, StaticSearch, candidate};

#[tokio::test]
async fn retrieval_failure_aborts_the_whole_invocation() {
	let service = service_with(
		Arc::new(FailingSearch { message: "connection refused".to_string() }),
		Arc::new(StaticGeneration { text: "Unreachable.".to_string(), token_count: None }),
	);
	let err = service
		.answer(traced_request("ferritin"))
		.await
		.expect_err("Expected a retrieval failure.");

	assert!(matches!(err, Error::Retrieval { .. }), "Unexpected error: {err}");
	assert!(err.to_string().contains("connection refused"), "Unexpected error: {err}");
}

#[tokio::test]
async fn generation_failure_aborts_after_retrieval_succeeded() {
	let service = service_with(
		Arc::new(StaticSearch { candidates: vec![candidate("a", "guide.pdf", 0.8, 0.5, 1.0)] }),
		Arc::new(FailingGeneration { message: "backend unavailable".to_string() }),
	);
	let err = service
		.answer(traced_request("ferritin"))
		.await
		.expect_err("Expected a generation failure.");

	assert!(matches!(err, Error::Generation { .. }), "Unexpected error: {err}");
}

#[tokio::test]
async fn blank_queries_are_rejected_before_any_stage() {
	let service = static_service(vec![candidate("a", "guide.pdf", 0.8, 0.5, 1.0)]);
	let err =
		service.answer(traced_request("   ")).await.expect_err("Expected an invalid request.");

	assert!(matches!(err, Error::InvalidRequest { .. }), "Unexpected error: {err}");
}
