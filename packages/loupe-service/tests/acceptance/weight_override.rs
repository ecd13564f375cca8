use std::sync::Arc;

use crate::acceptance::suite::{service_with, static_service, traced_request};
use loupe_domain::fusion::ScoreWeights;
use loupe_service::Error;
use loupe_testkit::{FailingSearch, StaticGeneration, candidate};

fn contested_candidates() -> Vec<loupe_domain::fusion::CandidateDocument> {
	vec![
		candidate("semantic-heavy", "guide.pdf", 0.9, 0.1, 0.0),
		candidate("keyword-heavy", "guide.pdf", 0.1, 0.9, 0.0),
	]
}

#[tokio::test]
async fn per_call_weights_change_the_ranking() {
	let service = static_service(contested_candidates());
	let default_response =
		service.answer(traced_request("ferritin")).await.expect("answer failed");
	let default_trace = default_response.pipeline.expect("Expected a pipeline trace.");

	assert_eq!(default_trace.retrieval.documents[0].id, "semantic-heavy");

	let mut req = traced_request("ferritin");

	req.score_weights = Some(ScoreWeights { semantic: 0.1, keyword: 0.9, source: 0.0 });

	let override_response = service.answer(req).await.expect("answer failed");
	let override_trace = override_response.pipeline.expect("Expected a pipeline trace.");

	assert_eq!(override_trace.retrieval.documents[0].id, "keyword-heavy");
	assert!((override_trace.retrieval.score_weights.keyword - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn invalid_override_is_rejected_before_any_stage_runs() {
	// A failing backend would surface Error::Retrieval if a stage ever ran.
	let service = service_with(
		Arc::new(FailingSearch { message: "must never be called".to_string() }),
		Arc::new(StaticGeneration { text: "Unreachable.".to_string(), token_count: None }),
	);
	let mut req = traced_request("ferritin");

	req.score_weights = Some(ScoreWeights { semantic: 0.6, keyword: 0.2, source: 0.1 });

	let err = service.answer(req).await.expect_err("Expected a configuration error.");

	assert!(matches!(err, Error::Config { .. }), "Unexpected error: {err}");
	assert!(err.to_string().contains("sum to 1.0"), "Unexpected error: {err}");
}

#[tokio::test]
async fn negative_override_weights_are_rejected() {
	let service = static_service(contested_candidates());
	let mut req = traced_request("ferritin");

	req.score_weights = Some(ScoreWeights { semantic: 1.2, keyword: -0.1, source: -0.1 });

	let err = service.answer(req).await.expect_err("Expected a configuration error.");

	assert!(matches!(err, Error::Config { .. }), "Unexpected error: {err}");
}
