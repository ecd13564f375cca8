use std::sync::{Arc, Mutex};

use crate::acceptance::suite::traced_request;
use loupe_domain::fusion::CandidateDocument;
use loupe_service::{LoupeService, Providers};
use loupe_testkit::{SpyGeneration, StaticSearch, candidate, test_config};

fn sized_candidate(id: &str, source: &str, semantic: f32, content_len: usize) -> CandidateDocument {
	let mut candidate = candidate(id, source, semantic, 0.0, 0.0);

	candidate.content = "x".repeat(content_len);

	candidate
}

fn budgeted_service(
	candidates: Vec<CandidateDocument>,
	max_chars: u64,
	preview_chars: u32,
	contexts: Arc<Mutex<Vec<String>>>,
) -> LoupeService {
	let mut cfg = test_config();

	cfg.context.max_chars = max_chars;
	cfg.context.preview_chars = preview_chars;

	LoupeService::with_providers(
		cfg,
		Providers::new(
			Arc::new(StaticSearch { candidates }),
			Arc::new(SpyGeneration { text: "Budgeted answer.".to_string(), contexts }),
		),
	)
}

#[tokio::test]
async fn budget_stops_at_the_first_oversized_document() {
	let contexts = Arc::new(Mutex::new(Vec::new()));
	// Rank order is a, b, c; b busts the budget, so c must not be included
	// even though it would fit.
	let service = budgeted_service(
		vec![
			sized_candidate("a", "guide.pdf", 0.9, 20),
			sized_candidate("b", "guide.pdf", 0.8, 25),
			sized_candidate("c", "guide.pdf", 0.7, 5),
		],
		30,
		200,
		contexts.clone(),
	);
	let response = service.answer(traced_request("ferritin")).await.expect("answer failed");
	let trace = response.pipeline.expect("Expected a pipeline trace.");

	assert_eq!(trace.retrieval.documents.len(), 3);
	assert_eq!(trace.context.total_chunks, 1);
	assert_eq!(trace.context.total_chars, 20);

	let seen = contexts.lock().expect("Context log poisoned.");

	assert_eq!(seen.len(), 1);
	assert!(seen[0].contains(&"x".repeat(20)));
	assert!(!seen[0].contains(&"x".repeat(25)));
}

#[tokio::test]
async fn generation_receives_the_full_context_not_the_preview() {
	let contexts = Arc::new(Mutex::new(Vec::new()));
	let service = budgeted_service(
		vec![sized_candidate("a", "guide.pdf", 0.9, 300)],
		10_000,
		10,
		contexts.clone(),
	);
	let response = service.answer(traced_request("ferritin")).await.expect("answer failed");
	let trace = response.pipeline.expect("Expected a pipeline trace.");

	assert!(trace.context.preview.ends_with("..."));

	let seen = contexts.lock().expect("Context log poisoned.");

	assert!(seen[0].len() > trace.context.preview.len());
	assert!(seen[0].contains(&"x".repeat(300)));
}

#[tokio::test]
async fn sources_follow_rank_order_and_deduplicate() {
	let contexts = Arc::new(Mutex::new(Vec::new()));
	let service = budgeted_service(
		vec![
			sized_candidate("a", "reference_ranges.csv", 0.9, 10),
			sized_candidate("b", "guide.pdf", 0.8, 10),
			sized_candidate("c", "reference_ranges.csv", 0.7, 10),
		],
		10_000,
		200,
		contexts,
	);
	let response = service.answer(traced_request("ferritin")).await.expect("answer failed");

	assert_eq!(response.sources, vec!["reference_ranges.csv", "guide.pdf"]);
}
