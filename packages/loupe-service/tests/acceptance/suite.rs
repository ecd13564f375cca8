use std::sync::Arc;

use loupe_domain::fusion::CandidateDocument;
use loupe_service::{AnswerRequest, GenerationProvider, LoupeService, Providers, SearchProvider};
use loupe_testkit::{StaticGeneration, StaticSearch, test_config};

pub fn service_with(
	search: Arc<dyn SearchProvider>,
	generation: Arc<dyn GenerationProvider>,
) -> LoupeService {
	LoupeService::with_providers(test_config(), Providers::new(search, generation))
}

pub fn static_service(candidates: Vec<CandidateDocument>) -> LoupeService {
	service_with(
		Arc::new(StaticSearch { candidates }),
		Arc::new(StaticGeneration { text: "Grounded answer.".to_string(), token_count: Some(42) }),
	)
}

pub fn traced_request(query: &str) -> AnswerRequest {
	AnswerRequest {
		query: query.to_string(),
		top_k: None,
		score_weights: None,
		deadline_ms: None,
		include_trace: true,
	}
}

pub fn plain_request(query: &str) -> AnswerRequest {
	AnswerRequest { include_trace: false, ..traced_request(query) }
}
