mod error;

pub use error::{Error, Result};

use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use serde_json::Map;

use loupe_config::{
	Config, ContextBudget, GenerationProviderConfig, Pipeline, Ranking, Retrieval,
	SearchProviderConfig, Service,
};
use loupe_domain::fusion::CandidateDocument;
use loupe_service::{BoxFuture, GenerationProvider, GenerationReply, SearchProvider};

pub struct StaticSearch {
	pub candidates: Vec<CandidateDocument>,
}
impl SearchProvider for StaticSearch {
	fn search<'a>(
		&'a self,
		_cfg: &'a SearchProviderConfig,
		_query: &'a str,
		_top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CandidateDocument>>> {
		let candidates = self.candidates.clone();

		Box::pin(async move { Ok(candidates) })
	}
}

pub struct FailingSearch {
	pub message: String,
}
impl SearchProvider for FailingSearch {
	fn search<'a>(
		&'a self,
		_cfg: &'a SearchProviderConfig,
		_query: &'a str,
		_top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CandidateDocument>>> {
		let message = self.message.clone();

		Box::pin(async move { Err(color_eyre::eyre::eyre!(message)) })
	}
}

pub struct SlowSearch {
	pub delay: Duration,
	pub candidates: Vec<CandidateDocument>,
}
impl SearchProvider for SlowSearch {
	fn search<'a>(
		&'a self,
		_cfg: &'a SearchProviderConfig,
		_query: &'a str,
		_top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CandidateDocument>>> {
		let delay = self.delay;
		let candidates = self.candidates.clone();

		Box::pin(async move {
			tokio::time::sleep(delay).await;

			Ok(candidates)
		})
	}
}

pub struct StaticGeneration {
	pub text: String,
	pub token_count: Option<u64>,
}
impl GenerationProvider for StaticGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a GenerationProviderConfig,
		_query: &'a str,
		_context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<GenerationReply>> {
		let reply = GenerationReply { text: self.text.clone(), token_count: self.token_count };

		Box::pin(async move { Ok(reply) })
	}
}

/// Like [`StaticGeneration`], but records the context each call receives.
pub struct SpyGeneration {
	pub text: String,
	pub contexts: Arc<Mutex<Vec<String>>>,
}
impl GenerationProvider for SpyGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a GenerationProviderConfig,
		_query: &'a str,
		context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<GenerationReply>> {
		self.contexts.lock().unwrap_or_else(|err| err.into_inner()).push(context.to_string());

		let reply = GenerationReply { text: self.text.clone(), token_count: None };

		Box::pin(async move { Ok(reply) })
	}
}

pub struct FailingGeneration {
	pub message: String,
}
impl GenerationProvider for FailingGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a GenerationProviderConfig,
		_query: &'a str,
		_context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<GenerationReply>> {
		let message = self.message.clone();

		Box::pin(async move { Err(color_eyre::eyre::eyre!(message)) })
	}
}

pub struct SlowGeneration {
	pub delay: Duration,
	pub text: String,
}
impl GenerationProvider for SlowGeneration {
	fn generate<'a>(
		&'a self,
		_cfg: &'a GenerationProviderConfig,
		_query: &'a str,
		_context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<GenerationReply>> {
		let delay = self.delay;
		let text = self.text.clone();

		Box::pin(async move {
			tokio::time::sleep(delay).await;

			Ok(GenerationReply { text, token_count: None })
		})
	}
}

pub fn test_config() -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		providers: loupe_config::Providers {
			search: dummy_search_provider(),
			generation: dummy_generation_provider(),
		},
		retrieval: Retrieval { top_k: 5 },
		ranking: Ranking::default(),
		context: ContextBudget { max_chars: 12_000, preview_chars: 200 },
		pipeline: Pipeline { deadline_ms: 30_000 },
	}
}

pub fn dummy_search_provider() -> SearchProviderConfig {
	SearchProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/".to_string(),
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

pub fn dummy_generation_provider() -> GenerationProviderConfig {
	GenerationProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/".to_string(),
		model: "test-model".to_string(),
		temperature: 0.1,
		max_output_tokens: 256,
		system_instruction: None,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

pub fn candidate(
	id: &str,
	source: &str,
	semantic: f32,
	keyword: f32,
	boost: f32,
) -> CandidateDocument {
	CandidateDocument {
		id: id.to_string(),
		content: format!("Content for {id}."),
		source: source.to_string(),
		page: None,
		semantic_score: semantic,
		keyword_score: keyword,
		source_boost: boost,
	}
}

pub fn init_tracing() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init()
		.map_err(|err| Error::Message(format!("Failed to install tracing subscriber: {err}.")))
}
