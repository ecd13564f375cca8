use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	#[serde(default)]
	pub retrieval: Retrieval,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub context: ContextBudget,
	#[serde(default)]
	pub pipeline: Pipeline,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub search: SearchProviderConfig,
	pub generation: GenerationProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	#[serde(default = "default_search_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	#[serde(default = "default_temperature")]
	pub temperature: f32,
	#[serde(default = "default_max_output_tokens")]
	pub max_output_tokens: u32,
	pub system_instruction: Option<String>,
	#[serde(default = "default_generation_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Retrieval {
	#[serde(default = "default_top_k")]
	pub top_k: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self { top_k: default_top_k() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ranking {
	#[serde(default = "default_semantic_weight")]
	pub semantic_weight: f32,
	#[serde(default = "default_keyword_weight")]
	pub keyword_weight: f32,
	#[serde(default = "default_source_weight")]
	pub source_weight: f32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			semantic_weight: default_semantic_weight(),
			keyword_weight: default_keyword_weight(),
			source_weight: default_source_weight(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextBudget {
	#[serde(default = "default_max_chars")]
	pub max_chars: u64,
	#[serde(default = "default_preview_chars")]
	pub preview_chars: u32,
}
impl Default for ContextBudget {
	fn default() -> Self {
		Self { max_chars: default_max_chars(), preview_chars: default_preview_chars() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pipeline {
	#[serde(default = "default_deadline_ms")]
	pub deadline_ms: u64,
}
impl Default for Pipeline {
	fn default() -> Self {
		Self { deadline_ms: default_deadline_ms() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_search_timeout_ms() -> u64 {
	5_000
}

fn default_generation_timeout_ms() -> u64 {
	30_000
}

fn default_temperature() -> f32 {
	0.7
}

fn default_max_output_tokens() -> u32 {
	2_048
}

fn default_top_k() -> u32 {
	5
}

fn default_semantic_weight() -> f32 {
	0.6
}

fn default_keyword_weight() -> f32 {
	0.2
}

fn default_source_weight() -> f32 {
	0.2
}

fn default_max_chars() -> u64 {
	12_000
}

fn default_preview_chars() -> u32 {
	200
}

fn default_deadline_ms() -> u64 {
	30_000
}
