mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, ContextBudget, GenerationProviderConfig, Pipeline, Providers, Ranking, Retrieval,
	SearchProviderConfig, Service,
};

use std::{fs, path::Path};

pub const WEIGHT_SUM_TOLERANCE: f32 = 1e-6;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, weight) in [
		("ranking.semantic_weight", cfg.ranking.semantic_weight),
		("ranking.keyword_weight", cfg.ranking.keyword_weight),
		("ranking.source_weight", cfg.ranking.source_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	let weight_sum =
		cfg.ranking.semantic_weight + cfg.ranking.keyword_weight + cfg.ranking.source_weight;

	if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
		return Err(Error::Validation {
			message: format!("ranking weights must sum to 1.0, got {weight_sum}."),
		});
	}

	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.context.max_chars == 0 {
		return Err(Error::Validation {
			message: "context.max_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.context.preview_chars == 0 {
		return Err(Error::Validation {
			message: "context.preview_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.pipeline.deadline_ms == 0 {
		return Err(Error::Validation {
			message: "pipeline.deadline_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.generation.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.generation.model must be non-empty.".to_string(),
		});
	}

	for (label, provider_timeout) in [
		("search", cfg.providers.search.timeout_ms),
		("generation", cfg.providers.generation.timeout_ms),
	] {
		if provider_timeout == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}

	for (label, base) in [
		("search", &cfg.providers.search.api_base),
		("generation", &cfg.providers.generation.api_base),
	] {
		if base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_base must be non-empty."),
			});
		}
	}

	for (label, key) in [
		("search", &cfg.providers.search.api_key),
		("generation", &cfg.providers.generation.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.providers
		.generation
		.system_instruction
		.as_deref()
		.map(|instruction| instruction.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.generation.system_instruction = None;
	}
}
