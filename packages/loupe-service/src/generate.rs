use std::time::Instant;

use crate::{Error, LoupeService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenerationStage {
	pub model: String,
	pub timing_ms: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tokens_estimate: Option<u64>,
}

pub(crate) struct GenerationOutcome {
	pub(crate) stage: GenerationStage,
	pub(crate) text: String,
}

impl LoupeService {
	/// Opaque call to the generation backend, wrapped with timing and token
	/// accounting. Retry policy belongs to the backend, not this layer.
	pub(crate) async fn generate_stage(
		&self,
		query: &str,
		context: &str,
	) -> Result<GenerationOutcome> {
		let started = Instant::now();
		let reply = self
			.providers
			.generation
			.generate(&self.cfg.providers.generation, query, context)
			.await
			.map_err(|err| {
				tracing::warn!(error = %err, "Generation backend failed.");

				Error::Generation { message: err.to_string() }
			})?;
		let timing_ms = started.elapsed().as_millis() as u64;

		tracing::debug!(timing_ms, tokens = ?reply.token_count, "Generation stage completed.");

		Ok(GenerationOutcome {
			stage: GenerationStage {
				model: self.cfg.providers.generation.model.clone(),
				timing_ms,
				tokens_estimate: reply.token_count,
			},
			text: reply.text,
		})
	}
}
