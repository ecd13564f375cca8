use std::time::Instant;

use loupe_domain::fusion::{self, RankedDocument, ScoreWeights};

use crate::{Error, LoupeService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RetrievalStage {
	pub query: String,
	pub top_k: u32,
	pub documents: Vec<RankedDocument>,
	pub score_weights: ScoreWeights,
	pub timing_ms: u64,
}

impl LoupeService {
	/// Queries the search backend, fuses the raw signals, and truncates to
	/// `top_k`. Zero candidates is a successful, empty retrieval.
	pub(crate) async fn retrieve_stage(
		&self,
		query: &str,
		top_k: u32,
		weights: ScoreWeights,
	) -> Result<RetrievalStage> {
		let started = Instant::now();
		let candidates = self
			.providers
			.search
			.search(&self.cfg.providers.search, query, top_k)
			.await
			.map_err(|err| {
				tracing::warn!(error = %err, "Search backend failed.");

				Error::Retrieval { message: err.to_string() }
			})?;
		let candidate_count = candidates.len();
		let documents = fusion::rank_documents(candidates, &weights, top_k);
		let timing_ms = started.elapsed().as_millis() as u64;

		tracing::debug!(
			query_chars = query.chars().count(),
			candidates = candidate_count,
			returned = documents.len(),
			timing_ms,
			"Retrieval stage completed."
		);

		Ok(RetrievalStage {
			query: query.to_string(),
			top_k,
			documents,
			score_weights: weights,
			timing_ms,
		})
	}
}
