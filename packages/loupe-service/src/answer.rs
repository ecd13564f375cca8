use std::{
	future::Future,
	time::{Duration, Instant},
};

use time::OffsetDateTime;
use uuid::Uuid;

use loupe_domain::fusion::ScoreWeights;

use crate::{ContextStage, Error, GenerationStage, LoupeService, Result, RetrievalStage, context};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerRequest {
	pub query: String,
	#[serde(default)]
	pub top_k: Option<u32>,
	#[serde(default)]
	pub score_weights: Option<ScoreWeights>,
	#[serde(default)]
	pub deadline_ms: Option<u64>,
	#[serde(default)]
	pub include_trace: bool,
}

/// Immutable record of one answered query. Built once, after generation
/// succeeds; a failed invocation never produces one.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineTrace {
	pub trace_id: Uuid,
	pub retrieval: RetrievalStage,
	pub context: ContextStage,
	pub generation: GenerationStage,
	pub total_time_ms: u64,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerResponse {
	pub response: String,
	pub sources: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pipeline: Option<PipelineTrace>,
}

impl LoupeService {
	/// Runs retrieve, assemble, and generate as one linear unit of work under
	/// the request deadline. `total_time_ms` is measured from entry to exit,
	/// not summed from the stage timings.
	pub async fn answer(&self, req: AnswerRequest) -> Result<AnswerResponse> {
		let entered = Instant::now();
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let weights = req.score_weights.unwrap_or_else(|| ScoreWeights::from(&self.cfg.ranking));

		weights.validate()?;

		let top_k = req.top_k.unwrap_or(self.cfg.retrieval.top_k).max(1);
		let deadline_ms = req.deadline_ms.unwrap_or(self.cfg.pipeline.deadline_ms);
		let deadline = entered + Duration::from_millis(deadline_ms);

		let retrieval =
			run_stage("retrieval", deadline, self.retrieve_stage(query, top_k, weights)).await?;
		let assembled = context::assemble(
			&retrieval.documents,
			self.cfg.context.max_chars,
			self.cfg.context.preview_chars,
		);
		let generation =
			run_stage("generation", deadline, self.generate_stage(query, &assembled.text)).await?;

		if !req.include_trace {
			return Ok(AnswerResponse {
				response: generation.text,
				sources: assembled.stage.sources,
				pipeline: None,
			});
		}

		let total_time_ms = entered.elapsed().as_millis() as u64;
		let trace = PipelineTrace {
			trace_id: Uuid::new_v4(),
			retrieval,
			context: assembled.stage,
			generation: generation.stage,
			total_time_ms,
			created_at: OffsetDateTime::now_utc(),
		};

		tracing::info!(trace_id = %trace.trace_id, total_time_ms, "Answer pipeline completed.");

		Ok(AnswerResponse {
			response: generation.text,
			sources: trace.context.sources.clone(),
			pipeline: Some(trace),
		})
	}
}

async fn run_stage<T>(
	stage: &str,
	deadline: Instant,
	fut: impl Future<Output = Result<T>>,
) -> Result<T> {
	let remaining = deadline.saturating_duration_since(Instant::now());

	if remaining.is_zero() {
		return Err(Error::Timeout { stage: stage.to_string() });
	}

	match tokio::time::timeout(remaining, fut).await {
		Ok(result) => result,
		Err(_) => Err(Error::Timeout { stage: stage.to_string() }),
	}
}
