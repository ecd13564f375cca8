use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Relative weights of the three relevance signals. Must be non-negative and
/// sum to 1.0 within [`loupe_config::WEIGHT_SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
	pub semantic: f32,
	pub keyword: f32,
	pub source: f32,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct InvalidWeights {
	pub message: String,
}

/// A raw candidate as returned by the search backend, before fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDocument {
	pub id: String,
	pub content: String,
	pub source: String,
	pub page: Option<u32>,
	pub semantic_score: f32,
	pub keyword_score: f32,
	pub source_boost: f32,
}

/// A candidate after fusion. Ranks within one retrieval are the contiguous
/// sequence 1..=N with ties broken by original retrieval order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDocument {
	pub id: String,
	pub content: String,
	pub source: String,
	pub page: Option<u32>,
	pub semantic_score: f32,
	pub keyword_score: f32,
	pub source_boost: f32,
	pub combined_score: f32,
	pub rank: u32,
}

impl ScoreWeights {
	pub fn validate(&self) -> Result<(), InvalidWeights> {
		for (label, weight) in
			[("semantic", self.semantic), ("keyword", self.keyword), ("source", self.source)]
		{
			if !weight.is_finite() {
				return Err(InvalidWeights {
					message: format!("Score weight {label} must be a finite number."),
				});
			}
			if weight < 0.0 {
				return Err(InvalidWeights {
					message: format!("Score weight {label} must be zero or greater."),
				});
			}
		}

		let sum = self.semantic + self.keyword + self.source;

		if (sum - 1.0).abs() > loupe_config::WEIGHT_SUM_TOLERANCE {
			return Err(InvalidWeights {
				message: format!("Score weights must sum to 1.0, got {sum}."),
			});
		}

		Ok(())
	}
}
impl Default for ScoreWeights {
	fn default() -> Self {
		Self { semantic: 0.6, keyword: 0.2, source: 0.2 }
	}
}
impl From<&loupe_config::Ranking> for ScoreWeights {
	fn from(ranking: &loupe_config::Ranking) -> Self {
		Self {
			semantic: ranking.semantic_weight,
			keyword: ranking.keyword_weight,
			source: ranking.source_weight,
		}
	}
}

pub fn fuse(
	weights: &ScoreWeights,
	semantic_score: f32,
	keyword_score: f32,
	source_boost: f32,
) -> f32 {
	weights.semantic * semantic_score
		+ weights.keyword * keyword_score
		+ weights.source * source_boost
}

/// Scores, sorts, and truncates candidates in one pass. The sort is stable, so
/// equal combined scores keep their retrieval order.
pub fn rank_documents(
	candidates: Vec<CandidateDocument>,
	weights: &ScoreWeights,
	top_k: u32,
) -> Vec<RankedDocument> {
	let mut scored: Vec<(f32, CandidateDocument)> = candidates
		.into_iter()
		.map(|candidate| {
			let combined_score = fuse(
				weights,
				candidate.semantic_score,
				candidate.keyword_score,
				candidate.source_boost,
			);

			(combined_score, candidate)
		})
		.collect();

	scored.sort_by(|left, right| cmp_f32_desc(left.0, right.0));

	scored
		.into_iter()
		.take(top_k as usize)
		.enumerate()
		.map(|(idx, (combined_score, candidate))| RankedDocument {
			id: candidate.id,
			content: candidate.content,
			source: candidate.source,
			page: candidate.page,
			semantic_score: candidate.semantic_score,
			keyword_score: candidate.keyword_score,
			source_boost: candidate.source_boost,
			combined_score,
			rank: idx as u32 + 1,
		})
		.collect()
}

/// Descending comparator that sinks NaN to the tail so malformed scores can
/// never float to the top.
pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
