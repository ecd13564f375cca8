use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use loupe_config::SearchProviderConfig;
use loupe_domain::fusion::CandidateDocument;

pub async fn search(
	cfg: &SearchProviderConfig,
	query: &str,
	top_k: u32,
) -> Result<Vec<CandidateDocument>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "query": query, "top_k": top_k });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn parse_search_response(json: Value) -> Result<Vec<CandidateDocument>> {
	let documents = json
		.get("documents")
		.or_else(|| json.get("results"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Search response is missing documents array."))?;
	let mut out = Vec::with_capacity(documents.len());

	for (fallback_index, item) in documents.iter().enumerate() {
		let id = item
			.get("id")
			.and_then(|v| v.as_str())
			.map(str::to_string)
			.unwrap_or_else(|| format!("doc_{fallback_index}"));
		let content = item
			.get("content")
			.and_then(|v| v.as_str())
			.ok_or_else(|| eyre::eyre!("Search document {id:?} is missing content."))?
			.to_string();
		let source = item.get("source").and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
		let page = item.get("page").and_then(|v| v.as_u64()).map(|v| v as u32);
		let semantic_score = required_score(item, "semantic_score", &id)?;
		let keyword_score = required_score(item, "keyword_score", &id)?;
		let source_boost = required_score(item, "source_boost", &id)?;

		out.push(CandidateDocument {
			id,
			content,
			source,
			page,
			semantic_score,
			keyword_score,
			source_boost,
		});
	}

	Ok(out)
}

fn required_score(item: &Value, field: &str, id: &str) -> Result<f32> {
	item.get(field)
		.and_then(|v| v.as_f64())
		.map(|v| v as f32)
		.ok_or_else(|| eyre::eyre!("Search document {id:?} is missing {field}."))
}
