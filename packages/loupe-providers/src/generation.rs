use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use loupe_config::GenerationProviderConfig;

#[derive(Debug, Clone)]
pub struct GenerationReply {
	pub text: String,
	pub token_count: Option<u64>,
}

pub async fn generate(
	cfg: &GenerationProviderConfig,
	query: &str,
	context: &str,
) -> Result<GenerationReply> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut body = serde_json::json!({
		"model": cfg.model,
		"prompt": build_prompt(query, context),
		"temperature": cfg.temperature,
		"max_output_tokens": cfg.max_output_tokens,
	});

	if let Some(instruction) = cfg.system_instruction.as_deref() {
		body["system_instruction"] = Value::String(instruction.to_string());
	}

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_generation_response(json)
}

fn build_prompt(query: &str, context: &str) -> String {
	format!(
		"\
Based on the following reference information, answer the user's question.

Reference Information:
{context}

User Question: {query}
"
	)
}

fn parse_generation_response(json: Value) -> Result<GenerationReply> {
	let text = json
		.get("text")
		.or_else(|| json.get("response"))
		.and_then(|v| v.as_str())
		.ok_or_else(|| eyre::eyre!("Generation response is missing text."))?;

	if text.trim().is_empty() {
		return Err(eyre::eyre!("Generation response text is empty."));
	}

	let token_count =
		json.get("usage").and_then(|usage| usage.get("total_tokens")).and_then(|v| v.as_u64());

	Ok(GenerationReply { text: text.to_string(), token_count })
}
