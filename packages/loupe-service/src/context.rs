use unicode_segmentation::UnicodeSegmentation;

use loupe_domain::fusion::RankedDocument;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContextStage {
	pub total_chunks: u32,
	pub total_chars: u64,
	pub sources: Vec<String>,
	pub preview: String,
}

pub(crate) struct AssembledContext {
	pub(crate) stage: ContextStage,
	pub(crate) text: String,
}

/// Concatenates documents in rank order under a first-fit character budget:
/// the first document whose content would exceed the remaining budget stops
/// assembly, so relevance order always wins over packing density.
pub(crate) fn assemble(
	documents: &[RankedDocument],
	max_chars: u64,
	preview_chars: u32,
) -> AssembledContext {
	let mut parts = Vec::new();
	let mut sources: Vec<String> = Vec::new();
	let mut total_chunks = 0_u32;
	let mut total_chars = 0_u64;

	for document in documents {
		let content_chars = document.content.chars().count() as u64;

		if total_chars + content_chars > max_chars {
			break;
		}

		if !sources.iter().any(|source| source == &document.source) {
			sources.push(document.source.clone());
		}

		parts.push(provenance_block(document));

		total_chunks += 1;
		total_chars += content_chars;
	}

	let text = parts.join("\n\n");
	let preview = truncate_preview(&text, preview_chars as usize);

	AssembledContext { stage: ContextStage { total_chunks, total_chars, sources, preview }, text }
}

fn provenance_block(document: &RankedDocument) -> String {
	match document.page {
		Some(page) => format!("[Source: {} page {page}]\n{}", document.source, document.content),
		None => format!("[Source: {}]\n{}", document.source, document.content),
	}
}

// Display-only truncation; generation always receives the full text.
fn truncate_preview(text: &str, max_graphemes: usize) -> String {
	let mut cut = text.len();

	for (count, (offset, _)) in text.grapheme_indices(true).enumerate() {
		if count == max_graphemes {
			cut = offset;

			break;
		}
	}

	if cut == text.len() {
		return text.to_string();
	}

	format!("{}...", &text[..cut])
}
