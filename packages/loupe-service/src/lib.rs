pub mod answer;
pub mod context;
mod error;
pub mod generate;
pub mod retrieve;
pub mod time_serde;

use std::{future::Future, pin::Pin, sync::Arc};

pub use answer::{AnswerRequest, AnswerResponse, PipelineTrace};
pub use context::ContextStage;
pub use error::{Error, Result};
pub use generate::GenerationStage;
pub use retrieve::RetrievalStage;

use loupe_config::{Config, GenerationProviderConfig, SearchProviderConfig};
use loupe_domain::fusion::CandidateDocument;
pub use loupe_providers::generation::GenerationReply;
use loupe_providers::{generation, search};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a SearchProviderConfig,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CandidateDocument>>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		query: &'a str,
		context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<GenerationReply>>;
}

#[derive(Clone)]
pub struct Providers {
	pub search: Arc<dyn SearchProvider>,
	pub generation: Arc<dyn GenerationProvider>,
}

pub struct LoupeService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl SearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a SearchProviderConfig,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CandidateDocument>>> {
		Box::pin(search::search(cfg, query, top_k))
	}
}

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		query: &'a str,
		context: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<GenerationReply>> {
		Box::pin(generation::generate(cfg, query, context))
	}
}

impl Providers {
	pub fn new(search: Arc<dyn SearchProvider>, generation: Arc<dyn GenerationProvider>) -> Self {
		Self { search, generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { search: provider.clone(), generation: provider }
	}
}

impl LoupeService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
