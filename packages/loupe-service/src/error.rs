pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid configuration: {message}")]
	Config { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Retrieval error: {message}")]
	Retrieval { message: String },
	#[error("Generation error: {message}")]
	Generation { message: String },
	#[error("Deadline exceeded during {stage}.")]
	Timeout { stage: String },
}
impl From<loupe_domain::fusion::InvalidWeights> for Error {
	fn from(err: loupe_domain::fusion::InvalidWeights) -> Self {
		Self::Config { message: err.to_string() }
	}
}
