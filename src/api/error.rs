use thiserror::Error;

/// Why a gateway call produced no record.
///
/// Kept `Clone + PartialEq` so failures can sit inside query snapshots. The variants
/// only matter for logs: every one of them becomes a failed fetch result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The server answered 404.
	#[error("nothing at {url}")]
	NotFound {
		/// Requested URL.
		url: String,
	},
	/// Network failure or any other non-success status.
	#[error("transport error: {0}")]
	Transport(String),
	/// The body was not the expected JSON.
	#[error("malformed payload: {0}")]
	Decode(String),
}

impl From<reqwest::Error> for FetchError {
	fn from(err: reqwest::Error) -> Self {
		FetchError::Transport(err.to_string())
	}
}

impl From<serde_json::Error> for FetchError {
	fn from(err: serde_json::Error) -> Self {
		FetchError::Decode(err.to_string())
	}
}
