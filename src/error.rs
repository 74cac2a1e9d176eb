//! Client-level error types shared across the transport, session, and resource layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure that could not be classified; propagated unchanged.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Access token renewal failed; aborts the in-progress retry sequence.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Upstream rejected a request with a structured error body.
	#[error(transparent)]
	RequestFailure(#[from] RequestFailure),

	/// Upstream reported that the bound access token is no longer valid.
	#[error("Access token was rejected by the API ({code}).")]
	InvalidAccessToken {
		/// Upstream sentinel code.
		code: String,
	},
	/// Every attempt allowed for one logical call failed with an invalid access token.
	#[error("Access token renewal did not recover the call after {attempts} attempts.")]
	RetriesExhausted {
		/// Attempts made before giving up.
		attempts: u32,
		/// Failure observed on the final attempt.
		#[source]
		source: Box<Error>,
	},
	/// Response JSON did not match the expected record shape.
	#[error("Response JSON does not match the expected shape.")]
	Decode {
		/// Structured parsing failure carrying the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Download URL returned by the API cannot be parsed.
	#[error("Download URL `{value}` is invalid.")]
	InvalidDownloadUrl {
		/// Raw URL string.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Response parsed, but into a different shape than the caller needs.
	#[error("Expected a {expected} response but received {found}.")]
	UnexpectedResponse {
		/// Shape the caller required.
		expected: &'static str,
		/// Shape that was actually parsed.
		found: &'static str,
	},
}
impl Error {
	/// Returns `true` when the error is the upstream invalid-access-token signal.
	pub fn is_invalid_access_token(&self) -> bool {
		matches!(self, Self::InvalidAccessToken { .. })
	}

	/// Returns the structured upstream failure, if this error carries one.
	pub fn as_request_failure(&self) -> Option<&RequestFailure> {
		match self {
			Self::RequestFailure(failure) => Some(failure),
			_ => None,
		}
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
	fn from(source: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Decode { source }
	}
}

/// Immutable record of a request the API rejected with a structured error body.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Request failed with HTTP {status}: {}.", describe(.code, .message))]
pub struct RequestFailure {
	/// HTTP status code returned by the API.
	pub status: u16,
	/// Upstream error code (e.g. `MISC_SERVER_ERROR`).
	pub code: Option<String>,
	/// Upstream human-readable message.
	pub message: Option<String>,
}

fn describe(code: &Option<String>, message: &Option<String>) -> String {
	match (code, message) {
		(Some(code), Some(message)) => format!("{code} ({message})"),
		(Some(code), None) => code.clone(),
		(None, Some(message)) => message.clone(),
		(None, None) => "no error details".into(),
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is unset or empty.
	#[error("Environment variable `{var}` is not set.")]
	MissingEnv {
		/// Variable name.
		var: &'static str,
	},
	/// Configured root URL cannot be parsed.
	#[error("Configured URL `{value}` is invalid.")]
	InvalidUrl {
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configured root URL cannot carry path segments.
	#[error("Configured URL `{value}` cannot be used as a base URL.")]
	CannotBeABase {
		/// Offending URL.
		value: String,
	},
}

/// Failures raised while minting a new access token.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint answered without an `access_token` field.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// Token endpoint answered with something other than a JSON object.
	#[error("Token endpoint returned a {found} response instead of a JSON object.")]
	UnexpectedResponse {
		/// Shape that was actually parsed.
		found: &'static str,
	},
}

/// Transport-level failures (HTTP status, network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Server answered with a non-success status.
	#[error("HTTP {status} returned by the API.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status code, when the failure carries one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
