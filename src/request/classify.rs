//! Translates transport failures into the client's error taxonomy.

// self
use crate::{
	_prelude::*,
	error::{RequestFailure, TransportError},
};

/// Upstream error code signalling an expired or revoked access token.
pub const INVALID_ACCESS_TOKEN: &str = "INVALID_ACCESS_TOKEN";

/// Classifies a failed call. Pure; performs no I/O.
///
/// Only [`TransportError::Status`] failures whose body is a JSON object are classified:
/// `code == INVALID_ACCESS_TOKEN` becomes [`Error::InvalidAccessToken`] and any other body
/// becomes [`Error::RequestFailure`]. Everything else is returned unchanged as
/// [`Error::Transport`] because no structured code can be extracted.
pub fn classify(err: TransportError) -> Error {
	let TransportError::Status { status, body } = &err else {
		return err.into();
	};
	let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
		return err.into();
	};
	let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
	// The OAuth endpoint reports `error`/`error_description` instead of `code`/`message`.
	let code = text("code").or_else(|| text("error"));
	let message = text("message").or_else(|| text("error_description"));

	if code.as_deref() == Some(INVALID_ACCESS_TOKEN) {
		return Error::InvalidAccessToken { code: INVALID_ACCESS_TOKEN.into() };
	}

	RequestFailure { status: *status, code, message }.into()
}
