//! Exchanges credentials for a new access token at the OAuth refresh endpoint.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials},
	error::AuthenticationError,
	http::{HttpRequest, Transport},
	request::{self, CONTENT_TYPE_HEADER},
	response::ParsedResponse,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Mints access tokens via `grant_type=refresh_token`.
///
/// The authenticator never retries; a failed renewal is fatal for the call chain that asked
/// for it, and retry policy belongs to the session.
pub struct Authenticator<C>
where
	C: ?Sized + Transport,
{
	transport: Arc<C>,
	token_url: Url,
}
impl<C> Authenticator<C>
where
	C: ?Sized + Transport,
{
	/// Creates an authenticator that posts to `token_url`.
	pub fn new(transport: impl Into<Arc<C>>, token_url: Url) -> Self {
		Self { transport: transport.into(), token_url }
	}

	/// Transport used for token requests.
	pub fn transport(&self) -> Arc<C> {
		self.transport.clone()
	}

	/// Token endpoint this authenticator posts to.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Posts the refresh grant and extracts `access_token` from the JSON reply.
	pub async fn renew(&self, credentials: &Credentials) -> Result<AccessToken> {
		// Form headers replace the executor defaults; no access token is sent.
		let request = HttpRequest::post(self.token_url.clone(), credentials.refresh_form())
			.with_header(CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE);
		let response = request::dispatch(self.transport.as_ref(), request).await?;

		extract_access_token(response)
	}
}
impl<C> Debug for Authenticator<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator").field("token_url", &self.token_url.as_str()).finish()
	}
}

fn extract_access_token(response: ParsedResponse) -> Result<AccessToken> {
	let ParsedResponse::Object(body) = response else {
		return Err(AuthenticationError::UnexpectedResponse { found: response.kind() }.into());
	};
	let value = body
		.get("access_token")
		.and_then(Value::as_str)
		.filter(|value| !value.is_empty())
		.ok_or(AuthenticationError::MissingAccessToken)?;
	let token = AccessToken::new(value);

	Ok(match body.get("expires_in").and_then(Value::as_i64) {
		Some(secs) if secs > 0 => token.with_expires_in(Duration::seconds(secs)),
		_ => token,
	})
}
