//! Request executor bound to one access token.
//!
//! Every call composes the same three steps: the [`Transport`] performs the HTTP exchange,
//! failures are translated by [`classify`], and successful bodies are passed through
//! [`normalize`]. Callers therefore see either a [`ParsedResponse`] or one of
//! [`Error::InvalidAccessToken`], [`Error::RequestFailure`], or an unclassified
//! [`Error::Transport`], never a partial result.

pub mod classify;

pub use classify::{INVALID_ACCESS_TOKEN, classify};

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	http::{HttpRequest, Transport},
	response::{ParsedResponse, normalize},
};

/// Header carrying the access token on every authenticated call.
pub const ACCESS_TOKEN_HEADER: &str = "Access-Token";
/// Content type header name.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Issues GET and POST calls with a fixed access token.
///
/// Executors are immutable; the session builds a new one whenever the token is renewed
/// instead of mutating the token in place.
pub struct RequestExecutor<C>
where
	C: ?Sized + Transport,
{
	transport: Arc<C>,
	access_token: AccessToken,
}
impl<C> RequestExecutor<C>
where
	C: ?Sized + Transport,
{
	/// Binds `access_token` to `transport`.
	pub fn new(transport: impl Into<Arc<C>>, access_token: AccessToken) -> Self {
		Self { transport: transport.into(), access_token }
	}

	/// Token attached to every call made through this executor.
	pub fn access_token(&self) -> &AccessToken {
		&self.access_token
	}

	/// Issues a `GET` carrying the access token header.
	pub async fn get(&self, url: &Url) -> Result<ParsedResponse> {
		let request = HttpRequest::get(url.clone())
			.with_header(ACCESS_TOKEN_HEADER, self.access_token.expose());

		dispatch(self.transport.as_ref(), request).await
	}

	/// Issues a JSON `POST` carrying the access token header.
	pub async fn post(&self, url: &Url, body: &Value) -> Result<ParsedResponse> {
		let headers = BTreeMap::from([
			(ACCESS_TOKEN_HEADER.to_owned(), self.access_token.expose().to_owned()),
			(CONTENT_TYPE_HEADER.to_owned(), JSON_CONTENT_TYPE.to_owned()),
		]);

		self.post_with(url, body.to_string(), headers).await
	}

	/// Issues a `POST` whose headers replace the defaults entirely.
	pub async fn post_with(
		&self,
		url: &Url,
		body: impl Into<String>,
		headers: BTreeMap<String, String>,
	) -> Result<ParsedResponse> {
		let request = HttpRequest::post(url.clone(), body).with_headers(headers);

		dispatch(self.transport.as_ref(), request).await
	}
}
impl<C> Debug for RequestExecutor<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestExecutor").field("access_token", &self.access_token).finish()
	}
}

/// Runs `request` through transport, error classification, and normalization.
pub(crate) async fn dispatch<C>(transport: &C, request: HttpRequest) -> Result<ParsedResponse>
where
	C: ?Sized + Transport,
{
	match transport.call(request).await {
		Ok(reply) => Ok(normalize(&reply.text())),
		Err(err) => Err(classify(err)),
	}
}
