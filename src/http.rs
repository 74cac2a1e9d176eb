//! Transport primitives for Adobe Sign API calls.
//!
//! The module exposes [`Transport`] alongside the plain [`HttpRequest`] and [`HttpReply`]
//! values so downstream crates can integrate custom HTTP stacks. Implementations report
//! non-success statuses as [`TransportError::Status`] with the raw body attached, which is
//! what the request layer needs to classify upstream error codes.

// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`Transport::call`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing a single request.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so they can be shared behind an [`Arc`] by the session, the
/// authenticator, and every request executor without additional wrappers.
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Performs `request` and resolves with the reply for any 2xx status.
	///
	/// Any other status must be reported as [`TransportError::Status`] carrying the raw body.
	fn call(&self, request: HttpRequest) -> TransportFuture<'_, HttpReply>;
}

/// HTTP methods used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
}
impl HttpMethod {
	/// Returns the method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute request URL.
	pub url: Url,
	/// Header name/value pairs.
	pub headers: BTreeMap<String, String>,
	/// Request body, if any.
	pub body: Option<String>,
}
impl HttpRequest {
	/// Creates a `GET` request without headers.
	pub fn get(url: Url) -> Self {
		Self { method: HttpMethod::Get, url, headers: BTreeMap::new(), body: None }
	}

	/// Creates a `POST` request carrying `body`.
	pub fn post(url: Url, body: impl Into<String>) -> Self {
		Self { method: HttpMethod::Post, url, headers: BTreeMap::new(), body: Some(body.into()) }
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Replaces every header at once.
	pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
		self.headers = headers;

		self
	}

	/// Returns a header value by exact name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}
}

/// Successful reply returned by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpReply {
	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn call(&self, request: HttpRequest) -> TransportFuture<'_, HttpReply> {
		Box::pin(async move {
			let HttpRequest { method, url, headers, body } = request;
			let mut builder = match method {
				HttpMethod::Get => self.0.get(url),
				HttpMethod::Post => self.0.post(url),
			};

			for (name, value) in &headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let body = response.bytes().await?.to_vec();

			if !status.is_success() {
				return Err(TransportError::Status {
					status: status.as_u16(),
					body: String::from_utf8_lossy(&body).into_owned(),
				});
			}

			Ok(HttpReply { status: status.as_u16(), body })
		})
	}
}
