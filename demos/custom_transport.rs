//! Demonstrates plugging a non-reqwest HTTP stack into the client.
//!
//! 1. Implement [`Transport`] and report non-success statuses as [`TransportError::Status`] so
//!    the client can classify upstream error codes.
//! 2. Wrap the transport in `Arc` and pass it to [`Client::connect_with_transport`].
//! 3. Observe that an expired token is renewed through the same transport.

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use color_eyre::Result;
// self
use adobe_sign::{
	auth::Credentials,
	client::Client,
	endpoint::Endpoints,
	error::TransportError,
	http::{HttpMethod, HttpReply, HttpRequest, Transport, TransportFuture},
	request::ACCESS_TOKEN_HEADER,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let transport = Arc::new(InMemoryTransport::default());
	let endpoints = Endpoints::parse("https://api.test/api/rest/v5", "https://auth.test")?;
	let client: Client<InMemoryTransport> = Client::connect_with_transport(
		Credentials::new("demo-id", "demo-secret", "demo-refresh"),
		endpoints,
		Arc::clone(&transport),
	)
	.await?;
	let templates = client.library_documents().await?;

	for template in &templates {
		println!(
			"Template {} ({}).",
			template.library_document_id,
			template.name.as_deref().unwrap_or("-")
		);
	}

	println!(
		"Tokens minted by the in-memory transport: {}.",
		transport.minted.load(Ordering::SeqCst)
	);

	Ok(())
}

/// Answers the refresh grant with sequential tokens and rejects the first token on REST calls.
#[derive(Debug, Default)]
struct InMemoryTransport {
	minted: AtomicUsize,
}
impl InMemoryTransport {
	fn route(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
		match (request.method, request.url.path()) {
			(HttpMethod::Post, "/oauth/refresh") => {
				let n = self.minted.fetch_add(1, Ordering::SeqCst) + 1;

				Ok(reply(format!("{{\"access_token\":\"mem-{n}\",\"expires_in\":3600}}")))
			},
			(HttpMethod::Get, "/api/rest/v5/libraryDocuments") =>
				match request.header(ACCESS_TOKEN_HEADER) {
					Some("mem-1") => Err(TransportError::Status {
						status: 401,
						body: "{\"code\":\"INVALID_ACCESS_TOKEN\",\"message\":\"expired\"}".into(),
					}),
					_ => Ok(reply(
						"{\"libraryDocumentList\":[{\"libraryDocumentId\":\"lib-1\",\"name\":\"NDA\"}]}"
							.into(),
					)),
				},
			(_, path) => Err(TransportError::Status {
				status: 404,
				body: format!("{{\"code\":\"NOT_FOUND\",\"message\":\"no route for {path}\"}}"),
			}),
		}
	}
}
impl Transport for InMemoryTransport {
	fn call(&self, request: HttpRequest) -> TransportFuture<'_, HttpReply> {
		let result = self.route(&request);

		Box::pin(async move { result })
	}
}

fn reply(body: String) -> HttpReply {
	HttpReply { status: 200, body: body.into_bytes() }
}
