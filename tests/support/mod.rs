//! Fixtures shared by the reqwest-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::prelude::*;
// self
use adobe_sign::{
	auth::Credentials,
	client::{Client, ReqwestClient},
	endpoint::Endpoints,
	error::Result,
	http::ReqwestTransport,
	url::Url,
};

pub const REFRESH_PATH: &str = "/oauth/refresh";
pub const API_PREFIX: &str = "/api/rest/v5";
pub const REFRESH_FORM: &str = "grant_type=refresh_token&client_id=client-id&client_secret=client-secret&refresh_token=refresh-token";
pub const INVALID_TOKEN_BODY: &str =
	"{\"code\":\"INVALID_ACCESS_TOKEN\",\"message\":\"Access token provided is invalid or has expired\"}";

pub fn credentials() -> Credentials {
	Credentials::new("client-id", "client-secret", "refresh-token")
}

pub fn endpoints(server: &MockServer) -> Endpoints {
	let api_root =
		Url::parse(&server.url(API_PREFIX)).expect("Mock REST root should parse successfully.");
	let auth_root = Url::parse(&server.base_url()).expect("Mock auth root should parse successfully.");

	Endpoints::new(api_root, auth_root).expect("Mock endpoints should be accepted.")
}

pub fn api(path: &str) -> String {
	format!("{API_PREFIX}{path}")
}

/// Builds a reqwest transport that accepts the self-signed certificates `httpmock` serves.
pub fn transport() -> ReqwestTransport {
	let client = adobe_sign::reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestTransport::with_client(client)
}

pub async fn connect(server: &MockServer) -> Result<ReqwestClient> {
	Client::connect_with_transport(credentials(), endpoints(server), transport()).await
}

/// Registers a token endpoint mock that answers the refresh grant with `token`.
pub async fn mock_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = format!("{{\"access_token\":\"{token}\",\"token_type\":\"Bearer\",\"expires_in\":3600}}");

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(REFRESH_PATH)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(REFRESH_FORM);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}
