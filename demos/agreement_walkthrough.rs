//! Walks a widget down to its signed PDF against a local mock of the Adobe Sign API.
//!
//! 1. Start an `httpmock` server that answers the OAuth refresh grant and the REST v5 routes.
//! 2. Connect a [`Client`] with [`ClientConfig`] pointed at the mock roots.
//! 3. Traverse widget -> agreements -> documents -> PDF, then read the CSV form data.
//! 4. Expire the access token server-side and watch the next call renew it transparently.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use adobe_sign::{
	auth::Credentials,
	client::Client,
	config::ClientConfig,
	endpoint::Endpoints,
	response::ParsedResponse,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let mut first_token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/refresh");
			then.status(200).json_body(json!({ "access_token": "demo-t1", "expires_in": 3600 }));
		})
		.await;

	mock_api(&server).await;

	let endpoints = Endpoints::parse(&server.url("/api/rest/v5"), &server.base_url())?;
	let config = ClientConfig::new(Credentials::new("demo-id", "demo-secret", "demo-refresh"))?
		.with_endpoints(endpoints);
	let client = Client::connect(config).await?;

	for widget in client.widgets().await? {
		println!("Widget {} ({}).", widget.id(), widget.record().name.as_deref().unwrap_or("-"));

		for agreement in widget.agreements().await? {
			println!(
				"  Agreement {} is {}.",
				agreement.id(),
				agreement.record().status.as_deref().unwrap_or("UNKNOWN")
			);

			for document in agreement.documents().await? {
				let bytes = document.file().await?;

				println!("    Document {} downloaded: {} bytes.", document.id(), bytes.len());
			}

			if let ParsedResponse::Table(table) = agreement.form_data().await? {
				for record in table.records() {
					println!("    Form data: {record:?}.");
				}
			}
		}
	}

	// Rotate the token server-side; the next call is rejected once, then replayed with demo-t2.
	first_token.delete_async().await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/refresh");
			then.status(200).json_body(json!({ "access_token": "demo-t2", "expires_in": 3600 }));
		})
		.await;

	let agreement = client.agreement("agr-2").await?;

	println!(
		"Fetched {} after renewal; signing URL: {}.",
		agreement.id(),
		agreement.latest_esign_url().await?.unwrap_or("none")
	);

	Ok(())
}

async fn mock_api(server: &MockServer) {
	let api = |path: &str| format!("/api/rest/v5{path}");

	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/widgets"));
			then.status(200)
				.json_body(json!({ "userWidgetList": { "widgetId": "wid-1", "name": "Intake form" } }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/widgets/wid-1/agreements"));
			then.status(200).json_body(json!({
				"userAgreementList": [{ "agreementId": "agr-1", "status": "SIGNED", "esign": true }]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/agr-1/documents"));
			then.status(200).json_body(json!({
				"documents": [{ "documentId": "doc-1", "mimeType": "application/pdf", "name": "intake.pdf" }]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/agr-1/documents/doc-1/url"));
			then.status(200).json_body(json!({ "url": server.url("/downloads/intake.pdf") }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/downloads/intake.pdf");
			then.status(200).body("%PDF-1.4 demo");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/agr-1/formData"));
			then.status(200).body("email,plan\nada@example.com,enterprise\n");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/agr-2")).header("access-token", "demo-t1");
			then.status(401).json_body(json!({ "code": "INVALID_ACCESS_TOKEN", "message": "expired" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/agr-2")).header("access-token", "demo-t2");
			then.status(200).json_body(json!({ "agreementId": "agr-2", "status": "OUT_FOR_SIGNATURE" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/agr-2/signingUrls"));
			then.status(200).json_body(json!({
				"signingUrlSetInfos": [{
					"signingUrls": [{ "email": "ada@example.com", "esignUrl": "https://sign.example.com/agr-2" }]
				}]
			}));
		})
		.await;
}
