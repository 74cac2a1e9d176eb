mod support;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use adobe_sign::{error::Error, resource::AgreementDraft, response::ParsedResponse};
use support::*;

#[tokio::test]
async fn connect_mints_token_and_sends_it_on_every_call() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "t1").await;
	let widgets = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/widgets")).header("access-token", "t1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"userWidgetList\":{\"widgetId\":\"w-1\",\"name\":\"Intake\",\"status\":\"ACTIVE\"}}");
		})
		.await;
	let client = connect(&server).await.expect("Client should connect against the mock server.");
	let list = client.widgets().await.expect("Widget listing should succeed.");

	// A single widget arrives as a bare object and is still returned as a list.
	assert_eq!(list.len(), 1);
	assert_eq!(list[0].id(), "w-1");
	assert_eq!(list[0].record().status.as_deref(), Some("ACTIVE"));

	token.assert_calls_async(1).await;
	widgets.assert_calls_async(1).await;
}

#[tokio::test]
async fn widget_agreements_are_fetched_once() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t1").await;
	let _widget = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/widgets/w-1"));
			then.status(200).json_body(json!({ "widgetId": "w-1", "name": "Intake" }));
		})
		.await;
	let agreements = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/widgets/w-1/agreements"));
			then.status(200).json_body(json!({
				"userAgreementList": [
					{ "agreementId": "a-1", "name": "Intake - Ada", "status": "SIGNED", "esign": true },
					{ "agreementId": "a-2", "name": "Intake - Grace", "status": "OUT_FOR_SIGNATURE" }
				]
			}));
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let widget = client.widget("w-1").await.expect("Widget lookup should succeed.");
	let first = widget.agreements().await.expect("First traversal should succeed.");

	assert_eq!(first.iter().map(|a| a.id()).collect::<Vec<_>>(), ["a-1", "a-2"]);
	assert_eq!(first[0].record().esign, Some(true));

	let second = widget.agreements().await.expect("Memoized traversal should succeed.");

	assert_eq!(second.len(), 2);

	agreements.assert_calls_async(1).await;
}

#[tokio::test]
async fn documents_resolve_pdf_url_and_download_without_token() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t1").await;
	let _agreement = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/a-1"));
			then.status(200).json_body(json!({ "agreementId": "a-1", "status": "SIGNED" }));
		})
		.await;
	let _documents = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/a-1/documents"));
			then.status(200).json_body(json!({
				"documents": [
					{ "documentId": "d-1", "mimeType": "application/pdf", "name": "nda.pdf", "numPages": 2 }
				]
			}));
		})
		.await;
	let pdf_url = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/a-1/documents/d-1/url"));
			then.status(200).json_body(json!({ "url": server.url("/files/nda.pdf") }));
		})
		.await;
	let file = server
		.mock_async(|when, then| {
			when.method(GET).path("/files/nda.pdf");
			then.status(200).header("content-type", "application/pdf").body("%PDF-1.4 signed");
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let agreement = client.agreement("a-1").await.expect("Agreement lookup should succeed.");
	let documents = agreement.documents().await.expect("Documents should load.");
	let document = &documents[0];

	assert_eq!(document.agreement_id(), "a-1");
	assert_eq!(document.record().num_pages, Some(2));
	assert_eq!(document.file().await.expect("Download should succeed."), b"%PDF-1.4 signed");
	assert_eq!(
		document.pdf_url().await.expect("Memoized URL should be returned."),
		server.url("/files/nda.pdf")
	);
	assert_eq!(document.file().await.expect("Memoized file should be returned.").len(), 15);

	pdf_url.assert_calls_async(1).await;
	file.assert_calls_async(1).await;
}

#[tokio::test]
async fn form_data_is_returned_as_a_csv_table() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t1").await;
	let _form_data = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/a-1/formData"));
			then.status(200)
				.header("content-type", "text/csv")
				.body("email,company,agreed\nada@example.com,Analytical Engines,true\n");
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let ParsedResponse::Table(table) =
		client.agreement_form_data("a-1").await.expect("Form data should load.")
	else {
		panic!("Form data should normalize into a table.");
	};

	assert_eq!(table.headers, ["email", "company", "agreed"]);
	assert_eq!(table.get(0, "company"), Some("Analytical Engines"));
}

#[tokio::test]
async fn create_agreement_posts_template_request_and_fetches_result() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t1").await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(api("/agreements"))
				.header("access-token", "t1")
				.header("content-type", "application/json")
				.json_body(json!({
					"documentCreationInfo": {
						"fileInfos": [{ "libraryDocumentId": "lib-1" }],
						"name": "Offer letter",
						"daysUntilSigningDeadline": 7,
						"recipientSetInfos": [{
							"recipientSetMemberInfos": [{ "email": "grace@example.com" }],
							"recipientSetRole": "SIGNER"
						}],
						"signatureType": "ESIGN",
						"signatureFlow": "SENDER_SIGNATURE_NOT_REQUIRED",
						"mergeFieldInfo": [
							{ "fieldName": "first_name", "defaultValue": "Grace" },
							{ "fieldName": "salary", "defaultValue": "100000" }
						]
					}
				}));
			then.status(201).json_body(json!({ "agreementId": "a-new" }));
		})
		.await;
	let fetch = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/a-new"));
			then.status(200)
				.json_body(json!({ "agreementId": "a-new", "name": "Offer letter", "status": "OUT_FOR_SIGNATURE" }));
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let draft = AgreementDraft::new("Offer letter", "lib-1", "grace@example.com", 7)
		.with_merge_field("first_name", "Grace")
		.with_merge_field("salary", "100000");
	let agreement = client.create_agreement(&draft).await.expect("Creation should succeed.");

	assert_eq!(agreement.id(), "a-new");
	assert_eq!(agreement.record().status.as_deref(), Some("OUT_FOR_SIGNATURE"));

	create.assert_calls_async(1).await;
	fetch.assert_calls_async(1).await;
}

#[tokio::test]
async fn library_documents_are_listed_and_fetched() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t1").await;
	let _list = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/libraryDocuments"));
			then.status(200).json_body(json!({
				"libraryDocumentList": [
					{
						"libraryDocumentId": "lib-1",
						"name": "Offer letter",
						"scope": "SHARED",
						"libraryTemplateTypes": ["DOCUMENT"]
					},
					{ "libraryDocumentId": "lib-2", "name": "NDA" }
				]
			}));
		})
		.await;
	let _one = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/libraryDocuments/lib-2"));
			then.status(200).json_body(json!({ "libraryDocumentId": "lib-2", "name": "NDA" }));
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let templates = client.library_documents().await.expect("Template listing should succeed.");

	assert_eq!(templates.len(), 2);
	assert_eq!(templates[0].library_template_types, ["DOCUMENT"]);
	assert!(templates[1].library_template_types.is_empty());

	let nda = client.library_document("lib-2").await.expect("Template lookup should succeed.");

	assert_eq!(nda.name.as_deref(), Some("NDA"));
}

#[tokio::test]
async fn structured_api_errors_surface_as_request_failures() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "t1").await;
	let missing = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/agreements/unknown"));
			then.status(404).json_body(json!({
				"code": "INVALID_AGREEMENT_ID",
				"message": "The Agreement ID specified is invalid."
			}));
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let err = client.agreement("unknown").await.expect_err("Unknown agreement should fail.");
	let failure = err.as_request_failure().expect("Failure should carry the upstream code.");

	assert_eq!(failure.status, 404);
	assert_eq!(failure.code.as_deref(), Some("INVALID_AGREEMENT_ID"));
	assert_eq!(failure.message.as_deref(), Some("The Agreement ID specified is invalid."));

	// Non-token failures are never retried.
	missing.assert_calls_async(1).await;
}

#[tokio::test]
async fn unstructured_gateway_errors_pass_through() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "t1").await;
	let gateway = server
		.mock_async(|when, then| {
			when.method(GET).path(api("/widgets"));
			then.status(502).body("<html>Bad Gateway</html>");
		})
		.await;
	let client = connect(&server).await.expect("Client should connect.");
	let err = client.widgets().await.expect_err("Gateway failure should surface.");

	assert!(matches!(err, Error::Transport(ref e) if e.status() == Some(502)));

	// Only the initial mint; an unclassified failure never reaches the authenticator.
	token.assert_calls_async(1).await;
	gateway.assert_calls_async(1).await;
}
