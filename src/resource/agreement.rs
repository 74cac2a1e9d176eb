//! Agreements, their signing URLs, and the draft used to create one from a template.

// self
use crate::{
	_prelude::*,
	client::Client,
	http::Transport,
	obs,
	resource::Document,
	response::ParsedResponse,
};

/// Signing URL lookups allowed before the last failure is surfaced.
///
/// Freshly created agreements answer `signingUrls` with an error until they are processed.
pub const SIGNING_URL_ATTEMPTS: u32 = 3;

const SIGNER_ROLE: &str = "SIGNER";
const SIGNATURE_TYPE: &str = "ESIGN";
const SIGNATURE_FLOW: &str = "SENDER_SIGNATURE_NOT_REQUIRED";

/// Agreement payload as returned by `GET /agreements/{id}` and the widget agreement list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementRecord {
	/// Agreement identifier.
	pub agreement_id: String,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Lifecycle status (e.g. `OUT_FOR_SIGNATURE`, `SIGNED`).
	#[serde(default)]
	pub status: Option<String>,
	/// Display timestamp as sent by the API.
	#[serde(default)]
	pub display_date: Option<String>,
	/// Users shown as participants.
	#[serde(default)]
	pub display_user_set_infos: Option<Value>,
	/// Whether the agreement is signed electronically.
	#[serde(default)]
	pub esign: Option<bool>,
	/// Latest version identifier.
	#[serde(default)]
	pub latest_version_id: Option<String>,
	/// Audit events.
	#[serde(default)]
	pub events: Option<Value>,
	/// Participant sets.
	#[serde(default)]
	pub participant_set_infos: Option<Value>,
}

/// Signing URLs issued for one recipient set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrlSet {
	/// URLs in signing order.
	#[serde(default)]
	pub signing_urls: Vec<SigningUrl>,
	/// Recipient set label.
	#[serde(default)]
	pub signing_url_set_name: Option<String>,
}

/// Signing URL for one recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrl {
	/// Recipient email.
	#[serde(default)]
	pub email: Option<String>,
	/// URL the recipient opens to sign.
	pub esign_url: String,
}

/// Template field prefilled when the agreement is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeField {
	/// Field name in the template.
	pub field_name: String,
	/// Value written into the field.
	pub default_value: String,
}

/// Parameters for creating a single-signer agreement from a library template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgreementDraft {
	/// Agreement display name.
	pub name: String,
	/// Library document used as the template.
	pub library_document_id: String,
	/// Email of the only signer.
	pub signer_email: String,
	/// Days the signer has before the agreement expires.
	pub days_until_signing_deadline: u32,
	/// Template fields to prefill.
	pub merge_fields: Vec<MergeField>,
}
impl AgreementDraft {
	/// Creates a draft without merge fields.
	pub fn new(
		name: impl Into<String>,
		library_document_id: impl Into<String>,
		signer_email: impl Into<String>,
		days_until_signing_deadline: u32,
	) -> Self {
		Self {
			name: name.into(),
			library_document_id: library_document_id.into(),
			signer_email: signer_email.into(),
			days_until_signing_deadline,
			merge_fields: Vec::new(),
		}
	}

	/// Adds a template field value.
	pub fn with_merge_field(
		mut self,
		field_name: impl Into<String>,
		default_value: impl Into<String>,
	) -> Self {
		self.merge_fields
			.push(MergeField { field_name: field_name.into(), default_value: default_value.into() });

		self
	}

	/// JSON body for `POST /agreements`.
	pub fn to_request_body(&self) -> Value {
		serde_json::json!({
			"documentCreationInfo": {
				"fileInfos": [{ "libraryDocumentId": self.library_document_id }],
				"name": self.name,
				"daysUntilSigningDeadline": self.days_until_signing_deadline,
				"recipientSetInfos": [{
					"recipientSetMemberInfos": [{ "email": self.signer_email }],
					"recipientSetRole": SIGNER_ROLE,
				}],
				"signatureType": SIGNATURE_TYPE,
				"signatureFlow": SIGNATURE_FLOW,
				"mergeFieldInfo": self.merge_fields,
			}
		})
	}
}

/// Agreement bound to a client, with lazily fetched documents, form data, and signing URLs.
pub struct Agreement<C>
where
	C: ?Sized + Transport,
{
	client: Client<C>,
	record: AgreementRecord,
	documents: OnceCell<Vec<Document<C>>>,
	form_data: OnceCell<ParsedResponse>,
	signing_urls: OnceCell<Vec<SigningUrlSet>>,
}
impl<C> Agreement<C>
where
	C: ?Sized + Transport,
{
	pub(crate) fn new(client: Client<C>, record: AgreementRecord) -> Self {
		Self {
			client,
			record,
			documents: OnceCell::new(),
			form_data: OnceCell::new(),
			signing_urls: OnceCell::new(),
		}
	}

	/// Agreement identifier.
	pub fn id(&self) -> &str {
		&self.record.agreement_id
	}

	/// Underlying record.
	pub fn record(&self) -> &AgreementRecord {
		&self.record
	}

	/// Attached documents; fetched once.
	pub async fn documents(&self) -> Result<&[Document<C>]> {
		self.documents
			.get_or_try_init(|| self.client.agreement_documents(self.id()))
			.await
			.map(Vec::as_slice)
	}

	/// Form field values, normally a [`ParsedResponse::Table`]; fetched once.
	pub async fn form_data(&self) -> Result<&ParsedResponse> {
		self.form_data.get_or_try_init(|| self.client.agreement_form_data(self.id())).await
	}

	/// Signing URL sets; fetched once.
	///
	/// A [`RequestFailure`](crate::error::RequestFailure) is retried up to
	/// [`SIGNING_URL_ATTEMPTS`] lookups in total, and the last one is returned if none succeeds.
	pub async fn signing_urls(&self) -> Result<&[SigningUrlSet]> {
		self.signing_urls
			.get_or_try_init(|| async {
				let mut attempt = 1;

				loop {
					match self.client.agreement_signing_urls(self.id()).await {
						Err(Error::RequestFailure(failure)) if attempt < SIGNING_URL_ATTEMPTS => {
							obs::log_signing_url_retry(self.id(), attempt, &failure);

							attempt += 1;
						},
						result => return result,
					}
				}
			})
			.await
			.map(Vec::as_slice)
	}

	/// Last signing URL of the last set, if the agreement has any.
	pub async fn latest_esign_url(&self) -> Result<Option<&str>> {
		Ok(self
			.signing_urls()
			.await?
			.last()
			.and_then(|set| set.signing_urls.last())
			.map(|url| url.esign_url.as_str()))
	}
}
impl<C> Debug for Agreement<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Agreement").field("record", &self.record).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	const NOT_READY: &str = "{\"code\":\"AGREEMENT_NOT_SIGNABLE\",\"message\":\"Not ready yet\"}";
	const SIGNING_URLS: &str = "{\"signingUrlSetInfos\":[{\"signingUrls\":[\
		{\"email\":\"a@example.com\",\"esignUrl\":\"https://sign.example.com/1\"},\
		{\"email\":\"b@example.com\",\"esignUrl\":\"https://sign.example.com/2\"}]}]}";

	fn scripted() -> ScriptedTransport {
		ScriptedTransport::default().reply(200, "{\"access_token\":\"t1\"}")
	}

	async fn agreement(
		transport: ScriptedTransport,
	) -> (Agreement<ScriptedTransport>, Arc<ScriptedTransport>) {
		let transport = Arc::new(transport);
		let client = Client::<ScriptedTransport>::connect_with_transport(
			test_credentials(),
			test_endpoints("https://api.example.com"),
			transport.clone(),
		)
		.await
		.expect("Client should connect.");
		let record = AgreementRecord {
			agreement_id: "a-1".into(),
			name: None,
			status: None,
			display_date: None,
			display_user_set_infos: None,
			esign: Some(true),
			latest_version_id: None,
			events: None,
			participant_set_infos: None,
		};

		(Agreement::new(client, record), transport)
	}

	#[test]
	fn draft_body_targets_a_single_signer() {
		let draft = AgreementDraft::new("NDA", "lib-1", "signer@example.com", 5)
			.with_merge_field("company", "Acme");

		assert_eq!(
			draft.to_request_body(),
			serde_json::json!({
				"documentCreationInfo": {
					"fileInfos": [{ "libraryDocumentId": "lib-1" }],
					"name": "NDA",
					"daysUntilSigningDeadline": 5,
					"recipientSetInfos": [{
						"recipientSetMemberInfos": [{ "email": "signer@example.com" }],
						"recipientSetRole": "SIGNER",
					}],
					"signatureType": "ESIGN",
					"signatureFlow": "SENDER_SIGNATURE_NOT_REQUIRED",
					"mergeFieldInfo": [{ "fieldName": "company", "defaultValue": "Acme" }],
				}
			})
		);
	}

	#[tokio::test]
	async fn signing_urls_wait_for_a_ready_agreement_and_memoize() {
		let (agreement, transport) =
			agreement(scripted().fail(404, NOT_READY).reply(200, SIGNING_URLS)).await;

		assert_eq!(
			agreement.latest_esign_url().await.expect("Second lookup should succeed."),
			Some("https://sign.example.com/2")
		);
		assert_eq!(agreement.signing_urls().await.expect("Memoized lookup.").len(), 1);
		assert_eq!(transport.requests_to("/signingUrls").len(), 2);
	}

	#[tokio::test]
	async fn signing_urls_surface_the_last_failure() {
		let (agreement, transport) = agreement(
			scripted()
				.fail(404, NOT_READY)
				.fail(404, NOT_READY)
				.fail(400, "{\"code\":\"STILL_NOT_READY\"}"),
		)
		.await;
		let err = agreement.signing_urls().await.expect_err("Every lookup failed.");
		let failure = err.as_request_failure().expect("Failure should stay structured.");

		assert_eq!(failure.status, 400);
		assert_eq!(failure.code.as_deref(), Some("STILL_NOT_READY"));
		assert_eq!(transport.requests_to("/signingUrls").len(), SIGNING_URL_ATTEMPTS as usize);
	}

	#[tokio::test]
	async fn other_errors_end_signing_url_lookup_immediately() {
		let (agreement, transport) =
			agreement(scripted().fail(502, "<html>Bad Gateway</html>")).await;
		let err = agreement.signing_urls().await.expect_err("Gateway failure is not retried.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(transport.requests_to("/signingUrls").len(), 1);
	}
}
