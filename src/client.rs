//! Domain-facing Adobe Sign client.
//!
//! Every method runs through the [`Session`] retry wrapper and maps the normalized response
//! into the resource types from [`crate::resource`]. List endpoints that collapse a single
//! result into a bare object are coerced into a `Vec` here, so callers only handle one shape.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	endpoint::Endpoints,
	http::{HttpRequest, Transport},
	request,
	resource::{
		Agreement, AgreementDraft, AgreementRecord, CreatedAgreement, Document, DocumentList,
		DocumentUrl, LibraryDocumentList, LibraryDocumentRecord, SigningUrlSet, SigningUrlSetList,
		Widget, WidgetAgreementList, WidgetList, WidgetRecord,
	},
	response::ParsedResponse,
	session::Session,
};
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, http::ReqwestTransport};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestClient = Client<ReqwestTransport>;

/// Cheaply cloneable handle to one authenticated Adobe Sign session.
///
/// Resource objects keep a clone so they can lazily fetch related records.
pub struct Client<C>
where
	C: ?Sized + Transport,
{
	inner: Arc<ClientInner<C>>,
}
struct ClientInner<C>
where
	C: ?Sized + Transport,
{
	session: Session<C>,
	endpoints: Endpoints,
}
impl<C> Client<C>
where
	C: ?Sized + Transport,
{
	/// Mints the first access token over `transport` and returns a ready client.
	pub async fn connect_with_transport(
		credentials: Credentials,
		endpoints: Endpoints,
		transport: impl Into<Arc<C>>,
	) -> Result<Self> {
		let session = Session::connect(credentials, endpoints.refresh_token(), transport).await?;

		Ok(Self::with_session(session, endpoints))
	}

	/// Wraps an existing session.
	pub fn with_session(session: Session<C>, endpoints: Endpoints) -> Self {
		Self { inner: Arc::new(ClientInner { session, endpoints }) }
	}

	/// Underlying session.
	pub fn session(&self) -> &Session<C> {
		&self.inner.session
	}

	/// Endpoint table used by this client.
	pub fn endpoints(&self) -> &Endpoints {
		&self.inner.endpoints
	}

	/// Lists the widgets visible to the authenticated user.
	pub async fn widgets(&self) -> Result<Vec<Widget<C>>> {
		let url = self.endpoints().widgets();
		let list: WidgetList = self.get("get_widgets", &url).await?.deserialize()?;

		Ok(list
			.user_widget_list
			.into_vec()
			.into_iter()
			.map(|r| Widget::new(self.clone(), r))
			.collect())
	}

	/// Fetches one widget.
	pub async fn widget(&self, widget_id: &str) -> Result<Widget<C>> {
		let url = self.endpoints().widget(widget_id);
		let record: WidgetRecord = self.get("get_widget", &url).await?.deserialize()?;

		Ok(Widget::new(self.clone(), record))
	}

	/// Lists the agreements created through a widget.
	pub async fn widget_agreements(&self, widget_id: &str) -> Result<Vec<Agreement<C>>> {
		let url = self.endpoints().widget_agreements(widget_id);
		let list: WidgetAgreementList =
			self.get("get_widget_agreements", &url).await?.deserialize()?;

		Ok(list
			.user_agreement_list
			.into_vec()
			.into_iter()
			.map(|r| Agreement::new(self.clone(), r))
			.collect())
	}

	/// Fetches one agreement.
	pub async fn agreement(&self, agreement_id: &str) -> Result<Agreement<C>> {
		let url = self.endpoints().agreement(agreement_id);
		let record: AgreementRecord = self.get("get_agreement", &url).await?.deserialize()?;

		Ok(Agreement::new(self.clone(), record))
	}

	/// Lists the documents attached to an agreement.
	pub async fn agreement_documents(&self, agreement_id: &str) -> Result<Vec<Document<C>>> {
		let url = self.endpoints().agreement_documents(agreement_id);
		let list: DocumentList = self.get("get_agreement_documents", &url).await?.deserialize()?;

		Ok(list
			.documents
			.into_vec()
			.into_iter()
			.map(|r| Document::new(self.clone(), agreement_id, r))
			.collect())
	}

	/// Fetches the form field values of an agreement; the API answers with CSV.
	pub async fn agreement_form_data(&self, agreement_id: &str) -> Result<ParsedResponse> {
		let url = self.endpoints().agreement_form_data(agreement_id);

		self.get("get_agreement_form_data", &url).await
	}

	/// Creates an agreement from a library template, then fetches it.
	pub async fn create_agreement(&self, draft: &AgreementDraft) -> Result<Agreement<C>> {
		let url = self.endpoints().create_agreement();
		let body = draft.to_request_body();
		let created: CreatedAgreement = self
			.inner
			.session
			.perform_post("post_create_agreement", &url, &body)
			.await?
			.deserialize()?;

		self.agreement(&created.agreement_id).await
	}

	/// Fetches the signing URL sets of an agreement.
	pub async fn agreement_signing_urls(&self, agreement_id: &str) -> Result<Vec<SigningUrlSet>> {
		let url = self.endpoints().agreement_signing_urls(agreement_id);
		let list: SigningUrlSetList =
			self.get("get_agreement_signing_urls", &url).await?.deserialize()?;

		Ok(list.signing_url_set_infos.into_vec())
	}

	/// Fetches a short-lived download URL for a document's PDF.
	pub async fn document_pdf_url(&self, agreement_id: &str, document_id: &str) -> Result<String> {
		let url = self.endpoints().document_pdf_url(agreement_id, document_id);
		let pdf: DocumentUrl = self.get("get_document_pdf_url", &url).await?.deserialize()?;

		Ok(pdf.url)
	}

	/// Lists the library documents (templates) visible to the authenticated user.
	pub async fn library_documents(&self) -> Result<Vec<LibraryDocumentRecord>> {
		let url = self.endpoints().library_documents();
		let list: LibraryDocumentList =
			self.get("get_library_documents", &url).await?.deserialize()?;

		Ok(list.library_document_list.into_vec())
	}

	/// Fetches one library document.
	pub async fn library_document(&self, library_document_id: &str) -> Result<LibraryDocumentRecord> {
		let url = self.endpoints().library_document(library_document_id);

		self.get("get_library_document", &url).await?.deserialize()
	}

	/// Downloads raw bytes from a pre-signed URL; no access token is attached or renewed.
	pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
		let url = Url::parse(url)
			.map_err(|source| Error::InvalidDownloadUrl { value: url.to_owned(), source })?;
		let reply = self
			.inner
			.session
			.transport()
			.call(HttpRequest::get(url))
			.await
			.map_err(request::classify)?;

		Ok(reply.body)
	}

	async fn get(&self, operation: &'static str, url: &Url) -> Result<ParsedResponse> {
		self.inner.session.perform_get(operation, url).await
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Connects with the default reqwest transport.
	pub async fn connect(config: ClientConfig) -> Result<Self> {
		let ClientConfig { credentials, endpoints } = config;

		Self::connect_with_transport(credentials, endpoints, ReqwestTransport::default()).await
	}

	/// Connects using [`ClientConfig::from_env`].
	pub async fn from_env() -> Result<Self> {
		Self::connect(ClientConfig::from_env()?).await
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + Transport,
{
	fn clone(&self) -> Self {
		Self { inner: Arc::clone(&self.inner) }
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoints", &self.inner.endpoints)
			.field("session", &self.inner.session)
			.finish()
	}
}
