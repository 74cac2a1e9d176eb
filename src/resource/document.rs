//! Documents attached to an agreement.

// self
use crate::{_prelude::*, client::Client, http::Transport};

/// Document payload as returned by `GET /agreements/{id}/documents`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
	/// Document identifier, scoped to its agreement.
	pub document_id: String,
	/// MIME type of the stored file.
	#[serde(default)]
	pub mime_type: Option<String>,
	/// File name.
	#[serde(default)]
	pub name: Option<String>,
	/// Page count.
	#[serde(default)]
	pub num_pages: Option<u32>,
}

/// Agreement document with a lazily fetched download URL and file body.
pub struct Document<C>
where
	C: ?Sized + Transport,
{
	client: Client<C>,
	agreement_id: String,
	record: DocumentRecord,
	pdf_url: OnceCell<String>,
	file: OnceCell<Vec<u8>>,
}
impl<C> Document<C>
where
	C: ?Sized + Transport,
{
	pub(crate) fn new(client: Client<C>, agreement_id: &str, record: DocumentRecord) -> Self {
		Self {
			client,
			agreement_id: agreement_id.to_owned(),
			record,
			pdf_url: OnceCell::new(),
			file: OnceCell::new(),
		}
	}

	/// Document identifier.
	pub fn id(&self) -> &str {
		&self.record.document_id
	}

	/// Owning agreement.
	pub fn agreement_id(&self) -> &str {
		&self.agreement_id
	}

	/// Underlying record.
	pub fn record(&self) -> &DocumentRecord {
		&self.record
	}

	/// Pre-signed PDF download URL; fetched once.
	pub async fn pdf_url(&self) -> Result<&str> {
		self.pdf_url
			.get_or_try_init(|| self.client.document_pdf_url(&self.agreement_id, self.id()))
			.await
			.map(String::as_str)
	}

	/// PDF bytes downloaded from [`Document::pdf_url`]; fetched once.
	pub async fn file(&self) -> Result<&[u8]> {
		self.file
			.get_or_try_init(|| async {
				let url = self.pdf_url().await?;

				self.client.download(url).await
			})
			.await
			.map(Vec::as_slice)
	}
}
impl<C> Debug for Document<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Document")
			.field("agreement_id", &self.agreement_id)
			.field("record", &self.record)
			.field("file_loaded", &self.file.is_initialized())
			.finish()
	}
}
