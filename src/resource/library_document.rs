//! Library documents (reusable templates).

// self
use crate::_prelude::*;

/// Template payload as returned by `GET /libraryDocuments` and `GET /libraryDocuments/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDocumentRecord {
	/// Template identifier; pass it to
	/// [`AgreementDraft::new`](crate::resource::AgreementDraft::new).
	pub library_document_id: String,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Last modification timestamp as sent by the API.
	#[serde(default)]
	pub modified_date: Option<String>,
	/// Sharing scope (e.g. `PERSONAL`, `SHARED`).
	#[serde(default)]
	pub scope: Option<String>,
	/// Template kinds (e.g. `DOCUMENT`, `FORM_FIELD_LAYER`).
	#[serde(default)]
	pub library_template_types: Vec<String>,
}
