//! Adobe Sign records and the lazily traversed objects built on top of them.
//!
//! Records are plain serde mirrors of the REST v5 payloads. Objects ([`Widget`], [`Agreement`],
//! [`Document`]) pair a record with a [`Client`](crate::client::Client) handle and fetch related
//! data on first access, memoizing each successful result for the object's lifetime. Failed
//! lookups are not memoized, so the next access tries again.

pub mod agreement;
pub mod document;
pub mod library_document;
pub mod widget;

pub use agreement::*;
pub use document::*;
pub use library_document::*;
pub use widget::*;

// self
use crate::{_prelude::*, response::OneOrMany};

#[derive(Debug, Deserialize)]
pub(crate) struct WidgetList {
	#[serde(rename = "userWidgetList", default)]
	pub(crate) user_widget_list: OneOrMany<WidgetRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WidgetAgreementList {
	#[serde(rename = "userAgreementList", default)]
	pub(crate) user_agreement_list: OneOrMany<AgreementRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentList {
	#[serde(default)]
	pub(crate) documents: OneOrMany<DocumentRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SigningUrlSetList {
	#[serde(rename = "signingUrlSetInfos", default)]
	pub(crate) signing_url_set_infos: OneOrMany<SigningUrlSet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LibraryDocumentList {
	#[serde(rename = "libraryDocumentList", default)]
	pub(crate) library_document_list: OneOrMany<LibraryDocumentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedAgreement {
	pub(crate) agreement_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentUrl {
	pub(crate) url: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::response::normalize;

	#[test]
	fn collapsed_lists_are_coerced_into_vectors() {
		let single: WidgetList = normalize("{\"userWidgetList\":{\"widgetId\":\"w-1\",\"name\":\"NDA\"}}")
			.deserialize()
			.expect("Collapsed widget list should decode.");
		let widgets = single.user_widget_list.into_vec();

		assert_eq!(widgets.len(), 1);
		assert_eq!(widgets[0].widget_id, "w-1");

		let many: WidgetAgreementList = normalize(
			"{\"userAgreementList\":[{\"agreementId\":\"a-1\"},{\"agreementId\":\"a-2\",\"esign\":true}]}",
		)
		.deserialize()
		.expect("Agreement list should decode.");
		let agreements = many.user_agreement_list.into_vec();

		assert_eq!(agreements.len(), 2);
		assert_eq!(agreements[1].esign, Some(true));
	}

	#[test]
	fn absent_lists_decode_as_empty() {
		let list: DocumentList =
			normalize("{}").deserialize().expect("Missing documents key should decode.");

		assert!(list.documents.into_vec().is_empty());
	}

	#[test]
	fn records_missing_their_id_are_rejected() {
		let err = normalize("{\"name\":\"orphan\"}")
			.deserialize::<AgreementRecord>()
			.expect_err("Records require their identifier.");
		let Error::Decode { source } = err else {
			panic!("Missing id should surface as a decode error.");
		};

		assert!(source.inner().to_string().contains("agreementId"));
	}
}
