//! Adobe Sign REST v5 and OAuth endpoint table.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production OAuth root for the NA1 shard.
pub const DEFAULT_AUTH_ROOT: &str = "https://secure.na1.echosign.com";
/// Production REST v5 root for the NA1 shard.
pub const DEFAULT_API_ROOT: &str = "https://api.na1.echosign.com/api/rest/v5";

/// Resolves resource URLs against configurable REST and OAuth roots.
///
/// Identifiers are appended as percent-encoded path segments, so ids containing `/` or `?`
/// cannot escape their resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	api_root: Url,
	auth_root: Url,
}
impl Endpoints {
	/// Creates an endpoint table from explicit roots.
	pub fn new(api_root: Url, auth_root: Url) -> Result<Self, ConfigError> {
		for root in [&api_root, &auth_root] {
			if root.cannot_be_a_base() {
				return Err(ConfigError::CannotBeABase { value: root.to_string() });
			}
		}

		Ok(Self { api_root, auth_root })
	}

	/// Parses both roots from strings.
	pub fn parse(api_root: &str, auth_root: &str) -> Result<Self, ConfigError> {
		Self::new(parse_root(api_root)?, parse_root(auth_root)?)
	}

	/// Production NA1 endpoints.
	pub fn production() -> Result<Self, ConfigError> {
		Self::parse(DEFAULT_API_ROOT, DEFAULT_AUTH_ROOT)
	}

	/// REST root.
	pub fn api_root(&self) -> &Url {
		&self.api_root
	}

	/// OAuth root.
	pub fn auth_root(&self) -> &Url {
		&self.auth_root
	}

	/// `POST {auth}/oauth/refresh`
	pub fn refresh_token(&self) -> Url {
		join(&self.auth_root, &["oauth", "refresh"])
	}

	/// `GET /widgets`
	pub fn widgets(&self) -> Url {
		self.api(&["widgets"])
	}

	/// `GET /widgets/{id}`
	pub fn widget(&self, widget_id: &str) -> Url {
		self.api(&["widgets", widget_id])
	}

	/// `GET /widgets/{id}/agreements`
	pub fn widget_agreements(&self, widget_id: &str) -> Url {
		self.api(&["widgets", widget_id, "agreements"])
	}

	/// `GET /agreements`
	pub fn agreements(&self) -> Url {
		self.api(&["agreements"])
	}

	/// `GET /agreements/{id}`
	pub fn agreement(&self, agreement_id: &str) -> Url {
		self.api(&["agreements", agreement_id])
	}

	/// `GET /agreements/{id}/documents`
	pub fn agreement_documents(&self, agreement_id: &str) -> Url {
		self.api(&["agreements", agreement_id, "documents"])
	}

	/// `GET /agreements/{id}/documents/{document_id}/url`
	pub fn document_pdf_url(&self, agreement_id: &str, document_id: &str) -> Url {
		self.api(&["agreements", agreement_id, "documents", document_id, "url"])
	}

	/// `GET /agreements/{id}/formData`
	pub fn agreement_form_data(&self, agreement_id: &str) -> Url {
		self.api(&["agreements", agreement_id, "formData"])
	}

	/// `POST /agreements`
	pub fn create_agreement(&self) -> Url {
		self.agreements()
	}

	/// `GET /agreements/{id}/signingUrls`
	pub fn agreement_signing_urls(&self, agreement_id: &str) -> Url {
		self.api(&["agreements", agreement_id, "signingUrls"])
	}

	/// `GET /libraryDocuments`
	pub fn library_documents(&self) -> Url {
		self.api(&["libraryDocuments"])
	}

	/// `GET /libraryDocuments/{id}`
	pub fn library_document(&self, library_document_id: &str) -> Url {
		self.api(&["libraryDocuments", library_document_id])
	}

	fn api(&self, segments: &[&str]) -> Url {
		join(&self.api_root, segments)
	}
}

fn parse_root(value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl { value: value.to_owned(), source })
}

fn join(root: &Url, segments: &[&str]) -> Url {
	let mut url = root.clone();

	// Roots are checked in `Endpoints::new`, so segments are always accepted.
	if let Ok(mut path) = url.path_segments_mut() {
		path.pop_if_empty().extend(segments);
	}

	url
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn production_urls_match_the_v5_layout() {
		let endpoints = Endpoints::production().expect("Production roots should parse.");

		assert_eq!(
			endpoints.refresh_token().as_str(),
			"https://secure.na1.echosign.com/oauth/refresh"
		);
		assert_eq!(
			endpoints.widget_agreements("w1").as_str(),
			"https://api.na1.echosign.com/api/rest/v5/widgets/w1/agreements"
		);
		assert_eq!(
			endpoints.document_pdf_url("a1", "d1").as_str(),
			"https://api.na1.echosign.com/api/rest/v5/agreements/a1/documents/d1/url"
		);
		assert_eq!(
			endpoints.agreement_form_data("a1").as_str(),
			"https://api.na1.echosign.com/api/rest/v5/agreements/a1/formData"
		);
		assert_eq!(endpoints.create_agreement(), endpoints.agreements());
		assert_eq!(
			endpoints.library_document("l1").as_str(),
			"https://api.na1.echosign.com/api/rest/v5/libraryDocuments/l1"
		);
	}

	#[test]
	fn identifiers_are_escaped_and_trailing_slashes_ignored() {
		let endpoints = Endpoints::parse("https://api.example.com/v5/", "https://auth.example.com")
			.expect("Roots should parse.");

		assert_eq!(
			endpoints.agreement("a/b?c").as_str(),
			"https://api.example.com/v5/agreements/a%2Fb%3Fc"
		);
		assert_eq!(endpoints.refresh_token().as_str(), "https://auth.example.com/oauth/refresh");
	}

	#[test]
	fn invalid_roots_are_rejected() {
		assert!(matches!(
			Endpoints::parse("not a url", DEFAULT_AUTH_ROOT),
			Err(ConfigError::InvalidUrl { .. })
		));
		assert!(matches!(
			Endpoints::parse(DEFAULT_API_ROOT, "mailto:ops@example.com"),
			Err(ConfigError::CannotBeABase { .. })
		));
	}
}
