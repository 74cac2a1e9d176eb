//! Immutable OAuth client credentials used to mint access tokens.

// self
use crate::{_prelude::*, auth::Secret, config, error::ConfigError};

/// Environment variable holding the OAuth client identifier.
pub const ENV_CLIENT_ID: &str = "ADOBE_SIGN_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "ADOBE_SIGN_CLIENT_SECRET";
/// Environment variable holding the long-lived refresh token.
pub const ENV_REFRESH_TOKEN: &str = "ADOBE_SIGN_REFRESH_TOKEN";

/// Client identifier, client secret, and refresh token supplied once per session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: Secret,
	refresh_token: Secret,
}
impl Credentials {
	/// Creates credentials from their three parts.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		refresh_token: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
			refresh_token: Secret::new(refresh_token),
		}
	}

	/// Reads `ADOBE_SIGN_CLIENT_ID`, `ADOBE_SIGN_CLIENT_SECRET`, and `ADOBE_SIGN_REFRESH_TOKEN`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(config::process_env)
	}

	/// Same as [`Credentials::from_env`] but resolves variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		Ok(Self::new(
			config::require(&lookup, ENV_CLIENT_ID)?,
			config::require(&lookup, ENV_CLIENT_SECRET)?,
			config::require(&lookup, ENV_REFRESH_TOKEN)?,
		))
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &Secret {
		&self.client_secret
	}

	/// Long-lived refresh token.
	pub fn refresh_token(&self) -> &Secret {
		&self.refresh_token
	}

	/// Form-encoded `grant_type=refresh_token` body for the token endpoint.
	pub(crate) fn refresh_form(&self) -> String {
		url::form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "refresh_token")
			.append_pair("client_id", &self.client_id)
			.append_pair("client_secret", self.client_secret.expose())
			.append_pair("refresh_token", self.refresh_token.expose())
			.finish()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("refresh_token", &self.refresh_token)
			.finish()
	}
}
