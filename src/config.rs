//! Client configuration assembled explicitly or from the process environment.

// self
use crate::{_prelude::*, auth::Credentials, endpoint::Endpoints, error::ConfigError};

/// Optional environment variable overriding the REST root.
pub const ENV_API_ROOT: &str = "ADOBE_SIGN_API_ROOT";
/// Optional environment variable overriding the OAuth root.
pub const ENV_AUTH_ROOT: &str = "ADOBE_SIGN_AUTH_ROOT";

/// Everything a [`Client`](crate::client::Client) needs at construction.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Credentials used to mint access tokens.
	pub credentials: Credentials,
	/// REST and OAuth endpoint table.
	pub endpoints: Endpoints,
}
impl ClientConfig {
	/// Pairs `credentials` with the production endpoints.
	pub fn new(credentials: Credentials) -> Result<Self, ConfigError> {
		Ok(Self { credentials, endpoints: Endpoints::production()? })
	}

	/// Replaces the endpoint table.
	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Loads credentials and optional root overrides from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(process_env)
	}

	/// Same as [`ClientConfig::from_env`] but resolves variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let credentials = Credentials::from_lookup(&lookup)?;
		let production = Endpoints::production()?;
		let api_root = optional(&lookup, ENV_API_ROOT);
		let auth_root = optional(&lookup, ENV_AUTH_ROOT);
		let endpoints = match (api_root, auth_root) {
			(None, None) => production,
			(api, auth) => Endpoints::parse(
				api.as_deref().unwrap_or(production.api_root().as_str()),
				auth.as_deref().unwrap_or(production.auth_root().as_str()),
			)?,
		};

		Ok(Self { credentials, endpoints })
	}
}

pub(crate) fn process_env(var: &str) -> Option<String> {
	std::env::var(var).ok()
}

pub(crate) fn require<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	optional(lookup, var).ok_or(ConfigError::MissingEnv { var })
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
	F: Fn(&str) -> Option<String>,
{
	lookup(var).map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
}
