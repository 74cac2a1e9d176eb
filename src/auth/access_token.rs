//! Short-lived access token minted from the refresh token.

// self
use crate::{_prelude::*, auth::Secret};

/// Opaque bearer credential bound to one request executor.
///
/// Tokens are replaced wholesale on renewal and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	secret: Secret,
	/// Instant the token was received.
	pub issued_at: OffsetDateTime,
	/// Expiry advertised by the token endpoint, when it sent `expires_in`.
	pub expires_at: Option<OffsetDateTime>,
}
impl AccessToken {
	/// Wraps a freshly issued token value.
	pub fn new(value: impl Into<String>) -> Self {
		Self { secret: Secret::new(value), issued_at: OffsetDateTime::now_utc(), expires_at: None }
	}

	/// Records the advertised lifetime relative to [`AccessToken::issued_at`].
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_at = Some(self.issued_at + expires_in);

		self
	}

	/// Returns the raw token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.secret.expose()
	}

	/// Returns `true` once the advertised expiry has passed; unknown expiry never expires.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| now >= expires_at)
	}
}
