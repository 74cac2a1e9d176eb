//! Redacting holder for the client secret, the refresh token, and minted access tokens.

// self
use crate::_prelude::*;

/// Credential material that must never reach logs or error messages.
///
/// `Debug` and `Display` print `<redacted>`; only [`Secret::expose`] hands out the value, and
/// its callers are the refresh form body and the `Access-Token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Takes ownership of the raw value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw value for the wire.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn refresh_token_and_client_secret_never_print() {
		let refresh = Secret::new("3AAABLblqZhB");

		assert_eq!(format!("{refresh:?}"), "Secret(\"<redacted>\")");
		assert_eq!(refresh.to_string(), "<redacted>");
		assert_eq!(refresh.expose(), "3AAABLblqZhB");

		let rendered = format!("{:?}", test_credentials());

		assert!(!rendered.contains("client-secret"));
		assert!(!rendered.contains("refresh-token"));
	}
}
