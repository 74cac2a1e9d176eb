//! Client credentials, short-lived access tokens, and the refresh-token authenticator.

pub mod access_token;
pub mod authenticator;
pub mod credentials;
pub mod secret;

pub use access_token::*;
pub use authenticator::*;
pub use credentials::*;
pub use secret::*;
