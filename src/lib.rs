//! Adobe Sign REST client with transparent access-token renewal, format-sniffing response
//! normalization, and lazily traversed agreements, widgets, and documents.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod request;
pub mod resource;
pub mod response;
pub mod session;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for unit tests; enabled via `cfg(test)` or the `test`
	//! crate feature for downstream crates driving a client without a network.

	pub use crate::_prelude::*;

	// std
	use std::{collections::VecDeque, sync::atomic::AtomicUsize};
	// self
	use crate::{
		auth::Credentials,
		endpoint::Endpoints,
		error::TransportError,
		http::{HttpReply, HttpRequest, Transport, TransportFuture},
	};

	/// Credentials shared by every test fixture.
	pub fn test_credentials() -> Credentials {
		Credentials::new("client-id", "client-secret", "refresh-token")
	}

	/// Endpoints whose auth and REST roots both point at `base`.
	pub fn test_endpoints(base: &str) -> Endpoints {
		let api_root = Url::parse(&format!("{base}/api/rest/v5"))
			.expect("Mock REST root should parse successfully.");
		let auth_root = Url::parse(base).expect("Mock auth root should parse successfully.");

		Endpoints::new(api_root, auth_root).expect("Mock endpoints should be accepted.")
	}

	/// Scripted transport that replays canned replies in order and records every request.
	#[derive(Debug, Default)]
	pub struct ScriptedTransport {
		replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
		requests: Mutex<Vec<HttpRequest>>,
		calls: AtomicUsize,
	}
	impl ScriptedTransport {
		/// Queues a successful reply carrying `body`.
		pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
			self.replies
				.lock()
				.push_back(Ok(HttpReply { status, body: body.into().into_bytes() }));

			self
		}

		/// Queues a non-2xx failure carrying `body`.
		pub fn fail(self, status: u16, body: impl Into<String>) -> Self {
			self.replies
				.lock()
				.push_back(Err(TransportError::Status { status, body: body.into() }));

			self
		}

		/// Returns every request seen so far.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}

		/// Returns the requests whose path ends with `suffix`.
		pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
			self.requests.lock().iter().filter(|r| r.url.path().ends_with(suffix)).cloned().collect()
		}

		/// Total number of dispatched calls.
		pub fn calls(&self) -> usize {
			self.calls.load(std::sync::atomic::Ordering::SeqCst)
		}
	}
	impl Transport for ScriptedTransport {
		fn call(&self, request: HttpRequest) -> TransportFuture<'_, HttpReply> {
			self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
			self.requests.lock().push(request);

			let next = self.replies.lock().pop_front();

			Box::pin(async move {
				next.unwrap_or_else(|| {
					Err(TransportError::Status {
						status: 599,
						body: "scripted transport exhausted".into(),
					})
				})
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::{Mutex as AsyncMutex, OnceCell};
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
