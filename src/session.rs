//! Session controller: transparent, bounded access-token renewal around every call.
//!
//! A [`Session`] owns the credentials and the current [`RequestExecutor`]. Each logical call
//! is a caller-supplied closure that receives the current executor and may be re-invoked from
//! scratch. When an attempt fails with [`Error::InvalidAccessToken`], the session mints a new
//! token, swaps in a fresh executor, and runs the closure again, up to [`MAX_ATTEMPTS`]
//! attempts in total. Any other failure ends the call immediately. A token whose advertised
//! expiry has already passed is renewed before the attempt instead of waiting for the rejection.
//!
//! ```text
//! Idle -> Executing -> Succeeded
//!            |   ^
//!            v   |
//!       RenewingToken -> Failed (renewal error)
//!            |
//!            +-> Failed (attempt ceiling reached or non-token error)
//! ```

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Authenticator, Credentials},
	http::Transport,
	obs::{self, RenewalOutcome, RequestOutcome, RequestSpan},
	request::RequestExecutor,
	response::ParsedResponse,
};

/// Attempts allowed per logical call, counting the first one.
pub const MAX_ATTEMPTS: u32 = 3;

/// Typed result of one logical call driven by [`Session::run`].
#[derive(Debug)]
pub enum RetryOutcome<T> {
	/// The operation returned a value.
	Succeeded(T),
	/// Every allowed attempt was rejected with an invalid access token.
	Exhausted {
		/// Attempts made.
		attempts: u32,
		/// Failure observed on the final attempt.
		last: Error,
	},
	/// The operation or a renewal failed with an error that is never retried.
	Fatal(Error),
}
impl<T> RetryOutcome<T> {
	/// Converts the outcome into a [`Result`], mapping exhaustion to
	/// [`Error::RetriesExhausted`].
	pub fn into_result(self) -> Result<T> {
		match self {
			Self::Succeeded(value) => Ok(value),
			Self::Exhausted { attempts, last } =>
				Err(Error::RetriesExhausted { attempts, source: Box::new(last) }),
			Self::Fatal(err) => Err(err),
		}
	}
}

enum State<C>
where
	C: ?Sized + Transport,
{
	Executing,
	RenewingToken { rejected: Arc<RequestExecutor<C>> },
}

/// Holds the current access token and re-runs calls that hit an expired one.
///
/// The executor slot is only locked long enough to clone or swap the [`Arc`]; renewals are
/// serialized so a burst of rejections mints one token instead of several.
pub struct Session<C>
where
	C: ?Sized + Transport,
{
	credentials: Credentials,
	transport: Arc<C>,
	authenticator: Authenticator<C>,
	current: RwLock<Arc<RequestExecutor<C>>>,
	renewal_guard: AsyncMutex<()>,
}
impl<C> Session<C>
where
	C: ?Sized + Transport,
{
	/// Mints the first access token and returns a ready session.
	pub async fn connect(
		credentials: Credentials,
		token_url: Url,
		transport: impl Into<Arc<C>>,
	) -> Result<Self> {
		let transport = transport.into();
		let authenticator = Authenticator::<C>::new(transport.clone(), token_url);
		let token = authenticator.renew(&credentials).await.inspect_err(|_| {
			obs::record_token_renewal(RenewalOutcome::Failed);
			obs::log_token_renewal(0, RenewalOutcome::Failed);
		})?;

		obs::record_token_renewal(RenewalOutcome::Renewed);

		Ok(Self::with_access_token(credentials, authenticator, token))
	}

	/// Builds a session around an already minted token.
	pub fn with_access_token(
		credentials: Credentials,
		authenticator: Authenticator<C>,
		token: AccessToken,
	) -> Self {
		let transport = authenticator.transport();
		let executor = Arc::new(RequestExecutor::new(transport.clone(), token));

		Self {
			credentials,
			transport,
			authenticator,
			current: RwLock::new(executor),
			renewal_guard: AsyncMutex::new(()),
		}
	}

	/// Credentials used for renewals.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Transport shared by every executor this session builds.
	pub fn transport(&self) -> &Arc<C> {
		&self.transport
	}

	/// Executor bound to the live access token.
	pub fn executor(&self) -> Arc<RequestExecutor<C>> {
		self.current.read().clone()
	}

	/// Runs `operation` with renewal-on-rejection and returns the typed outcome.
	///
	/// The closure is re-invoked from scratch after each renewal; partial side effects of a
	/// rejected attempt are not rolled back.
	pub async fn run<T, F, Fut>(&self, mut operation: F) -> RetryOutcome<T>
	where
		F: FnMut(Arc<RequestExecutor<C>>) -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let mut attempts = 0;
		let mut state = State::Executing;

		loop {
			state = match state {
				State::Executing => {
					let mut executor = self.executor();

					// A token past its advertised expiry is replaced up front; this costs no attempt.
					if executor.access_token().is_expired_at(OffsetDateTime::now_utc()) {
						if let Err(err) = self.renew(&executor, attempts).await {
							return RetryOutcome::Fatal(err);
						}

						executor = self.executor();
					}

					attempts += 1;

					match operation(executor.clone()).await {
						Ok(value) => return RetryOutcome::Succeeded(value),
						Err(err) if err.is_invalid_access_token() =>
							if attempts < MAX_ATTEMPTS {
								State::RenewingToken { rejected: executor }
							} else {
								return RetryOutcome::Exhausted { attempts, last: err };
							},
						Err(err) => return RetryOutcome::Fatal(err),
					}
				},
				State::RenewingToken { rejected } => match self.renew(&rejected, attempts).await {
					Ok(()) => State::Executing,
					Err(err) => return RetryOutcome::Fatal(err),
				},
			};
		}
	}

	/// Runs `operation` like [`Session::run`], instrumented and flattened into a [`Result`].
	pub async fn execute<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T>
	where
		F: FnMut(Arc<RequestExecutor<C>>) -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let span = RequestSpan::new(operation);

		obs::record_request_outcome(operation, RequestOutcome::Attempt);

		let result = span.instrument(self.run(op)).await.into_result();

		match &result {
			Ok(_) => obs::record_request_outcome(operation, RequestOutcome::Success),
			Err(err) => {
				obs::record_request_outcome(operation, RequestOutcome::Failure);
				obs::log_request_failure(operation, err);
			},
		}

		result
	}

	/// Wrapped `GET` against `url`.
	pub async fn perform_get(&self, operation: &'static str, url: &Url) -> Result<ParsedResponse> {
		self.execute(operation, |executor| {
			let url = url.clone();

			async move { executor.get(&url).await }
		})
		.await
	}

	/// Wrapped JSON `POST` of `body` against `url`.
	pub async fn perform_post(
		&self,
		operation: &'static str,
		url: &Url,
		body: &Value,
	) -> Result<ParsedResponse> {
		self.execute(operation, |executor| {
			let url = url.clone();
			let body = body.clone();

			async move { executor.post(&url, &body).await }
		})
		.await
	}

	async fn renew(&self, rejected: &Arc<RequestExecutor<C>>, attempt: u32) -> Result<()> {
		let _renewal = self.renewal_guard.lock().await;

		if !Arc::ptr_eq(&self.executor(), rejected) {
			obs::record_token_renewal(RenewalOutcome::Reused);
			obs::log_token_renewal(attempt, RenewalOutcome::Reused);

			return Ok(());
		}

		let token = self.authenticator.renew(&self.credentials).await.inspect_err(|_| {
			obs::record_token_renewal(RenewalOutcome::Failed);
			obs::log_token_renewal(attempt, RenewalOutcome::Failed);
		})?;

		*self.current.write() = Arc::new(RequestExecutor::new(self.transport.clone(), token));

		obs::record_token_renewal(RenewalOutcome::Renewed);
		obs::log_token_renewal(attempt, RenewalOutcome::Renewed);

		Ok(())
	}
}
impl<C> Debug for Session<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("credentials", &self.credentials)
			.field("authenticator", &self.authenticator)
			.finish()
	}
}
