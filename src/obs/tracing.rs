// self
use crate::{_prelude::*, error::RequestFailure, obs::RenewalOutcome};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by session-wrapped operations.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the operation name.
	pub fn new(operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("adobe_sign.request", operation);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs the outcome of an access token renewal triggered by attempt `attempt`.
pub fn log_token_renewal(attempt: u32, outcome: RenewalOutcome) {
	#[cfg(feature = "tracing")]
	{
		match outcome {
			RenewalOutcome::Failed =>
				tracing::error!(attempt, outcome = outcome.as_str(), "Access token renewal failed."),
			_ => tracing::warn!(
				attempt,
				outcome = outcome.as_str(),
				"Access token rejected; continuing with a renewed token."
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (attempt, outcome);
	}
}

/// Logs a failure that is about to be surfaced to the caller.
pub fn log_request_failure(operation: &'static str, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(operation, error = %err, "Adobe Sign request failed to complete.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, err);
	}
}

/// Logs a signing URL lookup that will be retried because the agreement is not ready yet.
pub fn log_signing_url_retry(agreement_id: &str, attempt: u32, failure: &RequestFailure) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(agreement_id, attempt, error = %failure, "Signing URLs not ready; retrying.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (agreement_id, attempt, failure);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn logging_helpers_noop_without_subscriber() {
		log_token_renewal(1, RenewalOutcome::Renewed);
		log_request_failure("get_widgets", &Error::InvalidAccessToken { code: "X".into() });
		log_signing_url_retry(
			"a-1",
			1,
			&RequestFailure { status: 404, code: Some("AGREEMENT_NOT_READY".into()), message: None },
		);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = RequestSpan::new("instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
