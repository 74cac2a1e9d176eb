// self
use crate::obs::{RenewalOutcome, RequestOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(operation: &'static str, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"adobe_sign_request_total",
			"operation" => operation,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records a token renewal outcome via the global metrics recorder (when enabled).
pub fn record_token_renewal(outcome: RenewalOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("adobe_sign_token_renewal_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_request_outcome("get_agreement", RequestOutcome::Failure);
		record_token_renewal(RenewalOutcome::Failed);
	}
}
