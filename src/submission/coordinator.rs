//! One submit cycle: encode, send, classify, publish, reset
//!
//! The coordinator is the only writer of its [`SubmissionOutcome`]. Each
//! completed attempt replaces the outcome in a single step, so subscribers
//! never see a success flag paired with a stale error.

use super::errors::{extract_message, fallback_message};
use super::payload::{encode, EncodeError};
use crate::sirius::{ApiRequest, RequestAdapter, RequestResult};
use crate::state::{FormController, SubmissionOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Clears the in-flight flag when the attempt ends, including when the
/// `submit` future is dropped before completing.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs submissions of one form against a [`RequestAdapter`]
pub struct SubmissionCoordinator<A: RequestAdapter> {
    adapter: Arc<A>,
    outcome: watch::Sender<SubmissionOutcome>,
    in_flight: AtomicBool,
}

impl<A: RequestAdapter> SubmissionCoordinator<A> {
    pub fn new(adapter: Arc<A>) -> Self {
        let (outcome, _) = watch::channel(SubmissionOutcome::NotSubmitted);
        Self {
            adapter,
            outcome,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Latest published outcome
    pub fn outcome(&self) -> SubmissionOutcome {
        self.outcome.borrow().clone()
    }

    /// Receive every published outcome
    pub fn subscribe(&self) -> watch::Receiver<SubmissionOutcome> {
        self.outcome.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the form once.
    ///
    /// A second call while one is pending is refused with
    /// [`SubmitError::InFlight`] and leaves the outcome untouched. There are
    /// no retries. On success the form is reset; on failure it keeps the
    /// user's input.
    pub async fn submit(&self, form: &mut FormController) -> Result<SubmissionOutcome, SubmitError> {
        let name = form.definition().name;
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            tracing::debug!(form = name, "ignored overlapping submit");
            SubmitError::InFlight
        })?;

        let request = build_request(form)?;
        tracing::debug!(
            form = name,
            method = %request.method,
            path = %request.path,
            "submitting form"
        );

        let outcome = match self.adapter.send(request).await {
            Ok(result) => classify(&result),
            Err(e) => {
                tracing::warn!(form = name, error = %e, "submission transport failed");
                SubmissionOutcome::transport_failure()
            }
        };

        tracing::info!(
            form = name,
            success = outcome.is_success(),
            "submission finished"
        );
        self.outcome.send_replace(outcome.clone());

        if outcome.is_success() {
            form.reset();
        }

        Ok(outcome)
    }
}

fn build_request(form: &FormController) -> Result<ApiRequest, SubmitError> {
    let definition = form.definition();
    let snapshot = form.snapshot();
    let request = ApiRequest::new(definition.method.clone(), definition.path.clone());
    if snapshot.is_empty() {
        return Ok(request);
    }

    Ok(request
        .with_header("Content-Type", definition.encoding.content_type())
        .with_body(encode(&snapshot, definition.encoding)?))
}

/// Only the status decides success; the body is read for failures only.
fn classify(result: &RequestResult) -> SubmissionOutcome {
    if result.status < 400 {
        return SubmissionOutcome::Succeeded;
    }

    let fallback = fallback_message(result.status);
    match extract_message(result.body.as_ref()) {
        Some(message) => SubmissionOutcome::failed(message, &fallback),
        None => SubmissionOutcome::Failed(fallback),
    }
}
