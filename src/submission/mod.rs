//! Form submission and request-result reconciliation

mod coordinator;
mod errors;
mod payload;

pub use coordinator::{SubmissionCoordinator, SubmitError};
pub use errors::{extract_message, fallback_message};
pub use payload::{encode, EncodeError};
