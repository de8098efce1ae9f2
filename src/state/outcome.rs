//! Result of a submit attempt, as seen by the presentation layer

/// Shown when Sirius could not be reached at all
pub const TRANSPORT_FAILURE_MESSAGE: &str = "something unexpected happened, try again?";

/// Derived state of the most recent submission
///
/// `Succeeded` never carries an error and `Failed` always carries a
/// non-empty message, so the success banner and the error summary can never
/// be shown together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionOutcome {
    #[default]
    NotSubmitted,
    Succeeded,
    Failed(String),
}

impl SubmissionOutcome {
    /// Build a failure, substituting `fallback` for a blank message
    pub fn failed(message: impl Into<String>, fallback: &str) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Failed(fallback.to_string())
        } else {
            Self::Failed(message)
        }
    }

    pub fn transport_failure() -> Self {
        Self::Failed(TRANSPORT_FAILURE_MESSAGE.to_string())
    }

    /// `None` until the first submission completes
    pub fn success(&self) -> Option<bool> {
        match self {
            Self::NotSubmitted => None,
            Self::Succeeded => Some(true),
            Self::Failed(_) => Some(false),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_submitted() {
        let outcome = SubmissionOutcome::default();
        assert_eq!(outcome.success(), None);
        assert_eq!(outcome.error(), None);
    }

    #[test]
    fn test_succeeded_has_no_error() {
        let outcome = SubmissionOutcome::Succeeded;
        assert_eq!(outcome.success(), Some(true));
        assert_eq!(outcome.error(), None);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_failed_exposes_message() {
        let outcome = SubmissionOutcome::failed("you what", "fallback");
        assert_eq!(outcome.success(), Some(false));
        assert_eq!(outcome.error(), Some("you what"));
    }

    #[test]
    fn test_blank_failure_uses_fallback() {
        let outcome = SubmissionOutcome::failed("  ", "fallback");
        assert_eq!(outcome.error(), Some("fallback"));
    }

    #[test]
    fn test_transport_failure_message() {
        assert_eq!(
            SubmissionOutcome::transport_failure().error(),
            Some("something unexpected happened, try again?")
        );
    }
}
