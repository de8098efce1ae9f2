//! Sirius user management form core
//!
//! Holds the field values of the user, team and password forms, submits them
//! to the Sirius API and turns the response into a success banner or an error
//! summary for the presentation layer.

pub mod config;
pub mod sirius;
pub mod state;
pub mod submission;

pub use config::AppConfig;
pub use sirius::{ApiRequest, RequestAdapter, RequestResult, SiriusClient, TransportError};
pub use state::{
    Encoding, FieldKind, FieldSpec, FormController, FormDefinition, FormError, FormField,
    FormSnapshot, SubmissionOutcome,
};
pub use submission::{SubmissionCoordinator, SubmitError};
