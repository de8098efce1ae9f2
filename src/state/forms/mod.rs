//! Form domain layer
//!
//! Field values for one form instance, plus the definitions that say where
//! each form submits and how its body is encoded.

mod definition;
mod field;
mod form_state;

pub use definition::{Encoding, FormDefinition};
pub use field::{FieldKind, FieldSpec, FormField};
pub use form_state::{FormController, FormError, FormSnapshot};
