//! Per-form state: field values and the latest submission outcome

mod forms;
mod outcome;

pub use forms::*;
pub use outcome::*;
