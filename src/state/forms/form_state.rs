//! Form state controller
//!
//! Holds the values of one form instance. Every declared field always has a
//! string value; names outside the definition are rejected. Subscribers
//! receive a fresh [`FormSnapshot`] after every mutation.

use super::definition::FormDefinition;
use super::field::FormField;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("form `{form}` has no field named `{field}`")]
    UnknownField { form: &'static str, field: String },
}

/// Immutable view of every field value, in declared order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    fields: Vec<FormField>,
}

impl FormSnapshot {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .map(FormField::value)
    }

    /// `(name, value)` pairs that go on the wire, in declared order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|f| f.is_sent())
            .map(|f| (f.name(), f.value()))
    }

    /// Fields with their specs, for encoders that need each field's kind
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Mutable record of one form's fields, reset after a successful submit
#[derive(Debug)]
pub struct FormController {
    definition: FormDefinition,
    fields: Vec<FormField>,
    notifier: watch::Sender<FormSnapshot>,
}

impl FormController {
    pub fn new(definition: FormDefinition) -> Self {
        let fields: Vec<FormField> = definition
            .fields
            .iter()
            .cloned()
            .map(FormField::new)
            .collect();
        let (notifier, _) = watch::channel(FormSnapshot {
            fields: fields.clone(),
        });
        Self {
            definition,
            fields,
            notifier,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    /// Set one field. Unknown names are a programming error and are
    /// rejected without touching the form.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let Some(field) = self.fields.iter_mut().find(|f| f.name() == name) else {
            tracing::warn!(form = self.definition.name, field = name, "rejected unknown field");
            return Err(FormError::UnknownField {
                form: self.definition.name,
                field: name.to_string(),
            });
        };
        field.set(value.into());
        self.publish();
        Ok(())
    }

    /// Put every declared field back to its initial value: empty, or the
    /// fixed value of a hidden field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        tracing::debug!(form = self.definition.name, "form reset");
        self.publish();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields.clone(),
        }
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.notifier.subscribe()
    }

    fn publish(&self) {
        self.notifier.send_replace(self.snapshot());
    }
}
