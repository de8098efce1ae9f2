//! Form field value objects

use std::borrow::Cow;
use std::fmt;

/// How a field's string value is typed in a JSON body. Form bodies always
/// carry the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    /// Integer; values that do not parse are sent as strings
    Number,
    /// Boolean; only `"true"` is true
    Flag,
    /// Comma-separated list of strings
    List,
}

/// Static description of a field a form accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, sent to Sirius as-is
    pub name: Cow<'static, str>,
    /// Label shown next to the input
    pub label: &'static str,
    pub kind: FieldKind,
    /// Passwords and similar values that must never be printed
    pub is_secret: bool,
    /// Left out of the body entirely while the value is empty
    pub omit_when_empty: bool,
    /// Not asked for; carries a fixed value set by the definition
    pub is_hidden: bool,
    /// Value the field starts with and returns to on reset
    pub initial: Cow<'static, str>,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            label,
            kind: FieldKind::Text,
            is_secret: false,
            omit_when_empty: false,
            is_hidden: false,
            initial: Cow::Borrowed(""),
        }
    }

    pub const fn secret(name: &'static str, label: &'static str) -> Self {
        let mut spec = Self::text(name, label);
        spec.is_secret = true;
        spec
    }

    /// A field the user never sees, e.g. a record id echoed back to Sirius
    pub fn hidden(
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            label: "",
            kind: FieldKind::Text,
            is_secret: false,
            omit_when_empty: false,
            is_hidden: true,
            initial: value.into(),
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn omit_when_empty(mut self) -> Self {
        self.omit_when_empty = true;
        self
    }
}

/// A single form field with its current value
#[derive(Clone, PartialEq, Eq)]
pub struct FormField {
    pub spec: FieldSpec,
    value: String,
}

impl FormField {
    /// Create a field holding its initial value
    pub fn new(spec: FieldSpec) -> Self {
        let value = spec.initial.to_string();
        Self { spec, value }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole value
    pub fn set(&mut self, value: String) {
        self.value = value;
    }

    /// Go back to the initial value
    pub fn reset(&mut self) {
        self.value.clear();
        self.value.push_str(&self.spec.initial);
    }

    /// Whether the field goes into the request body
    pub fn is_sent(&self) -> bool {
        !(self.spec.omit_when_empty && self.value.is_empty())
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.spec.is_secret {
            "[redacted]"
        } else {
            self.value.as_str()
        };
        f.debug_struct("FormField")
            .field("name", &self.spec.name)
            .field("value", &value)
            .finish()
    }
}
