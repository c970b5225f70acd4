//! Built-in validators and value filters.
//!
//! A field carries exactly one of the two built-in validators: `Optional`
//! lets an empty value through and stops the chain, `DataRequired` rejects it.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// What the validator chain should do after a validator passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Skip the remaining validators; the value is accepted as is.
    Stop,
}

/// A submitted value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The validators a field can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validator {
    /// The value may be empty; when it is, skip remaining validation.
    Optional,
    /// The value must be present and non-empty.
    DataRequired,
}

impl Validator {
    pub fn validate(&self, value: &Value) -> Result<Flow, ValidationError> {
        match self {
            Validator::Optional if is_blank(value) => Ok(Flow::Stop),
            Validator::Optional => Ok(Flow::Continue),
            Validator::DataRequired if is_truthy(value) => Ok(Flow::Continue),
            Validator::DataRequired => Err(ValidationError::new("This field is required.")),
        }
    }
}

/// Run `validators` in order until one stops the chain or fails.
pub fn validate_chain(validators: &[Validator], value: &Value) -> Result<(), ValidationError> {
    for validator in validators {
        if validator.validate(value)? == Flow::Stop {
            trace!(?validator, "validation chain stopped");
            break;
        }
    }
    Ok(())
}

/// No submitted data at all, or only whitespace.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// A named transformation applied to a raw value before validation.
#[derive(Clone)]
pub struct Filter {
    name: String,
    func: Arc<dyn Fn(Value) -> Value + Send + Sync>,
}

impl Filter {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: Value) -> Value {
        (self.func)(value)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.name).finish()
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
