//! Construction options for a single form field.

use serde::Serialize;
use tracing::trace;

use crate::backend::{DescriptorBackend, ValidatorFactory};
use crate::types::{FieldDefault, FieldMetadata};
use crate::validators::{Filter, Validator};

/// Everything a form library needs to construct one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldOptions<V = Validator> {
    /// `None` when the model declares no default.
    pub default: Option<FieldDefault>,
    pub label: String,
    pub description: String,
    pub filters: Vec<Filter>,
    pub validators: Vec<V>,
}

/// Derive construction options for `field`.
///
/// `required` overrides the field's own required flag and `label` replaces
/// the field name as label. A default factory is handed over uninvoked.
pub fn derive<F>(
    field: &FieldMetadata,
    required: Option<bool>,
    label: Option<&str>,
    validators: &F,
) -> FieldOptions<F::Validator>
where
    F: ValidatorFactory + ?Sized,
{
    let default = match (field.default_value(), field.default_factory()) {
        (Some(value), _) => Some(value.clone()),
        (None, Some(factory)) => Some(FieldDefault::Callable(factory.clone())),
        (None, None) => None,
    };

    let required = required.unwrap_or_else(|| field.required());
    let validator = if field.declared_type().admits_none() || !required {
        validators.optional()
    } else {
        validators.data_required()
    };

    trace!(field = field.name(), required, "derived field options");

    FieldOptions {
        default,
        label: label.unwrap_or(field.name()).to_string(),
        description: field.description().to_string(),
        filters: Vec::new(),
        validators: vec![validator],
    }
}

/// Derive options with the built-in validators.
pub fn field_options(
    field: &FieldMetadata,
    required: Option<bool>,
    label: Option<&str>,
) -> FieldOptions {
    derive(field, required, label, &DescriptorBackend)
}
