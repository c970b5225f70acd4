//! The seam to the target form library.
//!
//! A form library plugs in by implementing [`ValidatorFactory`] for its
//! validator constructors and [`FormBackend`] for its field constructors.
//! [`DescriptorBackend`] is the bundled implementation: it produces plain,
//! serializable field descriptors.

use serde::Serialize;

use crate::options::FieldOptions;
use crate::types::FieldKind;
use crate::validators::Validator;

/// Constructors for the two validators a derived field can carry.
pub trait ValidatorFactory {
    type Validator;

    /// A validator that accepts empty values and ends validation for them.
    fn optional(&self) -> Self::Validator;

    /// A validator that rejects empty values.
    fn data_required(&self) -> Self::Validator;
}

/// Constructs form fields from derived options.
pub trait FormBackend: ValidatorFactory {
    type Field;

    fn build_field(
        &self,
        name: &str,
        kind: FieldKind,
        options: FieldOptions<Self::Validator>,
    ) -> Self::Field;
}

/// A form field as plain data.
#[derive(Debug, Clone, Serialize)]
pub struct FormFieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    #[serde(flatten)]
    pub options: FieldOptions<Validator>,
}

/// Backend producing [`FormFieldDescriptor`]s with the built-in validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorBackend;

impl ValidatorFactory for DescriptorBackend {
    type Validator = Validator;

    fn optional(&self) -> Validator {
        Validator::Optional
    }

    fn data_required(&self) -> Validator {
        Validator::DataRequired
    }
}

impl FormBackend for DescriptorBackend {
    type Field = FormFieldDescriptor;

    fn build_field(
        &self,
        name: &str,
        kind: FieldKind,
        options: FieldOptions<Validator>,
    ) -> FormFieldDescriptor {
        FormFieldDescriptor {
            name: name.to_string(),
            kind,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::field_options;
    use crate::types::{FieldMetadata, FieldType};
    use serde_json::json;

    #[test]
    fn descriptor_serializes_flat() {
        let field = FieldMetadata::new("identifier", FieldType::String);
        let options = field_options(&field, None, None);
        let descriptor = DescriptorBackend.build_field("identifier", FieldKind::Text, options);
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "name": "identifier",
                "kind": "text",
                "default": null,
                "label": "identifier",
                "description": "",
                "filters": [],
                "validators": ["data-required"],
            })
        );
    }
}
