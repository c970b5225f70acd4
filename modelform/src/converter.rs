//! Turns a whole model schema into form fields.
//!
//! The converter selects fields with the configured criteria, derives options
//! for each of them and hands the options to its [`FormBackend`].

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::backend::{DescriptorBackend, FormBackend};
use crate::config::ConverterConfig;
use crate::error::Result;
use crate::options::{self, FieldOptions};
use crate::schema::SchemaProvider;
use crate::selector;
use crate::types::FieldMetadata;

/// The fields generated for one model, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct Form<F> {
    pub name: String,
    pub fields: IndexMap<String, F>,
}

impl<F> Form<F> {
    pub fn field(&self, name: &str) -> Option<&F> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Converts model schemas into fields of a form library.
pub struct Converter<B> {
    backend: B,
    config: ConverterConfig,
}

impl<B: FormBackend> Converter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: ConverterConfig::default(),
        }
    }

    /// Apply selection criteria and per-field overrides from `config` in `convert`.
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Derive options for a single field using the backend's validators.
    ///
    /// Only the explicit arguments are applied; configured overrides are not.
    pub fn field_options(
        &self,
        field: &FieldMetadata,
        required: Option<bool>,
        label: Option<&str>,
    ) -> FieldOptions<B::Validator> {
        options::derive(field, required, label, &self.backend)
    }

    /// Build one form field per selected model field.
    pub fn convert<S>(&self, schema: &S) -> Result<Form<B::Field>>
    where
        S: SchemaProvider + ?Sized,
    {
        let selection = selector::select(schema, &self.config.selection())?;

        let fields: IndexMap<String, B::Field> = selection
            .iter()
            .map(|(name, field)| {
                let options = self.field_options(
                    field,
                    self.config.required_for(name),
                    self.config.label_for(name),
                );
                let kind = field.declared_type().field_kind();
                (
                    name.to_string(),
                    self.backend.build_field(name, kind, options),
                )
            })
            .collect();

        debug!(
            model = schema.model_name(),
            fields = fields.len(),
            "converted model to form"
        );

        Ok(Form {
            name: schema.model_name().to_string(),
            fields,
        })
    }
}

impl Default for Converter<DescriptorBackend> {
    fn default() -> Self {
        Self::new(DescriptorBackend)
    }
}
