//! Model schemas: the ordered field registry a form is derived from.
//!
//! Anything that can hand out an ordered `name → FieldMetadata` mapping
//! implements [`SchemaProvider`]. [`ModelSchema`] is the bundled provider; it
//! is built in code with [`ModelSchema::builder`] or loaded from YAML:
//!
//! ```yaml
//! name: Person
//! fields:
//!   - name: identifier
//!     type: { kind: string }
//!   - name: name
//!     type: { kind: string }
//!     default: Klaus
//!   - name: age
//!     type: { kind: integer }
//!     default_factory: adult_age
//! ```

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::types::{DefaultFactory, FieldMetadata, FieldType};

/// Read access to a model's declared fields, in declaration order.
pub trait SchemaProvider {
    fn model_name(&self) -> &str;

    fn fields(&self) -> &IndexMap<String, FieldMetadata>;

    fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields().get(name)
    }
}

/// A named model and its declared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    fields: IndexMap<String, FieldMetadata>,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Parse a schema from YAML, resolving `default_factory` names through `factories`.
    pub fn from_yaml(yaml: &str, factories: &FactoryRegistry) -> Result<Self> {
        let raw: RawSchema = serde_yaml_ng::from_str(yaml)?;
        let mut builder = ModelSchema::builder(raw.name);
        for field in raw.fields {
            builder = builder.field(field.into_metadata(factories)?);
        }
        builder.build()
    }

    /// Read and parse a schema file.
    pub async fn load(path: impl AsRef<Path>, factories: &FactoryRegistry) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let schema = Self::from_yaml(&content, factories)?;
        debug!(
            path = %path.display(),
            model = %schema.name,
            fields = schema.fields.len(),
            "loaded model schema"
        );
        Ok(schema)
    }
}

impl SchemaProvider for ModelSchema {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> &IndexMap<String, FieldMetadata> {
        &self.fields
    }
}

/// Builder for `ModelSchema`. Created by `ModelSchema::builder()`.
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldMetadata>,
}

impl ModelSchemaBuilder {
    /// Declare the next field.
    pub fn field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the schema, rejecting duplicate field names.
    pub fn build(self) -> Result<ModelSchema> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for field in self.fields {
            let name = field.name().to_string();
            if fields.contains_key(&name) {
                return Err(FormError::DuplicateField {
                    model: self.name,
                    name,
                });
            }
            fields.insert(name, field);
        }
        Ok(ModelSchema {
            name: self.name,
            fields,
        })
    }
}

/// Named default factories that schema files may refer to.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, DefaultFactory>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under its own name.
    pub fn register(mut self, factory: DefaultFactory) -> Self {
        self.factories.insert(factory.name().to_string(), factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DefaultFactory> {
        self.factories.get(name)
    }
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    name: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    declared_type: FieldType,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    default_factory: Option<String>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    description: Option<String>,
}

impl RawField {
    fn into_metadata(self, factories: &FactoryRegistry) -> Result<FieldMetadata> {
        let mut field = FieldMetadata::new(self.name, self.declared_type);
        if let Some(value) = self.default {
            field = field.with_default(value);
        }
        if let Some(factory_name) = self.default_factory {
            let factory = factories.get(&factory_name).cloned().ok_or_else(|| {
                FormError::UnknownFactory {
                    field: field.name().to_string(),
                    factory: factory_name.clone(),
                }
            })?;
            field = field.with_default_factory(factory);
        }
        if let Some(required) = self.required {
            field = field.with_required(required);
        }
        if let Some(description) = self.description {
            field = field.with_description(description);
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldDefault;
    use serde_json::json;
    use tempfile::TempDir;

    const PERSON_YAML: &str = r#"
name: Person
fields:
  - name: identifier
    type: { kind: string }
  - name: name
    type: { kind: string }
    default: Klaus
    description: Given name
  - name: age
    type: { kind: integer }
    default_factory: adult_age
"#;

    fn factories() -> FactoryRegistry {
        FactoryRegistry::new().register(DefaultFactory::new("adult_age", || json!(18)))
    }

    #[test]
    fn from_yaml_keeps_declaration_order() {
        let schema = ModelSchema::from_yaml(PERSON_YAML, &factories()).unwrap();
        assert_eq!(schema.model_name(), "Person");
        let names: Vec<&str> = schema.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["identifier", "name", "age"]);
    }

    #[test]
    fn from_yaml_reads_defaults_and_descriptions() {
        let registry = factories();
        let schema = ModelSchema::from_yaml(PERSON_YAML, &registry).unwrap();

        let name = schema.field("name").unwrap();
        assert_eq!(
            name.default_value(),
            Some(&FieldDefault::Value(json!("Klaus")))
        );
        assert_eq!(name.description(), "Given name");
        assert!(!name.required());

        let age = schema.field("age").unwrap();
        assert_eq!(age.default_factory(), registry.get("adult_age"));
        assert!(!age.required());

        assert!(schema.field("identifier").unwrap().required());
    }

    #[test]
    fn from_yaml_rejects_unknown_factory() {
        let err = ModelSchema::from_yaml(PERSON_YAML, &FactoryRegistry::new()).unwrap_err();
        match err {
            FormError::UnknownFactory { field, factory } => {
                assert_eq!(field, "age");
                assert_eq!(factory, "adult_age");
            }
            other => panic!("expected UnknownFactory, got {other:?}"),
        }
    }

    #[test]
    fn builder_rejects_duplicate_fields() {
        let err = ModelSchema::builder("Person")
            .field(FieldMetadata::new("name", FieldType::String))
            .field(FieldMetadata::new("name", FieldType::Integer))
            .build()
            .unwrap_err();
        assert!(matches!(err, FormError::DuplicateField { ref name, .. } if name == "name"));
    }

    #[test]
    fn explicit_required_is_read() {
        let yaml = r#"
name: UserInfo
fields:
  - name: email
    type: { kind: optional, inner: { kind: string } }
    required: true
"#;
        let schema = ModelSchema::from_yaml(yaml, &FactoryRegistry::new()).unwrap();
        assert!(schema.field("email").unwrap().required());
    }

    #[tokio::test]
    async fn load_reads_schema_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("person.yaml");
        std::fs::write(&path, PERSON_YAML).unwrap();

        let schema = ModelSchema::load(&path, &factories()).await.unwrap();
        assert_eq!(schema.fields().len(), 3);
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = ModelSchema::load(temp.path().join("missing.yaml"), &factories())
            .await
            .unwrap_err();
        assert!(matches!(err, FormError::Io(_)));
    }
}
