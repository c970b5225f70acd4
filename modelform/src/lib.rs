//! Form-field descriptors from declarative model schemas
//!
//! `modelform` reads the declared fields of a model (type, default, default
//! factory, required flag, description) and derives, per field, the options a
//! web form library needs to construct it: default, label, description,
//! filters and validators.
//!
//! # Architecture
//!
//! - **Selection**: `only` / `exclude` name filters, mutually exclusive, best-effort
//! - **Derivation**: one `Optional` or `DataRequired` validator per field, decided
//!   by the field's optionality and the caller's override
//! - **Backends**: the form library plugs in through [`FormBackend`]; the bundled
//!   [`DescriptorBackend`] emits serializable descriptors
//! - **Schemas**: any [`SchemaProvider`]; [`ModelSchema`] is built in code or
//!   loaded from YAML

pub mod backend;
pub mod config;
pub mod converter;
pub mod error;
pub mod options;
pub mod schema;
pub mod selector;
pub mod types;
pub mod validators;

pub use backend::{DescriptorBackend, FormBackend, FormFieldDescriptor, ValidatorFactory};
pub use config::ConverterConfig;
pub use converter::{Converter, Form};
pub use error::{FormError, Result};
pub use options::{derive, field_options, FieldOptions};
pub use schema::{FactoryRegistry, ModelSchema, ModelSchemaBuilder, SchemaProvider};
pub use selector::{model_fields, select, FieldSelection, SelectionCriteria};
pub use types::{DefaultFactory, FieldDefault, FieldKind, FieldMetadata, FieldType};
pub use validators::{validate_chain, Filter, Flow, ValidationError, Validator};
