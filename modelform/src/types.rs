//! Core field types consumed from a model schema.
//!
//! A `FieldMetadata` describes one declared attribute of a model: its type,
//! its default (literal or factory), whether it is required and its
//! description. The converter only reads these values.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

/// The declared type of a model field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    List { item: Box<FieldType> },
    /// The type itself admits an absent value.
    Optional { inner: Box<FieldType> },
    /// Any type the schema provider could not describe further.
    Custom { name: String },
}

impl FieldType {
    /// Wrap a type so that it admits an absent value.
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn list(item: FieldType) -> Self {
        FieldType::List {
            item: Box::new(item),
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        FieldType::Custom { name: name.into() }
    }

    /// Whether the declared type accepts an absent value at the type level.
    pub fn admits_none(&self) -> bool {
        matches!(self, FieldType::Optional { .. })
    }

    /// Strip optional wrappers and return the underlying type.
    pub fn inner(&self) -> &FieldType {
        match self {
            FieldType::Optional { inner } => inner.inner(),
            other => other,
        }
    }

    /// The form field kind used to render a value of this type.
    ///
    /// Types without a dedicated kind fall back to `Text`.
    pub fn field_kind(&self) -> FieldKind {
        match self {
            FieldType::Optional { inner } => inner.field_kind(),
            FieldType::String => FieldKind::Text,
            FieldType::Integer => FieldKind::Integer,
            FieldType::Float => FieldKind::Float,
            FieldType::Decimal => FieldKind::Decimal,
            FieldType::Boolean => FieldKind::Boolean,
            FieldType::Date => FieldKind::Date,
            FieldType::DateTime => FieldKind::DateTime,
            FieldType::List { .. } => FieldKind::List,
            FieldType::Custom { name } => {
                warn!(type_name = %name, "no form field kind for custom type, using text");
                FieldKind::Text
            }
        }
    }
}

/// The kind of form control a field is rendered with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    List,
}

/// A named zero-argument callable producing a default value.
///
/// Factories compare by identity: two handles are equal only when they share
/// the same underlying closure.
#[derive(Clone)]
pub struct DefaultFactory {
    name: String,
    func: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl DefaultFactory {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the factory.
    pub fn call(&self) -> Value {
        (self.func)()
    }
}

impl PartialEq for DefaultFactory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultFactory").field(&self.name).finish()
    }
}

impl Serialize for DefaultFactory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("factory", &self.name)?;
        map.end()
    }
}

/// A default as handed to the form library.
///
/// Serialized untagged: a literal becomes the value itself and a callable
/// becomes `{"factory": "<name>"}`. A literal that is itself an object with a
/// single `factory` key serializes identically, so JSON consumers cannot tell
/// the two apart; Rust callers match on the variant instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Value(Value),
    /// A callable the form library invokes when it renders the field.
    Callable(DefaultFactory),
}

impl FieldDefault {
    /// Produce the concrete value, invoking the callable if there is one.
    pub fn resolve(&self) -> Value {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Callable(factory) => factory.call(),
        }
    }
}

/// Metadata for one declared model field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadata {
    name: String,
    declared_type: FieldType,
    default_value: Option<FieldDefault>,
    default_factory: Option<DefaultFactory>,
    required: Option<bool>,
    description: Option<String>,
}

impl FieldMetadata {
    pub fn new(name: impl Into<String>, declared_type: FieldType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            default_value: None,
            default_factory: None,
            required: None,
            description: None,
        }
    }

    /// Set a literal default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Set a callable as the literal default. It is never invoked by the converter.
    pub fn with_callable_default(mut self, factory: DefaultFactory) -> Self {
        self.default_value = Some(FieldDefault::Callable(factory));
        self
    }

    pub fn with_default_factory(mut self, factory: DefaultFactory) -> Self {
        self.default_factory = Some(factory);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// State the required flag explicitly instead of inferring it.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    pub fn default_value(&self) -> Option<&FieldDefault> {
        self.default_value.as_ref()
    }

    pub fn default_factory(&self) -> Option<&DefaultFactory> {
        self.default_factory.as_ref()
    }

    /// Description text, empty when the schema declares none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Whether a value must be supplied.
    ///
    /// Unless stated explicitly, a field is required when it has no default,
    /// no default factory and its type does not admit an absent value.
    pub fn required(&self) -> bool {
        self.required.unwrap_or_else(|| {
            self.default_value.is_none()
                && self.default_factory.is_none()
                && !self.declared_type.admits_none()
        })
    }
}
