//! Field selection by `only` / `exclude` name filters.
//!
//! Both filters are best-effort: names that the model does not declare are
//! ignored. Supplying both filters in one call is rejected.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormError, Result};
use crate::schema::SchemaProvider;
use crate::types::FieldMetadata;

/// Which of a model's fields to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<BTreeSet<String>>,
}

impl SelectionCriteria {
    /// Keep every declared field.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only the named fields.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: Some(names.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    /// Keep every field except the named ones.
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: None,
            exclude: Some(names.into_iter().map(Into::into).collect()),
        }
    }
}

/// The selected fields of a model, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSelection<'a> {
    fields: IndexMap<&'a str, &'a FieldMetadata>,
}

impl<'a> FieldSelection<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&'a FieldMetadata> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a FieldMetadata)> + '_ {
        self.fields.iter().map(|(name, field)| (*name, *field))
    }
}

/// Select fields of `schema` according to `criteria`.
///
/// Fails with `InvalidArgument` when both `only` and `exclude` are given,
/// whatever their contents.
pub fn select<'a, S>(schema: &'a S, criteria: &SelectionCriteria) -> Result<FieldSelection<'a>>
where
    S: SchemaProvider + ?Sized,
{
    if criteria.only.is_some() && criteria.exclude.is_some() {
        return Err(FormError::invalid_argument(
            "`only` and `exclude` are mutually exclusive",
        ));
    }

    let declared = schema.fields();
    let keep = |name: &str| match (&criteria.only, &criteria.exclude) {
        (Some(only), _) => only.contains(name),
        (None, Some(exclude)) => !exclude.contains(name),
        (None, None) => true,
    };

    let fields: IndexMap<&'a str, &'a FieldMetadata> = declared
        .iter()
        .filter(|(name, _)| keep(name.as_str()))
        .map(|(name, field)| (name.as_str(), field))
        .collect();

    debug!(
        model = schema.model_name(),
        selected = fields.len(),
        declared = declared.len(),
        "selected model fields"
    );

    Ok(FieldSelection { fields })
}

/// Select fields by optional name lists.
///
/// `only` and `exclude` may be different collection types. An absent list
/// still needs a type, e.g. `None::<[&str; 0]>`.
///
/// ```
/// use modelform::{model_fields, FieldMetadata, FieldType, ModelSchema};
///
/// let person = ModelSchema::builder("Person")
///     .field(FieldMetadata::new("name", FieldType::String))
///     .field(FieldMetadata::new("age", FieldType::Integer))
///     .build()?;
///
/// let fields = model_fields(&person, Some(vec![String::from("age")]), None::<[&str; 0]>)?;
/// assert_eq!(fields.names().collect::<Vec<_>>(), vec!["age"]);
/// # Ok::<(), modelform::FormError>(())
/// ```
pub fn model_fields<'a, S, O, E>(
    schema: &'a S,
    only: Option<O>,
    exclude: Option<E>,
) -> Result<FieldSelection<'a>>
where
    S: SchemaProvider + ?Sized,
    O: IntoIterator,
    O::Item: Into<String>,
    E: IntoIterator,
    E::Item: Into<String>,
{
    let criteria = SelectionCriteria {
        only: only.map(|names| names.into_iter().map(Into::into).collect()),
        exclude: exclude.map(|names| names.into_iter().map(Into::into).collect()),
    };
    select(schema, &criteria)
}
