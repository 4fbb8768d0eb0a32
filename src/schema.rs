//! Schema orchestrator: named field validators over a keyed container
//!
//! A [`Schema`] is an *ordered* sequence of `(name, validator)` pairs.
//! Declaration order is validation order, which makes first-error selection
//! deterministic. Each field's validator runs against a fresh slot seeded
//! from the container, labeled with the field name, and the resulting slot
//! is written back — that is how defaults and coercions become visible to
//! the caller.

use crate::foundation::{ValidateField, ValidationError};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Failure modes of [`Schema::validate_value`].
///
/// Handing the schema something other than an object is a usage fault, kept
/// apart from ordinary per-field validation failures.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The input value is not a JSON object.
    #[error("schema input must be an object, got {actual}")]
    NotAnObject {
        /// The JSON kind actually supplied.
        actual: &'static str,
    },

    /// A declared field failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

// ============================================================================
// SCHEMA
// ============================================================================

/// An ordered association of field names to child validators.
///
/// # Examples
///
/// ```rust,ignore
/// use vetter::prelude::*;
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field("name", string().required().min(3))
///     .field("age", number().integer().default(18.0));
///
/// let mut input = json!({"name": "alice"});
/// schema.validate_value(&mut input)?;
/// assert_eq!(input["age"], json!(18.0));
/// ```
#[derive(Default)]
pub struct Schema {
    fields: Vec<(String, Box<dyn ValidateField>)>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declares a field. Fields are validated in declaration order; the
    /// field name becomes the child's label.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, validator: impl ValidateField + 'static) -> Self {
        self.fields.push((name.into(), Box::new(validator)));
        self
    }

    /// The declared field names, in validation order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates `object` against every declared field, in declaration
    /// order, aborting on the first failure.
    ///
    /// Each field's slot is seeded with a copy of the container value
    /// (absent when the key is missing) and validated under the field name
    /// as label. On success the slot is written back: a newly defaulted
    /// value inserts its key, and a slot the validator left absent removes
    /// it. No multi-field error aggregation takes place.
    pub fn validate(&self, object: &mut Map<String, Value>) -> Result<(), ValidationError> {
        for (name, validator) in &self.fields {
            let mut slot = object.get(name).cloned();
            validator.validate_labeled(name, &mut slot)?;
            match slot {
                Some(value) => {
                    object.insert(name.clone(), value);
                }
                None => {
                    object.remove(name);
                }
            }
        }
        Ok(())
    }

    /// Validates a [`Value`] that must be a JSON object.
    ///
    /// A non-object input is a [`SchemaError::NotAnObject`] usage fault,
    /// not a per-field validation failure.
    pub fn validate_value(&self, value: &mut Value) -> Result<(), SchemaError> {
        match value {
            Value::Object(object) => self.validate(object).map_err(SchemaError::from),
            other => Err(SchemaError::NotAnObject {
                actual: crate::foundation::kind_name(other),
            }),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
