//! Error types for validation failures and configuration faults
//!
//! Two disjoint categories live here:
//!
//! - [`ValidationError`] — expected, recoverable failures returned to the
//!   caller as labeled messages (wrong kind, bound violation, pattern
//!   mismatch, missing required field, ...).
//! - [`BuildError`] — configuration faults surfaced when a rule is *built*
//!   (invalid regex pattern, allowed-set element of the wrong kind). These
//!   never travel through the validation pipeline.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes.

use serde::Serialize;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure with a machine-readable code, a
/// human-readable labeled message, and optional parameters.
///
/// # Examples
///
/// ```rust,ignore
/// use vetter::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "name must be at least 3 length")
///     .with_field("name")
///     .with_param("min", "3")
///     .with_param("actual", "2");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Examples: "min_length", "not_a_string", "required"
    pub code: Cow<'static, str>,

    /// Human-readable message, prefixed with the field label.
    pub message: Cow<'static, str>,

    /// The label of the slot that failed validation, if known.
    pub field: Option<Cow<'static, str>>,

    /// Parameters for the message, stored as ordered key-value pairs
    /// (typically 0-3 entries, hence the small vector).
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    ///
    /// Static strings allocate nothing; dynamic messages allocate once.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
        }
    }

    /// Sets the field label for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Converts the error to a JSON value for transport.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "field": self.field,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// BUILD ERROR
// ============================================================================

/// A configuration fault raised while a rule is being built.
///
/// These are programmer errors, not input errors: an invalid regex pattern
/// or an allowed-set element that can never coerce to the validator's kind.
/// They are surfaced at construction time and never returned from
/// `validate`.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The pattern handed to a regex rule does not compile.
    #[error("invalid regex pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An allowed-set element is of a kind the validator cannot coerce.
    #[error("cannot coerce allowed value of kind {found} to {expected}")]
    Coercion {
        /// The kind the validator accepts ("string" or "number").
        expected: &'static str,
        /// The JSON kind of the offending element.
        found: &'static str,
    },
}

// ============================================================================
// TESTS
// ============================================================================
