//! Core validation types and traits
//!
//! The fundamental building blocks of the engine:
//!
//! - **Traits**: [`ValidateField`] — the capability contract of a built
//!   validator
//! - **Pipeline**: [`Pipeline`], [`Rule`], [`RuleContext`] — the shared
//!   execution model every concrete validator obeys
//! - **Errors**: [`ValidationError`] for recoverable validation failures,
//!   [`BuildError`] for construction-time configuration faults
//!
//! # Architecture
//!
//! A validator is built once (builder calls accumulate rules) and executed
//! many times. Execution threads an explicit [`RuleContext`] — label,
//! frozen snapshot, required flag — through the rule list instead of
//! mutating shared validator state, which keeps a built validator safe to
//! reuse and to share.

// Module declarations
pub mod error;
pub mod rule;
pub mod traits;

// Re-export everything at the foundation level for convenience
pub use error::{BuildError, ValidationError};
pub use rule::{Helpers, Pipeline, Rule, RuleContext, DEFAULT_LABEL, present};
pub use traits::ValidateField;

use serde_json::Value;

// ============================================================================
// UTILITIES
// ============================================================================

/// Names the JSON kind of a value, for error messages.
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// A validation result using the standard [`ValidationError`].
pub type ValidationResult<T> = Result<T, ValidationError>;

// ============================================================================
// TESTS
// ============================================================================
