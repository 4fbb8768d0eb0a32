//! The capability contract every field validator implements
//!
//! A schema only needs two things from a child validator: run its pipeline
//! against a slot, and run it under a caller-supplied label. Both live on
//! [`ValidateField`], a closed, explicit contract — dispatch is an ordinary
//! trait-object call, never lookup by name.

use crate::foundation::error::ValidationError;
use serde_json::Value;

/// The execution surface of a built field validator.
///
/// Implementors are immutable once built: both methods take `&self` and all
/// per-call state stays inside the run, so a built validator can be reused
/// sequentially or shared across threads (`Send + Sync`).
///
/// # Examples
///
/// ```rust,ignore
/// use vetter::prelude::*;
/// use serde_json::json;
///
/// let validator = string().required().min(3);
/// let mut slot = Some(json!("abc"));
/// assert!(validator.validate(&mut slot).is_ok());
/// ```
pub trait ValidateField: Send + Sync {
    /// Runs the pipeline against `slot` using the builder-configured label
    /// (or `"value"` when none was set).
    ///
    /// After a successful call the slot reflects every cumulative mutation:
    /// default substitution, trimming, case-folding, numeric coercion,
    /// custom transforms.
    fn validate(&self, slot: &mut Option<Value>) -> Result<(), ValidationError>;

    /// Runs the pipeline with `label` overriding the configured label.
    ///
    /// The schema orchestrator calls this with the declared field name.
    fn validate_labeled(
        &self,
        label: &str,
        slot: &mut Option<Value>,
    ) -> Result<(), ValidationError>;

    /// The ordered audit trail of builder calls. Diagnostic only.
    fn rule_names(&self) -> &[&'static str];
}
