//! Number-kind field validator
//!
//! Numbers are compared as `f64`. The base rule does the coercion work:
//! a numeric string snapshot is parsed and the parsed number replaces the
//! working value before any later rule runs, so later rules may assume a
//! numeric working value. This is the one base rule that mutates — the
//! string base never does.

use crate::foundation::{BuildError, Helpers, Pipeline, ValidateField, ValidationError};
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Builds a number-kind validator.
///
/// # Examples
///
/// ```rust,ignore
/// use vetter::prelude::*;
/// use serde_json::json;
///
/// let age = number().integer().min(0.0).max(150.0);
/// let mut slot = Some(json!("42"));
/// age.validate(&mut slot)?;
/// assert_eq!(slot, Some(json!(42.0)));
/// ```
#[must_use]
pub fn number() -> NumberValidator {
    NumberValidator::new()
}

/// A number-kind validator: an ordered rule pipeline plus numeric bounds,
/// membership, and the integer check.
#[derive(Debug)]
pub struct NumberValidator {
    pipeline: Pipeline,
}

impl NumberValidator {
    /// Creates the validator with its base rule at index 0.
    ///
    /// An absent snapshot passes. A string snapshot is parsed as `f64` and
    /// the parsed number overwrites the working value; an unparseable (or
    /// non-finite) string fails with `"<label> not a number"`. A numeric
    /// snapshot passes unchanged. Any other kind fails.
    pub fn new() -> Self {
        let mut pipeline = Pipeline::new();
        pipeline.push("base", |slot, ctx| match ctx.original() {
            None => Ok(()),
            Some(Value::String(s)) => match s.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(parsed) => {
                    *slot = Some(Value::Number(parsed));
                    Ok(())
                }
                None => Err(ctx.failure(
                    "not_a_number",
                    format!("{} not a number", ctx.label()),
                )),
            },
            Some(Value::Number(_)) => Ok(()),
            Some(_) => Err(ctx.failure(
                "not_a_number",
                format!("{} not a number", ctx.label()),
            )),
        });
        Self { pipeline }
    }

    /// Requires the input to be present; fails with `"<label> must be
    /// defined"` when absent. The check reads the flag at validate time, so
    /// a later [`optional`] call defuses it — last call wins.
    ///
    /// [`optional`]: NumberValidator::optional
    pub fn required(mut self) -> Self {
        self.pipeline.set_required(true);
        self.pipeline.push("required", |_slot, ctx| {
            if ctx.required() && ctx.original().is_none() {
                return Err(ctx.failure(
                    "required",
                    format!("{} must be defined", ctx.label()),
                ));
            }
            Ok(())
        });
        self
    }

    /// Clears the required flag.
    pub fn optional(mut self) -> Self {
        self.pipeline.set_required(false);
        self.pipeline.note("optional");
        self
    }

    /// Requires the snapshot's numeric value to be at least `min`.
    /// Skipped when the snapshot is absent.
    pub fn min(mut self, min: f64) -> Self {
        self.pipeline.push("min", move |_slot, ctx| {
            if ctx.original().is_none() {
                return Ok(());
            }
            let actual = ctx.original_number().unwrap_or(0.0);
            if actual < min {
                return Err(ctx
                    .failure(
                        "min",
                        format!("{} must be greater than or equal to {}", ctx.label(), min),
                    )
                    .with_param("min", min.to_string())
                    .with_param("actual", actual.to_string()));
            }
            Ok(())
        });
        self
    }

    /// Requires the snapshot's numeric value to be at most `max`.
    /// Skipped when the snapshot is absent.
    pub fn max(mut self, max: f64) -> Self {
        self.pipeline.push("max", move |_slot, ctx| {
            if ctx.original().is_none() {
                return Ok(());
            }
            let actual = ctx.original_number().unwrap_or(0.0);
            if actual > max {
                return Err(ctx
                    .failure(
                        "max",
                        format!("{} must be less than {}", ctx.label(), max),
                    )
                    .with_param("max", max.to_string())
                    .with_param("actual", actual.to_string()));
            }
            Ok(())
        });
        self
    }

    /// Requires the snapshot to be numerically equal to one of `allowed`.
    ///
    /// Every allowed element must be a JSON number or construction fails;
    /// elements are compared as `f64`, so an integer snapshot `5` matches
    /// an allowed `5.0`. A string snapshot never matches, even a numeric
    /// one. Skipped when the snapshot is absent.
    pub fn valid(mut self, allowed: Vec<Value>) -> Result<Self, BuildError> {
        let mut set = Vec::with_capacity(allowed.len());
        for value in allowed {
            match value.as_f64() {
                Some(f) => set.push(f),
                None => {
                    return Err(BuildError::Coercion {
                        expected: "number",
                        found: crate::foundation::kind_name(&value),
                    })
                }
            }
        }
        self.pipeline.push("valid", move |_slot, ctx| {
            let Some(original) = ctx.original() else {
                return Ok(());
            };
            let matched = original
                .as_f64()
                .is_some_and(|v| set.iter().any(|allowed| *allowed == v));
            if !matched {
                return Err(ctx.failure(
                    "not_in_valid",
                    format!("{} not in valid array", ctx.label()),
                ));
            }
            Ok(())
        });
        Ok(self)
    }

    /// Requires the working value — already coerced to a number by the base
    /// rule — to equal its own floor. Skipped when the working value is
    /// absent or non-numeric.
    pub fn integer(mut self) -> Self {
        self.pipeline.push("integer", |slot, ctx| {
            let Some(f) = slot.as_ref().and_then(Value::as_f64) else {
                return Ok(());
            };
            if f.floor() != f {
                return Err(ctx.failure(
                    "integer",
                    format!("{} not an integer", ctx.label()),
                ));
            }
            Ok(())
        });
        self
    }

    /// Appends a user-supplied transform; same contract as the string-kind
    /// rule. Invoked only when the snapshot is present; the `Ok` value
    /// replaces the working value.
    pub fn custom<F>(mut self, transform: F) -> Self
    where
        F: Fn(&mut Option<Value>, &Helpers<'_>) -> Result<Value, ValidationError>
            + Send
            + Sync
            + 'static,
    {
        self.pipeline.push("custom", move |slot, ctx| {
            if ctx.original().is_none() {
                return Ok(());
            }
            let helpers = Helpers::new(ctx.label());
            let replacement = transform(slot, &helpers)?;
            *slot = Some(replacement);
            Ok(())
        });
        self
    }

    /// Stores the fallback assigned to the slot when the input is absent.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.pipeline.note("default");
        self.pipeline.set_default(value.into());
        self
    }

    /// Sets the display name used in failure messages.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.pipeline.set_label(label);
        self
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidateField for NumberValidator {
    fn validate(&self, slot: &mut Option<Value>) -> Result<(), ValidationError> {
        self.pipeline.run(None, slot)
    }

    fn validate_labeled(
        &self,
        label: &str,
        slot: &mut Option<Value>,
    ) -> Result<(), ValidationError> {
        self.pipeline.run(Some(label), slot)
    }

    fn rule_names(&self) -> &[&'static str] {
        self.pipeline.rule_names()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_accepts_number() {
        let v = number();
        assert!(v.validate(&mut Some(json!(5))).is_ok());
        assert!(v.validate(&mut Some(json!(5.5))).is_ok());
    }

    #[test]
    fn test_base_coerces_numeric_string() {
        let v = number();
        let mut slot = Some(json!("4.5"));
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!(4.5)));
    }

    #[test]
    fn test_base_rejects_unparseable_string() {
        let v = number();
        let err = v.validate(&mut Some(json!("abc"))).unwrap_err();
        assert_eq!(err.message, "value not a number");
    }

    #[test]
    fn test_base_rejects_other_kinds() {
        let v = number();
        assert!(v.validate(&mut Some(json!(true))).is_err());
        assert!(v.validate(&mut Some(json!([1]))).is_err());
    }

    #[test]
    fn test_base_passes_on_absent() {
        let v = number();
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_integer_on_coerced_string() {
        // base coerces "4.0" to 4.0 before the integer check runs
        let v = number().integer();
        let mut slot = Some(json!("4.0"));
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!(4.0)));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let v = number().integer();
        let err = v.validate(&mut Some(json!(4.5))).unwrap_err();
        assert_eq!(err.message, "value not an integer");
    }

    #[test]
    fn test_integer_accepts_native_integer() {
        let v = number().integer();
        assert!(v.validate(&mut Some(json!(4))).is_ok());
    }

    #[test]
    fn test_required_absent() {
        let v = number().required();
        let err = v.validate(&mut None).unwrap_err();
        assert_eq!(err.message, "value must be defined");
    }

    #[test]
    fn test_optional_after_required() {
        let v = number().required().optional();
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_min_bound() {
        let v = number().min(18.0);
        assert!(v.validate(&mut Some(json!(18))).is_ok());
        let err = v.validate(&mut Some(json!(17.5))).unwrap_err();
        assert_eq!(err.message, "value must be greater than or equal to 18");
    }

    #[test]
    fn test_max_bound() {
        let v = number().max(100.0);
        assert!(v.validate(&mut Some(json!(100))).is_ok());
        let err = v.validate(&mut Some(json!(101))).unwrap_err();
        assert_eq!(err.message, "value must be less than 100");
    }

    #[test]
    fn test_min_reads_string_snapshot_numerically() {
        let v = number().min(5.0);
        assert!(v.validate(&mut Some(json!("10"))).is_ok());
        assert!(v.validate(&mut Some(json!("3"))).is_err());
    }

    #[test]
    fn test_bounds_skipped_when_absent() {
        let v = number().min(5.0).max(10.0);
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_valid_cross_kind_equality() {
        // integer snapshot matches a float allowed element
        let v = number().valid(vec![json!(5.0), json!(7.0)]).unwrap();
        assert!(v.validate(&mut Some(json!(5))).is_ok());
        let err = v.validate(&mut Some(json!(6))).unwrap_err();
        assert_eq!(err.message, "value not in valid array");
    }

    #[test]
    fn test_valid_string_snapshot_never_matches() {
        let v = number().valid(vec![json!(5.0)]).unwrap();
        assert!(v.validate(&mut Some(json!("5"))).is_err());
    }

    #[test]
    fn test_valid_rejects_non_number_element_at_build() {
        let err = number().valid(vec![json!("5")]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Coercion {
                expected: "number",
                found: "string"
            }
        ));
    }

    #[test]
    fn test_default_applied_on_absent() {
        let v = number().default(18.0);
        let mut slot = None;
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!(18.0)));
    }

    #[test]
    fn test_custom_transform() {
        let v = number().custom(|slot, helpers| {
            let doubled = slot
                .as_ref()
                .and_then(Value::as_f64)
                .ok_or_else(|| helpers.error("no numeric working value"))?
                * 2.0;
            Ok(json!(doubled))
        });
        let mut slot = Some(json!(21.0));
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!(42.0)));
    }

    #[test]
    fn test_label_in_message() {
        let v = number().label("age").required();
        let err = v.validate(&mut None).unwrap_err();
        assert_eq!(err.message, "age must be defined");
    }

    #[test]
    fn test_rule_names_audit_trail() {
        let v = number().required().integer().min(0.0).default(1.0);
        assert_eq!(
            v.rule_names(),
            &["base", "required", "integer", "min", "default"]
        );
    }
}
