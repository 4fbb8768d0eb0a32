//! String-kind field validator
//!
//! A fluent, consuming builder over the rule pipeline. Every builder call
//! appends a rule (call order is execution order, and calling a rule twice
//! appends two independent checks); `required`/`optional` additionally
//! toggle the shared flag, with the last call winning. Checks read the
//! frozen snapshot; `lowercase`, `trim`, and `custom` mutate the working
//! value.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use crate::foundation::rule::present;
use crate::foundation::{BuildError, Helpers, Pipeline, ValidateField, ValidationError};
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

/// Builds a string-kind validator.
///
/// # Examples
///
/// ```rust,ignore
/// use vetter::prelude::*;
/// use serde_json::json;
///
/// let username = string().required().trim().lowercase().min(3).max(20);
/// let mut slot = Some(json!("  Alice  "));
/// username.validate(&mut slot)?;
/// assert_eq!(slot, Some(json!("alice")));
/// ```
#[must_use]
pub fn string() -> StringValidator {
    StringValidator::new()
}

/// A string-kind validator: an ordered rule pipeline plus string-specific
/// checks (codepoint-counted bounds, pattern match, membership) and
/// normalizations (trim, lowercase).
#[derive(Debug)]
pub struct StringValidator {
    pipeline: Pipeline,
}

impl StringValidator {
    /// Creates the validator with its base rule at index 0: a present
    /// snapshot that is not a JSON string fails with `"<label> not a
    /// string"`. The base never mutates.
    pub fn new() -> Self {
        let mut pipeline = Pipeline::new();
        pipeline.push("base", |_slot, ctx| match ctx.original() {
            None => Ok(()),
            Some(v) if v.is_string() => Ok(()),
            Some(_) => Err(ctx.failure(
                "not_a_string",
                format!("{} not a string", ctx.label()),
            )),
        });
        Self { pipeline }
    }

    /// Requires the input to be present.
    ///
    /// Sets the required flag and appends a check that fails with
    /// `"<label> must be defined"` when the snapshot is absent. The check
    /// reads the flag at validate time, so a later [`optional`] call defuses
    /// it — last call wins.
    ///
    /// [`optional`]: StringValidator::optional
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

    /// Clears the required flag. Appends no check of its own; a check added
    /// by an earlier [`required`] call reads the cleared flag and passes.
    ///
    /// [`required`]: StringValidator::required
    pub fn optional(mut self) -> Self {
        self.pipeline.set_required(false);
        self.pipeline.note("optional");
        self
    }

    /// Requires the snapshot string to have at least `min` codepoints.
    ///
    /// Skipped when the snapshot is absent. A non-string snapshot counts as
    /// length 0 (the base rule has already failed the run by then).
    pub fn min(mut self, min: usize) -> Self {
        self.pipeline.push("min", move |_slot, ctx| {
            let Some(original) = ctx.original() else {
                return Ok(());
            };
            let actual = original.as_str().map_or(0, |s| s.chars().count());
            if actual < min {
                return Err(ctx
                    .failure(
                        "min_length",
                        format!("{} must be at least {} length", ctx.label(), min),
                    )
                    .with_param("min", min.to_string())
                    .with_param("actual", actual.to_string()));
            }
            Ok(())
        });
        self
    }

    /// Requires the snapshot string to have at most `max` codepoints.
    ///
    /// Skipped when the snapshot is absent.
    pub fn max(mut self, max: usize) -> Self {
        self.pipeline.push("max", move |_slot, ctx| {
            let Some(original) = ctx.original() else {
                return Ok(());
            };
            let actual = original.as_str().map_or(0, |s| s.chars().count());
            if actual > max {
                return Err(ctx
                    .failure(
                        "max_length",
                        format!("{} must be at most {} length", ctx.label(), max),
                    )
                    .with_param("max", max.to_string())
                    .with_param("actual", actual.to_string()));
            }
            Ok(())
        });
        self
    }

    /// Requires the snapshot string to match `pattern`.
    ///
    /// The pattern is compiled once, here; an invalid pattern is a
    /// construction fault, not a validation failure. At validate time the
    /// check is skipped while the working value is absent.
    pub fn regex(mut self, pattern: &str) -> Result<Self, BuildError> {
        let regex = Regex::new(pattern)?;
        self.pipeline.push("regex", move |slot, ctx| {
            if !present(slot) {
                return Ok(());
            }
            let Some(original) = ctx.original_str() else {
                return Ok(());
            };
            if !regex.is_match(original) {
                return Err(ctx
                    .failure(
                        "pattern",
                        format!("{} does not match regex", ctx.label()),
                    )
                    .with_param("pattern", regex.to_string()));
            }
            Ok(())
        });
        Ok(self)
    }

    /// Requires the snapshot string to contain only ASCII letters and
    /// digits (the empty string passes). Skipped when the snapshot is
    /// absent.
    pub fn alphanum(mut self) -> Self {
        self.pipeline.push("alphanum", |_slot, ctx| {
            let Some(original) = ctx.original_str() else {
                return Ok(());
            };
            if !original.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ctx.failure(
                    "alphanum",
                    format!("{} not alphanum", ctx.label()),
                ));
            }
            Ok(())
        });
        self
    }

    /// Requires the snapshot to equal one of `allowed` exactly.
    ///
    /// Every allowed element must be a JSON string; anything else is a
    /// construction fault. Skipped when the snapshot is absent (a required
    /// rule covers absence).
    pub fn valid(mut self, allowed: Vec<Value>) -> Result<Self, BuildError> {
        let mut set = Vec::with_capacity(allowed.len());
        for value in allowed {
            match value {
                Value::String(s) => set.push(s),
                other => {
                    return Err(BuildError::Coercion {
                        expected: "string",
                        found: crate::foundation::kind_name(&other),
                    })
                }
            }
        }
        self.pipeline.push("valid", move |_slot, ctx| {
            let Some(original) = ctx.original() else {
                return Ok(());
            };
            let matched = original
                .as_str()
                .is_some_and(|s| set.iter().any(|allowed| allowed == s));
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

    /// Lowercases the working string. Pure normalization, never fails;
    /// skipped unless both the snapshot and the working value are present.
    pub fn lowercase(mut self) -> Self {
        self.pipeline.push("lowercase", |slot, ctx| {
            if ctx.original().is_some() {
                if let Some(Value::String(s)) = slot.as_mut() {
                    *s = s.to_lowercase();
                }
            }
            Ok(())
        });
        self
    }

    /// Trims leading and trailing whitespace from the working string.
    /// Pure normalization, never fails; skipped unless both the snapshot
    /// and the working value are present.
    pub fn trim(mut self) -> Self {
        self.pipeline.push("trim", |slot, ctx| {
            if ctx.original().is_some() {
                if let Some(Value::String(s)) = slot.as_mut() {
                    *s = s.trim().to_owned();
                }
            }
            Ok(())
        });
        self
    }

    /// Appends a user-supplied transform.
    ///
    /// Invoked only when the snapshot is present. The transform receives
    /// the mutable working value and a [`Helpers`] context; its `Ok` value
    /// replaces the working value, its `Err` propagates as this rule's
    /// failure.
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
    /// Not a rule; only the audit trail records it.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.pipeline.note("default");
        self.pipeline.set_default(value.into());
        self
    }

    /// Sets the display name used in failure messages. A schema overrides
    /// this with the declared field name.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.pipeline.set_label(label);
        self
    }
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidateField for StringValidator {
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
    fn test_base_accepts_string() {
        let v = string();
        let mut slot = Some(json!("hello"));
        assert!(v.validate(&mut slot).is_ok());
    }

    #[test]
    fn test_base_rejects_non_string() {
        let v = string();
        let err = v.validate(&mut Some(json!(5))).unwrap_err();
        assert_eq!(err.code, "not_a_string");
        assert_eq!(err.message, "value not a string");
    }

    #[test]
    fn test_base_passes_on_absent() {
        let v = string();
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_required_absent_fails() {
        let v = string().required();
        let err = v.validate(&mut None).unwrap_err();
        assert_eq!(err.message, "value must be defined");
    }

    #[test]
    fn test_required_wrong_kind_fails_with_kind_message() {
        // the base rule runs first, so the kind mismatch wins over required
        let v = string().required();
        let err = v.validate(&mut Some(json!(5))).unwrap_err();
        assert_eq!(err.code, "not_a_string");
    }

    #[test]
    fn test_optional_after_required_defuses_check() {
        let v = string().required().optional();
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_required_after_optional_enforces() {
        let v = string().optional().required();
        assert!(v.validate(&mut None).is_err());
    }

    #[test]
    fn test_min_too_short() {
        let v = string().required().min(3).max(5);
        let err = v.validate(&mut Some(json!("ab"))).unwrap_err();
        assert_eq!(err.message, "value must be at least 3 length");
        assert_eq!(err.param("min"), Some("3"));
        assert_eq!(err.param("actual"), Some("2"));
    }

    #[test]
    fn test_max_too_long() {
        let v = string().max(5);
        let err = v.validate(&mut Some(json!("toolong"))).unwrap_err();
        assert_eq!(err.code, "max_length");
        assert_eq!(err.message, "value must be at most 5 length");
    }

    #[test]
    fn test_min_counts_codepoints_not_bytes() {
        // 3 codepoints, 9 bytes
        let v = string().min(3);
        assert!(v.validate(&mut Some(json!("\u{4f60}\u{597d}\u{5417}"))).is_ok());
    }

    #[test]
    fn test_min_skipped_when_absent() {
        let v = string().min(3);
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_regex_match() {
        let v = string().regex("^[a-z]+$").unwrap();
        assert!(v.validate(&mut Some(json!("abc"))).is_ok());
        let err = v.validate(&mut Some(json!("abc123"))).unwrap_err();
        assert_eq!(err.message, "value does not match regex");
    }

    #[test]
    fn test_regex_invalid_pattern_is_build_fault() {
        assert!(matches!(
            string().regex("("),
            Err(BuildError::Pattern(_))
        ));
    }

    #[test]
    fn test_regex_skipped_when_working_value_absent() {
        let v = string().regex("^[a-z]+$").unwrap();
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_alphanum() {
        let v = string().alphanum();
        assert!(v.validate(&mut Some(json!("abc123"))).is_ok());
        let err = v.validate(&mut Some(json!("abc_123"))).unwrap_err();
        assert_eq!(err.message, "value not alphanum");
    }

    #[test]
    fn test_valid_membership() {
        let v = string().valid(vec![json!("a"), json!("b")]).unwrap();
        assert!(v.validate(&mut Some(json!("a"))).is_ok());
        let err = v.validate(&mut Some(json!("c"))).unwrap_err();
        assert_eq!(err.message, "value not in valid array");
    }

    #[test]
    fn test_valid_rejects_non_string_element_at_build() {
        let err = string().valid(vec![json!("a"), json!(5)]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Coercion {
                expected: "string",
                found: "number"
            }
        ));
    }

    #[test]
    fn test_valid_skipped_when_absent() {
        let v = string().valid(vec![json!("a")]).unwrap();
        assert!(v.validate(&mut None).is_ok());
    }

    #[test]
    fn test_trim_then_lowercase() {
        let v = string().trim().lowercase();
        let mut slot = Some(json!("  ABC  "));
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!("abc")));
    }

    #[test]
    fn test_checks_read_snapshot_not_trimmed_value() {
        // trim shortens the working value to 2 codepoints, but min reads
        // the 6-codepoint snapshot
        let v = string().trim().min(3);
        let mut slot = Some(json!("  ab  "));
        assert!(v.validate(&mut slot).is_ok());
        assert_eq!(slot, Some(json!("ab")));
    }

    #[test]
    fn test_default_applied_on_absent() {
        let v = string().default("fallback");
        let mut slot = None;
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!("fallback")));
    }

    #[test]
    fn test_default_not_applied_when_present() {
        let v = string().default("fallback");
        let mut slot = Some(json!("given"));
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!("given")));
    }

    #[test]
    fn test_custom_replaces_working_value() {
        let v = string().custom(|_slot, _helpers| Ok(json!("replaced")));
        let mut slot = Some(json!("input"));
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, Some(json!("replaced")));
    }

    #[test]
    fn test_custom_failure_propagates() {
        let v = string().custom(|_slot, helpers| Err(helpers.error("rejected by transform")));
        let err = v.validate(&mut Some(json!("input"))).unwrap_err();
        assert_eq!(err.code, "custom");
        assert_eq!(err.message, "rejected by transform");
    }

    #[test]
    fn test_custom_skipped_when_absent() {
        let v = string().custom(|_slot, _helpers| Ok(json!("replaced")));
        let mut slot = None;
        v.validate(&mut slot).unwrap();
        assert_eq!(slot, None);
    }

    #[test]
    fn test_label_in_message() {
        let v = string().label("username").min(3);
        let err = v.validate(&mut Some(json!("ab"))).unwrap_err();
        assert_eq!(err.message, "username must be at least 3 length");
        assert_eq!(err.field.as_deref(), Some("username"));
    }

    #[test]
    fn test_repeated_min_appends_independent_checks() {
        let v = string().min(2).min(4);
        // passes the first bound, fails the second
        let err = v.validate(&mut Some(json!("abc"))).unwrap_err();
        assert_eq!(err.message, "value must be at least 4 length");
    }

    #[test]
    fn test_rule_names_audit_trail() {
        let v = string().required().min(3).default("x").optional();
        assert_eq!(
            v.rule_names(),
            &["base", "required", "min", "default", "optional"]
        );
    }

    #[test]
    fn test_sequential_reuse() {
        let v = string().min(3);
        assert!(v.validate(&mut Some(json!("abcd"))).is_ok());
        assert!(v.validate(&mut Some(json!("ab"))).is_err());
        assert!(v.validate(&mut Some(json!("abcd"))).is_ok());
    }
}
