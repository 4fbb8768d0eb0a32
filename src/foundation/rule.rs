//! The rule pipeline: ordered mutation/check steps over a single value slot
//!
//! Every field validator is a [`Pipeline`]: an ordered list of named
//! [`Rule`]s accumulated at build time and executed later against a mutable
//! slot. Execution takes a frozen snapshot of the input before any rule
//! runs; bound and membership checks read the snapshot, mutation rules
//! (trim, case-folding, coercion, custom transforms) rewrite the working
//! value in the slot. The split is deliberate — a later check can never be
//! fooled by an earlier cosmetic mutation, and a custom transform can never
//! influence a later bound check.
//!
//! All per-call state (label, snapshot, required flag) travels through
//! [`RuleContext`] rather than living on the validator, so a built pipeline
//! is immutable and can be reused sequentially or concurrently.

use crate::foundation::error::ValidationError;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Label used in error messages when none was configured.
pub const DEFAULT_LABEL: &str = "value";

/// Returns true when the slot holds a usable value.
///
/// JSON `null` counts as absent, the same as a missing key.
#[must_use]
pub fn present(slot: &Option<Value>) -> bool {
    slot.as_ref().is_some_and(|v| !v.is_null())
}

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Per-call state threaded through every rule of a pipeline run.
///
/// Carries the display label, the frozen pre-mutation snapshot, and the
/// required flag as it stood when `validate` was invoked (the last
/// `required`/`optional` builder call wins).
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    label: &'a str,
    original: Option<&'a Value>,
    required: bool,
}

impl<'a> RuleContext<'a> {
    /// The label used in failure messages.
    #[must_use]
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// The snapshot of the input, frozen before any rule mutated the slot.
    /// `None` when the input was absent or JSON `null`.
    #[must_use]
    pub fn original(&self) -> Option<&'a Value> {
        self.original
    }

    /// Whether a required-rule left the flag set at validate time.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// The snapshot as a string slice, when it is a JSON string.
    #[must_use]
    pub fn original_str(&self) -> Option<&'a str> {
        self.original?.as_str()
    }

    /// The snapshot's numeric value.
    ///
    /// A JSON number reads as itself; a numeric string reads as its parsed
    /// value (the number base rule already guaranteed it parses). Any other
    /// kind has no numeric value.
    #[must_use]
    pub fn original_number(&self) -> Option<f64> {
        match self.original? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Builds a labeled failure for the current slot.
    #[must_use]
    pub fn failure(
        &self,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> ValidationError {
        ValidationError::new(code, message).with_field(self.label.to_owned())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Context handed to a custom transform rule.
#[derive(Debug, Clone, Copy)]
pub struct Helpers<'a> {
    label: &'a str,
}

impl<'a> Helpers<'a> {
    pub(crate) fn new(label: &'a str) -> Self {
        Self { label }
    }

    /// The label of the slot being validated.
    #[must_use]
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Builds a failure carrying the current label, for the transform to
    /// return when it rejects the value.
    #[must_use]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> ValidationError {
        ValidationError::new("custom", message).with_field(self.label.to_owned())
    }
}

// ============================================================================
// RULE
// ============================================================================

type RuleFn =
    Box<dyn Fn(&mut Option<Value>, &RuleContext<'_>) -> Result<(), ValidationError> + Send + Sync>;

/// One ordered step of a pipeline: a named check and/or mutation.
pub struct Rule {
    name: &'static str,
    run: RuleFn,
}

impl Rule {
    /// The builder call that contributed this rule.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Builder-accumulated validator state: label, required flag, default
/// value, and the ordered rule list.
///
/// Builder calls are the only mutators and all complete before the first
/// run; `run` itself takes `&self` and keeps every per-call value in
/// [`RuleContext`], so one built pipeline may serve many validations.
pub struct Pipeline {
    label: Option<Cow<'static, str>>,
    required: bool,
    default: Option<Value>,
    rules: Vec<Rule>,
    rule_names: Vec<&'static str>,
}

impl Pipeline {
    pub(crate) fn new() -> Self {
        Self {
            label: None,
            required: false,
            default: None,
            rules: Vec::new(),
            rule_names: Vec::new(),
        }
    }

    /// Appends a rule; registration order is execution order.
    pub(crate) fn push<F>(&mut self, name: &'static str, rule: F)
    where
        F: Fn(&mut Option<Value>, &RuleContext<'_>) -> Result<(), ValidationError>
            + Send
            + Sync
            + 'static,
    {
        self.rule_names.push(name);
        self.rules.push(Rule {
            name,
            run: Box::new(rule),
        });
    }

    /// Records a builder call in the audit trail without appending a rule
    /// (`optional`, `default`).
    pub(crate) fn note(&mut self, name: &'static str) {
        self.rule_names.push(name);
    }

    pub(crate) fn set_label(&mut self, label: impl Into<Cow<'static, str>>) {
        self.label = Some(label.into());
    }

    pub(crate) fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    /// The ordered audit trail of builder calls that contributed rules or
    /// configuration. Diagnostic only.
    #[must_use]
    pub fn rule_names(&self) -> &[&'static str] {
        &self.rule_names
    }

    /// Executes the pipeline against `slot`.
    ///
    /// `label_override` takes precedence over the builder label (the schema
    /// orchestrator passes the field name here); with neither, the label is
    /// `"value"`. An absent or `null` input never aborts the run by itself:
    /// the default (possibly absent) is substituted and the rules decide.
    /// The first failing rule wins and the rest never execute.
    pub(crate) fn run(
        &self,
        label_override: Option<&str>,
        slot: &mut Option<Value>,
    ) -> Result<(), ValidationError> {
        let label = label_override
            .or(self.label.as_deref())
            .unwrap_or(DEFAULT_LABEL);

        let original = match slot.as_ref() {
            Some(v) if !v.is_null() => Some(v.clone()),
            _ => None,
        };
        if original.is_none() {
            slot.clone_from(&self.default);
        }

        let ctx = RuleContext {
            label,
            original: original.as_ref(),
            required: self.required,
        };
        for rule in &self.rules {
            (rule.run)(slot, &ctx)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("rules", &self.rule_names)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
