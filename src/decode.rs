//! Structural decoder: keyed dynamic container into a typed destination
//!
//! A destination type implements [`Decode`] by handing out an ordered list
//! of [`Binding`]s — each pairs a source key with a mutable [`Slot`] into
//! one of its fields. [`decode`] walks the bindings, looks each key up in
//! the container, and coerces the found value by destination kind. Missing
//! keys leave the destination field untouched; the first incompatible field
//! aborts the whole decode.
//!
//! ```rust,ignore
//! use vetter::decode::{decode, Binding, Decode, Slot};
//!
//! #[derive(Default)]
//! struct Account {
//!     name: String,
//!     age: i64,
//!     admin: bool,
//! }
//!
//! impl Decode for Account {
//!     fn bindings(&mut self) -> Vec<Binding<'_>> {
//!         vec![
//!             Binding::new("name", Slot::Str(&mut self.name)),
//!             Binding::new("age", Slot::Int(&mut self.age)),
//!             Binding::new("admin", Slot::Bool(&mut self.admin)),
//!         ]
//!     }
//! }
//! ```

use crate::foundation::kind_name;
use serde_json::{Map, Value};

// ============================================================================
// DECODE ERROR
// ============================================================================

/// A fatal decode fault. The decoder either fully succeeds or aborts on the
/// first incompatible field; these are never mixed with per-field
/// validation failures.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The source value's kind cannot coerce to the destination field.
    #[error("field `{key}` expected {expected}, got {actual}")]
    TypeMismatch {
        /// The declared source key.
        key: &'static str,
        /// The kind the destination accepts.
        expected: &'static str,
        /// The JSON kind actually found.
        actual: &'static str,
    },

    /// A string-encoded integer failed to parse.
    #[error("field `{key}` cannot parse `{text}` as integer")]
    ParseInt {
        /// The declared source key.
        key: &'static str,
        /// The offending source text.
        text: String,
    },

    /// A string-encoded boolean failed to parse.
    #[error("field `{key}` cannot parse `{text}` as boolean")]
    ParseBool {
        /// The declared source key.
        key: &'static str,
        /// The offending source text.
        text: String,
    },
}

// ============================================================================
// SLOTS AND BINDINGS
// ============================================================================

/// A mutable destination field, tagged with its kind.
///
/// The plain kinds carry the decoder's coercion table; the `Opt*` kinds are
/// owned-reference destinations that demand an exact source-kind match and
/// store a freshly owned copy, with no parsing.
#[derive(Debug)]
pub enum Slot<'a> {
    /// A string field; the source must already be a JSON string.
    Str(&'a mut String),
    /// An integer field; accepts a native integer, a float (truncating
    /// toward zero), or a string parsed as an integer.
    Int(&'a mut i64),
    /// A boolean field; accepts a native boolean or a string parsed as
    /// `"true"`/`"false"`.
    Bool(&'a mut bool),
    /// An owned string reference; the source kind must be exactly string.
    OptStr(&'a mut Option<String>),
    /// An owned number reference; the source kind must be exactly number.
    OptNum(&'a mut Option<f64>),
    /// An owned boolean reference; the source kind must be exactly boolean.
    OptBool(&'a mut Option<bool>),
}

/// Pairs a source key with the destination slot it populates.
#[derive(Debug)]
pub struct Binding<'a> {
    /// The key looked up in the source container.
    pub key: &'static str,
    /// The destination field.
    pub slot: Slot<'a>,
}

impl<'a> Binding<'a> {
    /// Creates a binding from a source key to a destination slot.
    pub fn new(key: &'static str, slot: Slot<'a>) -> Self {
        Self { key, slot }
    }
}

/// A destination type that declares its source-key correspondence.
pub trait Decode {
    /// The ordered bindings from source keys to this value's fields.
    fn bindings(&mut self) -> Vec<Binding<'_>>;
}

// ============================================================================
// DECODE
// ============================================================================

/// Populates `dst` from `src` by declared key correspondence.
///
/// A missing key leaves the destination field untouched. A present key
/// coerces per the slot's kind; the first incompatible field aborts the
/// decode (fields already written stay written — no rollback).
pub fn decode<D: Decode + ?Sized>(
    src: &Map<String, Value>,
    dst: &mut D,
) -> Result<(), DecodeError> {
    for binding in dst.bindings() {
        let Some(value) = src.get(binding.key) else {
            continue;
        };
        fill(binding.key, binding.slot, value)?;
    }
    Ok(())
}

fn fill(key: &'static str, slot: Slot<'_>, value: &Value) -> Result<(), DecodeError> {
    match slot {
        Slot::Str(dst) => match value {
            Value::String(s) => {
                dst.clone_from(s);
                Ok(())
            }
            other => Err(mismatch(key, "string", other)),
        },
        Slot::Int(dst) => match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    *dst = i;
                } else if let Some(f) = n.as_f64() {
                    // truncates toward zero
                    *dst = f as i64;
                } else {
                    return Err(mismatch(key, "integer", value));
                }
                Ok(())
            }
            Value::String(s) => match s.parse::<i64>() {
                Ok(i) => {
                    *dst = i;
                    Ok(())
                }
                Err(_) => Err(DecodeError::ParseInt {
                    key,
                    text: s.clone(),
                }),
            },
            other => Err(mismatch(key, "integer", other)),
        },
        Slot::Bool(dst) => match value {
            Value::Bool(b) => {
                *dst = *b;
                Ok(())
            }
            Value::String(s) => match s.parse::<bool>() {
                Ok(b) => {
                    *dst = b;
                    Ok(())
                }
                Err(_) => Err(DecodeError::ParseBool {
                    key,
                    text: s.clone(),
                }),
            },
            other => Err(mismatch(key, "boolean", other)),
        },
        Slot::OptStr(dst) => match value {
            Value::String(s) => {
                *dst = Some(s.clone());
                Ok(())
            }
            other => Err(mismatch(key, "string", other)),
        },
        Slot::OptNum(dst) => match value.as_f64() {
            Some(f) => {
                *dst = Some(f);
                Ok(())
            }
            None => Err(mismatch(key, "number", value)),
        },
        Slot::OptBool(dst) => match value {
            Value::Bool(b) => {
                *dst = Some(*b);
                Ok(())
            }
            other => Err(mismatch(key, "boolean", other)),
        },
    }
}

fn mismatch(key: &'static str, expected: &'static str, actual: &Value) -> DecodeError {
    DecodeError::TypeMismatch {
        key,
        expected,
        actual: kind_name(actual),
    }
}

// ============================================================================
// TESTS
// ============================================================================
