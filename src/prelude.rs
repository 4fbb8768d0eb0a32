//! Prelude module for convenient imports.
//!
//! Provides a single `use vetter::prelude::*;` import that brings in the
//! factories, builders, traits, and error types.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vetter::prelude::*;
//!
//! let username = string().required().trim().min(3).max(20);
//! let age = number().integer().min(0.0).max(150.0);
//! ```

// ============================================================================
// FOUNDATION: Core traits and errors
// ============================================================================

pub use crate::foundation::{
    BuildError, Helpers, RuleContext, ValidateField, ValidationError, ValidationResult,
};

// ============================================================================
// VALIDATORS: Field-kind builders and factories
// ============================================================================

pub use crate::validators::{number, string, NumberValidator, StringValidator};

// ============================================================================
// SCHEMA: Orchestration over keyed containers
// ============================================================================

pub use crate::schema::{Schema, SchemaError};

// ============================================================================
// DECODE: Structural mapping into typed destinations
// ============================================================================

pub use crate::decode::{decode, Binding, Decode, DecodeError, Slot};
