//! # vetter
//!
//! Rule-pipeline validation and structural decoding for loosely-typed JSON
//! values.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vetter::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("name", string().required().trim().lowercase().min(3))
//!     .field("age", number().integer().min(0.0).default(18.0));
//!
//! let mut input = json!({"name": "  Alice  "});
//! schema.validate_value(&mut input)?;
//! assert_eq!(input, json!({"name": "alice", "age": 18.0}));
//! ```
//!
//! ## Model
//!
//! A validator is a builder-accumulated pipeline of ordered rules over a
//! single value slot. Each `validate` call freezes a snapshot of the input
//! before any rule runs: checks (bounds, patterns, membership) read the
//! snapshot, while mutations (defaults, trimming, case-folding, numeric
//! coercion, custom transforms) rewrite the working value in the slot —
//! validation doubles as normalization. Execution fails fast: the first
//! violated rule wins.
//!
//! Validation failures ([`ValidationError`](foundation::ValidationError))
//! are ordinary returned errors; configuration faults (invalid regex,
//! wrong-kind allowed-set element, non-object schema input, decoder kind
//! mismatch) are separate error types surfaced at construction or as
//! distinct fault enums, never mixed into the pipeline.
//!
//! The [`decode`] module covers the parallel concern of populating a typed
//! destination from the same kind of keyed container.

pub mod decode;
pub mod foundation;
pub mod prelude;
pub mod schema;
pub mod validators;
