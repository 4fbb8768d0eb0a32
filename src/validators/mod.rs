//! Built-in field validators
//!
//! One module per field kind. Each exposes a snake_case factory returning
//! the builder:
//!
//! - **String**: [`string()`] → [`StringValidator`]
//! - **Number**: [`number()`] → [`NumberValidator`]

pub mod number;
pub mod string;

pub use number::{number, NumberValidator};
pub use string::{string, StringValidator};
