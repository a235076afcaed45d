//! Input Validation
//!
//! Range checking of raw housing attributes against the bounds the input
//! form enforces.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
