//! Domain layer: entities and validation logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod failure;
pub mod rules;
pub mod validator;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use failure::{Failure, ValidationResult};
pub use rules::{CascadeMode, TextRule, ValidatorOptions};
pub use validator::Validator;
