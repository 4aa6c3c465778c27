//! Domain layer: record model, validation, and error types.

pub mod errors;
pub mod record;
pub mod validator;
