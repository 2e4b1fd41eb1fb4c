//! Request payloads submitted by the dashboard and their validation.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod filter;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("invalid category `{key}`: {source}")]
    InvalidCategory {
        key: String,
        source: TypeConstraintError,
    },

    #[error("invalid reference date `{0}`")]
    InvalidAsOf(String),
}
