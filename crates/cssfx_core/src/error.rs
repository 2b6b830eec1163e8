//! Filter model error types

use thiserror::Error;

/// Errors that can occur when building or editing a filter set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// No filter kind is registered under this type name
    #[error("Unknown filter type: {0}")]
    UnknownType(String),

    /// No filter with this name exists in the list
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The filter kind has no parameter with this name
    #[error("Filter {filter} has no parameter named {param}")]
    UnknownParam { filter: String, param: String },

    /// A number was given for a color parameter or the other way around
    #[error("Parameter {filter}.{param} expects a {expected}")]
    ParamKindMismatch {
        filter: String,
        param: String,
        expected: &'static str,
    },
}

/// Result type for filter model operations
pub type Result<T> = std::result::Result<T, FilterError>;
