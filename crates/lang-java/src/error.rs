use rosetta_api::TypeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosettaError {
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The property \"{key}\" is missing from {label}")]
    MissingKey { label: String, key: String },
    #[error("The property \"{key}\" of {label} is not {expected}")]
    ValueType {
        label: String,
        key: String,
        expected: &'static str,
    },
    #[error("Unknown value \"{value}\" for property \"{key}\" of {label}")]
    UnknownValue {
        label: String,
        key: String,
        value: String,
    },
    #[error("Class not found in source: {0}")]
    UnknownClass(String),
    #[error("A class definition is already registered for the name: {0}")]
    DuplicateClass(String),
    #[error("The name is not valid: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, RosettaError>;
