//! Validator error types

/// Failure of the validator itself, as opposed to a rejected value
///
/// Any of these turns into an undetermined outcome; they never make a field
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
	#[error("{0}")]
	Failed(String),
	#[error("validator panicked: {0}")]
	Panicked(String),
}

/// Outcome of an external schema check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	/// The schema rejected the value
	#[error("schema validation failed: {0}")]
	Invalid(String),
	/// The schema could not be evaluated
	#[error("schema unavailable: {0}")]
	Unavailable(String),
}

pub type ValidatorResult<T> = Result<T, ValidatorError>;
