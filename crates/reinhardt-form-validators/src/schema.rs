//! Seam for external schema-validation libraries
//!
//! The engine does not ship a schema language. Anything that can answer
//! "is the value at this field acceptable given the whole form?" plugs in
//! through [`ValidationSchema`] and is invoked by the built-in
//! [`schema`](crate::builtin::schema) validator.

use crate::errors::SchemaError;
use crate::value::FormValues;
use async_trait::async_trait;

/// Whole-form schema checked one field at a time
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use reinhardt_form_validators::{FormValues, SchemaError, ValidationSchema};
///
/// struct NonEmpty;
///
/// #[async_trait]
/// impl ValidationSchema for NonEmpty {
///     async fn validate_at(&self, field: &str, values: &FormValues) -> Result<(), SchemaError> {
///         match values.get(field) {
///             Some(value) if !value.is_empty() => Ok(()),
///             _ => Err(SchemaError::Invalid(format!("{} is required", field))),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait ValidationSchema: Send + Sync {
	/// Validate the value stored under `field` in `values`
	///
	/// Return [`SchemaError::Invalid`] when the value breaks the schema and
	/// [`SchemaError::Unavailable`] when the schema itself cannot run.
	async fn validate_at(&self, field: &str, values: &FormValues) -> Result<(), SchemaError>;
}
