//! Field values and validators for the Reinhardt form-state engine
//!
//! This crate provides the leaf types the engine is built on:
//! - `FieldValue` / `FormValues`: dynamically typed field values
//! - `Validator`: async predicates with an error code and a `when` set
//! - `FieldResult` / `FieldValidity`: per-field validation records
//! - Built-in validators (`required`, `email`, `must_be_true`, `schema`, `matches_field`)
//! - `ValidationSchema`: seam for external schema libraries

pub mod builtin;
pub mod errors;
pub mod event;
pub mod schema;
pub mod validator;
pub mod validity;
pub mod value;

pub use builtin::{email, matches_field, must_be_true, required, schema};
pub use errors::{SchemaError, ValidatorError, ValidatorResult};
pub use event::{Condition, ConditionContext, EventType, When, conditions};
pub use schema::ValidationSchema;
pub use validator::{
	DEFAULT_ERROR_CODE, ValidationInput, ValidationOutcome, Validator, panic_message,
};
pub use validity::{FieldResult, FieldValidity, UndeterminedValidation, ValidityMap};
pub use value::{FieldId, FieldValue, FormValues};

pub mod prelude {
	pub use crate::builtin;
	pub use crate::event::conditions;
	pub use crate::{
		EventType, FieldResult, FieldValidity, FieldValue, FormValues, SchemaError,
		ValidationInput, ValidationOutcome, ValidationSchema, Validator,
	};
}
