//! Built-in validators
//!
//! Each constructor returns a [`Validator`] with an empty `when` set; attach
//! the events it should run on with [`Validator::on`] /
//! [`Validator::on_all`] / [`Validator::on_if`].

use crate::errors::SchemaError;
use crate::validator::{ValidationInput, Validator};
use crate::value::FieldValue;
use regex::Regex;
use std::convert::Infallible;
use std::sync::LazyLock;

pub const REQUIRED: &str = "REQUIRED";
pub const INVALID_EMAIL: &str = "INVALID_EMAIL";
pub const MUST_BE_TRUE: &str = "MUST_BE_TRUE";
pub const INVALID_SCHEMA: &str = "INVALID_SCHEMA";

// Local part: dot-separated atoms or a quoted string.
// Domain: bracketed IPv4 literal, or dotted labels ending in a TLD of two or
// more letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Fails with `REQUIRED` when the value is empty
///
/// # Examples
///
/// ```
/// use reinhardt_form_validators::{builtin, ValidationInput, ValidationOutcome};
///
/// # tokio_test::block_on(async {
/// let outcome = builtin::required().validate(ValidationInput::standalone("name", "")).await;
/// assert!(outcome.is_invalid());
/// # });
/// ```
pub fn required() -> Validator {
	Validator::from_fn(REQUIRED, |input: &ValidationInput| {
		Ok::<_, Infallible>(!input.value.is_empty())
	})
}

/// Fails with `INVALID_EMAIL` unless the value looks like an e-mail address
///
/// Empty values pass; pair it with [`required`] to reject them.
pub fn email() -> Validator {
	Validator::from_fn(INVALID_EMAIL, |input: &ValidationInput| {
		let valid = match &input.value {
			FieldValue::Null => true,
			FieldValue::Text(text) => {
				text.is_empty() || EMAIL_REGEX.is_match(&text.to_lowercase())
			}
			_ => false,
		};
		Ok::<_, Infallible>(valid)
	})
}

/// Fails with `MUST_BE_TRUE` unless the value is the boolean `true`
///
/// Used for "agree to terms" checkboxes. The text `"true"` does not count.
pub fn must_be_true() -> Validator {
	Validator::from_fn(MUST_BE_TRUE, |input: &ValidationInput| {
		Ok::<_, Infallible>(input.value == FieldValue::Bool(true))
	})
}

/// Delegates to the form's [`ValidationSchema`](crate::ValidationSchema)
///
/// The schema sees the form snapshot with this field's value substituted for
/// the value being validated. A rejection is `INVALID_SCHEMA`; a missing or
/// failing schema is undetermined.
pub fn schema() -> Validator {
	Validator::new(INVALID_SCHEMA, |input: ValidationInput| async move {
		let Some(schema) = input.schema.clone() else {
			return Err(SchemaError::Unavailable(
				"no validation schema configured".to_string(),
			));
		};
		let mut values = (*input.values).clone();
		values.insert(input.field.clone(), input.value.clone());

		match schema.validate_at(&input.field, &values).await {
			Ok(()) => Ok(true),
			Err(SchemaError::Invalid(reason)) => {
				tracing::trace!(field = %input.field, %reason, "schema rejected value");
				Ok(false)
			}
			Err(e) => Err(e),
		}
	})
}

/// Fails with `error` unless the value equals the current value of `other`
///
/// The classic "confirm e-mail" check.
pub fn matches_field(other: impl Into<String>, error: impl Into<String>) -> Validator {
	let other = other.into();
	Validator::from_fn(error, move |input: &ValidationInput| {
		let expected = input.values.get(&other).unwrap_or(&FieldValue::Null);
		Ok::<_, Infallible>(*expected == input.value)
	})
}
