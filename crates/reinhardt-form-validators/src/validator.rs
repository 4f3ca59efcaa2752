//! Async validators
//!
//! A [`Validator`] wraps a user predicate together with an error code and the
//! set of events it applies to. Whatever the predicate does, `validate`
//! normalizes it into a [`ValidationOutcome`]:
//!
//! | Predicate result          | Outcome                          |
//! |---------------------------|----------------------------------|
//! | `Ok(true)`                | `Valid`                          |
//! | `Ok(false)`               | `Invalid { error }`              |
//! | `Err(e)` or a panic       | `Undetermined(..)`               |
//!
//! Undetermined outcomes are fail-open: they are reported, but they never
//! make a field invalid on their own.

use crate::errors::ValidatorError;
use crate::event::{ConditionContext, EventType, When};
use crate::schema::ValidationSchema;
use crate::validity::UndeterminedValidation;
use crate::value::{FieldId, FieldValue, FormValues};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Error code used by validators that were not given one
pub const DEFAULT_ERROR_CODE: &str = "ERROR_KEY";

type ValidateFn =
	Arc<dyn Fn(ValidationInput) -> BoxFuture<'static, Result<bool, ValidatorError>> + Send + Sync>;

/// Everything a validator gets to look at
#[derive(Clone)]
pub struct ValidationInput {
	pub field: FieldId,
	pub value: FieldValue,
	/// Snapshot of the whole form taken when the pipeline started
	pub values: Arc<FormValues>,
	pub schema: Option<Arc<dyn ValidationSchema>>,
}

impl ValidationInput {
	/// Input for a standalone validation with no surrounding form
	pub fn standalone(field: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
		Self {
			field: field.into(),
			value: value.into(),
			values: Arc::new(FormValues::new()),
			schema: None,
		}
	}
}

impl fmt::Debug for ValidationInput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ValidationInput")
			.field("field", &self.field)
			.field("value", &self.value)
			.field("values", &self.values)
			.field("has_schema", &self.schema.is_some())
			.finish()
	}
}

/// Normalized result of a single validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
	Valid,
	Invalid { error: String },
	Undetermined(UndeterminedValidation),
}

impl ValidationOutcome {
	pub fn is_invalid(&self) -> bool {
		matches!(self, Self::Invalid { .. })
	}
}

/// A named validation rule with its applicability set
///
/// Validators are immutable once built; cloning shares the predicate.
///
/// # Examples
///
/// ```
/// use reinhardt_form_validators::{EventType, ValidationInput, ValidationOutcome, Validator};
/// use std::convert::Infallible;
///
/// # tokio_test::block_on(async {
/// let min_three = Validator::from_fn("TOO_SHORT", |input: &ValidationInput| {
///     Ok::<_, Infallible>(input.value.to_string().len() >= 3)
/// })
/// .on_all([EventType::Blur, EventType::Submit]);
///
/// let outcome = min_three.validate(ValidationInput::standalone("name", "ab")).await;
/// assert_eq!(outcome, ValidationOutcome::Invalid { error: "TOO_SHORT".to_string() });
/// # });
/// ```
#[derive(Clone)]
pub struct Validator {
	error: String,
	when: Vec<When>,
	validate: ValidateFn,
}

impl Validator {
	/// Build a validator from an async predicate
	pub fn new<F, Fut, E>(error: impl Into<String>, predicate: F) -> Self
	where
		F: Fn(ValidationInput) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<bool, E>> + Send + 'static,
		E: fmt::Display + Send + 'static,
	{
		let validate: ValidateFn = Arc::new(move |input| {
			let pending = predicate(input);
			async move {
				pending
					.await
					.map_err(|e| ValidatorError::Failed(e.to_string()))
			}
			.boxed()
		});
		Self {
			error: error.into(),
			when: Vec::new(),
			validate,
		}
	}

	/// Build a validator from a synchronous predicate
	pub fn from_fn<F, E>(error: impl Into<String>, predicate: F) -> Self
	where
		F: Fn(&ValidationInput) -> Result<bool, E> + Send + Sync + 'static,
		E: fmt::Display + Send + 'static,
	{
		Self::new(error, move |input: ValidationInput| {
			std::future::ready(predicate(&input))
		})
	}

	/// Build a validator that reports [`DEFAULT_ERROR_CODE`] when it fails
	pub fn with_default_code<F, Fut, E>(predicate: F) -> Self
	where
		F: Fn(ValidationInput) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<bool, E>> + Send + 'static,
		E: fmt::Display + Send + 'static,
	{
		Self::new(DEFAULT_ERROR_CODE, predicate)
	}

	/// Replace the error code, keeping predicate and `when` set
	pub fn with_error(mut self, error: impl Into<String>) -> Self {
		self.error = error.into();
		self
	}

	/// Apply on `event_type`
	pub fn on(mut self, event_type: EventType) -> Self {
		self.when.push(When::Event(event_type));
		self
	}

	/// Apply on each of `event_types`
	pub fn on_all(mut self, event_types: impl IntoIterator<Item = EventType>) -> Self {
		self.when
			.extend(event_types.into_iter().map(When::Event));
		self
	}

	/// Apply on `event_type` only while `condition` holds
	pub fn on_if<C>(mut self, event_type: EventType, condition: C) -> Self
	where
		C: Fn(&ConditionContext<'_>) -> bool + Send + Sync + 'static,
	{
		self.when.push(When::Guarded {
			event_type,
			condition: Arc::new(condition),
		});
		self
	}

	pub fn error(&self) -> &str {
		&self.error
	}

	pub fn when(&self) -> &[When] {
		&self.when
	}

	/// Whether any `when` entry matches the event in this context
	pub fn applies_to(&self, event_type: EventType, context: &ConditionContext<'_>) -> bool {
		self.when
			.iter()
			.any(|when| when.applies(event_type, context))
	}

	/// Run the predicate and normalize its result
	///
	/// Panics raised while building or polling the predicate's future are
	/// caught and reported as undetermined.
	pub async fn validate(&self, input: ValidationInput) -> ValidationOutcome {
		let field = input.field.clone();
		let validate = Arc::clone(&self.validate);
		let result = match std::panic::catch_unwind(AssertUnwindSafe(|| validate(input))) {
			Ok(pending) => match AssertUnwindSafe(pending).catch_unwind().await {
				Ok(result) => result,
				Err(payload) => Err(ValidatorError::Panicked(panic_message(payload))),
			},
			Err(payload) => Err(ValidatorError::Panicked(panic_message(payload))),
		};

		match result {
			Ok(true) => ValidationOutcome::Valid,
			Ok(false) => ValidationOutcome::Invalid {
				error: self.error.clone(),
			},
			Err(e) => {
				tracing::warn!(
					field = %field,
					error_code = %self.error,
					cause = %e,
					"validator could not determine validity"
				);
				ValidationOutcome::Undetermined(UndeterminedValidation {
					error: self.error.clone(),
					additional: e.to_string(),
				})
			}
		}
	}
}

impl fmt::Debug for Validator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Validator")
			.field("error", &self.error)
			.field("when", &self.when)
			.finish_non_exhaustive()
	}
}

/// Best-effort text of a caught panic payload
pub fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic payload".to_string()
	}
}
