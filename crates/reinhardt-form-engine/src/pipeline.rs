//! Per-field validator pipeline
//!
//! Validators run one at a time in registration order. The first `Invalid`
//! outcome stops the pipeline; undetermined outcomes are collected and the
//! pipeline carries on.

use reinhardt_form_validators::{
	ConditionContext, EventType, FieldResult, FieldValue, FormValues, ValidationInput,
	ValidationOutcome, ValidationSchema, Validator,
};
use std::sync::Arc;

/// Result of running a field's pipeline for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
	/// No validator applies to the event; the validity record stays as is
	NoOp,
	Settled(FieldResult),
}

/// Validators whose `when` set matches `event_type` in `context`
///
/// Guard conditions are evaluated once, against `context` as it is now.
pub fn applicable_validators(
	validators: &[Validator],
	event_type: EventType,
	context: &ConditionContext<'_>,
) -> Vec<Validator> {
	validators
		.iter()
		.filter(|validator| validator.applies_to(event_type, context))
		.cloned()
		.collect()
}

/// Run already-filtered validators in order
///
/// An empty list settles as valid; use [`run_validators`] to get `NoOp`.
pub async fn run_applicable(
	field: &str,
	applicable: &[Validator],
	value: &FieldValue,
	values: Arc<FormValues>,
	schema: Option<Arc<dyn ValidationSchema>>,
) -> FieldResult {
	let mut undetermined = Vec::new();

	for validator in applicable {
		tracing::trace!(field, error_code = validator.error(), "running validator");
		let input = ValidationInput {
			field: field.to_string(),
			value: value.clone(),
			values: Arc::clone(&values),
			schema: schema.clone(),
		};

		match validator.validate(input).await {
			ValidationOutcome::Valid => {}
			ValidationOutcome::Invalid { error } => {
				return FieldResult::invalid(field, vec![error]).with_undetermined(undetermined);
			}
			ValidationOutcome::Undetermined(validation) => undetermined.push(validation),
		}
	}

	FieldResult::valid(field).with_undetermined(undetermined)
}

/// Filter `validators` for `event_type` and run the applicable ones
///
/// # Examples
///
/// ```
/// use reinhardt_form_engine::pipeline::{run_validators, PipelineOutcome};
/// use reinhardt_form_validators::{builtin, ConditionContext, EventType, FieldValue, FormValues, ValidityMap};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let validators = vec![builtin::required().on(EventType::Blur)];
/// let values = FormValues::new();
/// let validity = ValidityMap::new();
/// let context = ConditionContext { field: "name", validity: &validity, values: &values };
///
/// let outcome = run_validators("name", &validators, EventType::Change, &FieldValue::Null, &context, None).await;
/// assert_eq!(outcome, PipelineOutcome::NoOp);
/// # });
/// ```
pub async fn run_validators(
	field: &str,
	validators: &[Validator],
	event_type: EventType,
	value: &FieldValue,
	context: &ConditionContext<'_>,
	schema: Option<Arc<dyn ValidationSchema>>,
) -> PipelineOutcome {
	let applicable = applicable_validators(validators, event_type, context);
	if applicable.is_empty() {
		return PipelineOutcome::NoOp;
	}
	let values = Arc::new(context.values.clone());
	PipelineOutcome::Settled(run_applicable(field, &applicable, value, values, schema).await)
}
