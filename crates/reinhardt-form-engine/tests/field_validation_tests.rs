//! Field-level validation tests
//!
//! Tests change/blur validation through the engine: short-circuiting,
//! undetermined outcomes, guard conditions, pristine tracking, radio groups
//! and field removal.

use async_trait::async_trait;
use reinhardt_form_engine::{FormEngine, RawInput, ValidationTrigger};
use reinhardt_form_validators::{
	EventType, FieldResult, FieldValidity, FieldValue, FormValues, SchemaError,
	UndeterminedValidation, ValidationInput, ValidationSchema, Validator, builtin, conditions,
};
use rstest::{fixture, rstest};
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const BLUR_AND_SUBMIT: [EventType; 2] = [EventType::Blur, EventType::Submit];

#[fixture]
fn form() -> FormEngine {
	FormEngine::default()
}

/// Test: Required e-mail blurred while empty reports REQUIRED only
#[rstest]
#[tokio::test]
async fn test_email_blur_required(form: FormEngine) {
	form.register_field(
		"email",
		"",
		vec![
			builtin::required().on_all(BLUR_AND_SUBMIT),
			builtin::email().on_all(BLUR_AND_SUBMIT),
		],
	);

	let trigger = form.on_blur("email", "", 1).await.unwrap();

	let expected = FieldResult::invalid("email", vec!["REQUIRED".to_string()]);
	assert_eq!(trigger, ValidationTrigger::Committed(expected.clone()));
	assert_eq!(
		form.field_validity("email"),
		Some(FieldValidity::Settled(expected))
	);
}

/// Test: A malformed address passes REQUIRED and fails INVALID_EMAIL
#[rstest]
#[tokio::test]
async fn test_email_blur_malformed(form: FormEngine) {
	form.register_field(
		"email",
		"",
		vec![
			builtin::required().on_all(BLUR_AND_SUBMIT),
			builtin::email().on_all(BLUR_AND_SUBMIT),
		],
	);

	let trigger = form.on_blur("email", "asfafaff@com.a", 1).await.unwrap();
	assert_eq!(
		trigger.result().unwrap().errors,
		Some(vec!["INVALID_EMAIL".to_string()])
	);

	let trigger = form.on_blur("email", "asfafaff@com.com", 2).await.unwrap();
	assert!(trigger.result().unwrap().valid);
}

/// Test: Validators after the first invalid one are never invoked
#[rstest]
#[tokio::test]
async fn test_pipeline_short_circuit(form: FormEngine) {
	let b_calls = Arc::new(AtomicUsize::new(0));
	let a = Validator::from_fn("A", |_: &ValidationInput| Ok::<_, Infallible>(false))
		.on(EventType::Blur);
	let b = {
		let b_calls = Arc::clone(&b_calls);
		Validator::from_fn("B", move |_: &ValidationInput| {
			b_calls.fetch_add(1, Ordering::SeqCst);
			Ok::<_, Infallible>(true)
		})
		.on(EventType::Blur)
	};
	form.register_field("name", "", vec![a, b]);

	let trigger = form.on_blur("name", "x", 1).await.unwrap();

	assert_eq!(
		trigger.result().unwrap().errors,
		Some(vec!["A".to_string()])
	);
	assert_eq!(b_calls.load(Ordering::SeqCst), 0);
}

/// Test: An event with no applicable validator leaves the record untouched
#[rstest]
#[tokio::test]
async fn test_no_applicable_validators_keeps_record(form: FormEngine) {
	form.register_field("name", "", vec![builtin::required().on(EventType::Blur)]);
	form.on_blur("name", "", 1).await.unwrap();
	let before = form.field_validity("name");

	let trigger = form.on_change("name", "George", 2).await.unwrap();

	assert_eq!(trigger, ValidationTrigger::NoOp);
	assert_eq!(form.field_validity("name"), before);
}

/// Test: A validator that throws is undetermined and the field stays valid
#[rstest]
#[tokio::test]
async fn test_throwing_validator_is_undetermined(form: FormEngine) {
	let throwing = Validator::from_fn("X", |_: &ValidationInput| -> Result<bool, Infallible> {
		panic!("oh no")
	})
	.on(EventType::Change);
	form.register_field("name", "", vec![throwing]);

	let trigger = form.on_change("name", "a", 1).await.unwrap();

	let result = trigger.result().unwrap();
	assert!(result.valid);
	assert!(result.errors.is_none());
	assert_eq!(
		result.undetermined_validations,
		Some(vec![UndeterminedValidation {
			error: "X".to_string(),
			additional: "validator panicked: oh no".to_string(),
		}])
	);
}

/// Test: Reward early, validate late
///
/// The guarded change validator stays silent until a blur has flagged the
/// field, then re-validates on every change until the field is valid again.
#[rstest]
#[tokio::test]
async fn test_reward_early_validate_late(form: FormEngine) {
	form.register_field(
		"name",
		"",
		vec![
			builtin::required()
				.on(EventType::Blur)
				.on_if(EventType::Change, conditions::reward_early_validate_late),
		],
	);

	assert_eq!(
		form.on_change("name", "", 1).await.unwrap(),
		ValidationTrigger::NoOp
	);
	assert!(form.field_validity("name").is_none());

	let blurred = form.on_blur("name", "", 2).await.unwrap();
	assert!(!blurred.result().unwrap().valid);

	let fixed = form.on_change("name", "G", 3).await.unwrap();
	assert!(fixed.result().unwrap().valid);

	// Valid again, so the guard goes quiet
	assert_eq!(
		form.on_change("name", "", 4).await.unwrap(),
		ValidationTrigger::NoOp
	);
	assert!(form.field_validity("name").unwrap().is_valid());
}

/// Test: Changing back to the registered value makes the field pristine again
#[rstest]
#[tokio::test]
async fn test_pristine_round_trip(form: FormEngine) {
	let handle = form.register_field("name", "George", vec![]);
	assert!(handle.ui_state().unwrap().pristine);

	handle.change("Jungle", 1).await.unwrap();
	assert!(!handle.ui_state().unwrap().pristine);

	handle.change("George", 2).await.unwrap();
	assert!(handle.ui_state().unwrap().pristine);
}

/// Test: Re-registering an existing id keeps its value and baseline
#[rstest]
#[tokio::test]
async fn test_reregister_keeps_value_and_replaces_validators(form: FormEngine) {
	form.register_field("name", "a", vec![]);
	form.on_change("name", "b", 1).await.unwrap();

	form.register_field("name", "z", vec![builtin::required().on(EventType::Blur)]);

	assert_eq!(form.value("name"), Some(FieldValue::from("b")));
	assert!(!form.field_ui_state("name").unwrap().pristine);
	let trigger = form.on_blur("name", "", 2).await.unwrap();
	assert!(matches!(trigger, ValidationTrigger::Committed(_)));
}

/// Test: Remove then re-register resets value, baseline and validity
#[rstest]
#[tokio::test]
async fn test_remove_then_register_resets_baseline(form: FormEngine) {
	form.register_field("name", "a", vec![builtin::required().on(EventType::Blur)]);
	form.on_change("name", "b", 1).await.unwrap();
	form.on_blur("name", "", 2).await.unwrap();
	assert!(form.field_validity("name").is_some());

	assert!(form.remove_field("name"));
	assert!(!form.is_registered("name"));
	assert!(form.value("name").is_none());
	assert!(form.field_validity("name").is_none());

	form.register_field("name", "c", vec![]);
	assert_eq!(form.value("name"), Some(FieldValue::from("c")));
	assert!(form.field_ui_state("name").unwrap().pristine);
	assert!(form.field_validity("name").is_none());

	// Stamps start over after removal
	form.register_field("name", "c", vec![builtin::required().on(EventType::Blur)]);
	let trigger = form.on_blur("name", "", 1).await.unwrap();
	assert!(matches!(trigger, ValidationTrigger::Committed(_)));
}

/// Test: Removing an unknown field is a no-op
#[rstest]
fn test_remove_unknown_field(form: FormEngine) {
	let revision = form.revision();
	assert!(!form.remove_field("ghost"));
	assert_eq!(form.revision(), revision);
}

/// Test: Blur that moves focus within a radio group is suppressed
#[rstest]
#[tokio::test]
async fn test_radio_group_blur_suppression(form: FormEngine) {
	form.register_radio_group("gender", None::<&str>, vec![builtin::required().on(EventType::Blur)]);

	let trigger = form
		.on_blur_related("gender", None::<&str>, 1, Some("gender"))
		.await
		.unwrap();
	assert_eq!(trigger, ValidationTrigger::Suppressed);
	assert!(form.field_validity("gender").is_none());

	let trigger = form
		.on_blur_related("gender", None::<&str>, 2, Some("submit-button"))
		.await
		.unwrap();
	assert!(!trigger.result().unwrap().valid);
}

/// Test: Blur related to the same id is not suppressed for plain inputs
#[rstest]
#[tokio::test]
async fn test_input_blur_related_is_not_suppressed(form: FormEngine) {
	form.register_field("name", "", vec![builtin::required().on(EventType::Blur)]);

	let trigger = form
		.on_blur_related("name", "", 1, Some("name"))
		.await
		.unwrap();

	assert!(matches!(trigger, ValidationTrigger::Committed(_)));
}

/// Test: Raw radio and checkbox input flow through the adapter
#[rstest]
#[tokio::test]
async fn test_raw_input_adapter(form: FormEngine) {
	let gender = form.register_radio_group("gender", None::<&str>, vec![]);
	let agree = form.register_field(
		"agreeToTerms",
		false,
		vec![builtin::must_be_true().on(EventType::Change)],
	);

	gender
		.change(
			RawInput::Radio {
				value: "female".to_string(),
				checked: true,
			},
			1,
		)
		.await
		.unwrap();
	let trigger = agree
		.change(RawInput::Checkbox { checked: true }, 1)
		.await
		.unwrap();

	assert_eq!(gender.value(), Some(FieldValue::from("female")));
	assert!(trigger.result().unwrap().valid);
	assert_eq!(form.snapshot().fields.len(), 2);
	assert_eq!(
		form.snapshot().values.get("agreeToTerms"),
		Some(&FieldValue::Bool(true))
	);
}

/// Test: Cross-field validator sees the other field's current value
#[rstest]
#[tokio::test]
async fn test_confirm_email(form: FormEngine) {
	form.register_field("email", "", vec![]);
	form.register_field(
		"confirmEmail",
		"",
		vec![builtin::matches_field("email", "EMAILS_DO_NOT_MATCH").on(EventType::Blur)],
	);
	form.on_change("email", "george@thejungle.com", 1).await.unwrap();

	let mismatch = form
		.on_blur("confirmEmail", "george@jungle.com", 1)
		.await
		.unwrap();
	let matched = form
		.on_blur("confirmEmail", "george@thejungle.com", 2)
		.await
		.unwrap();

	assert_eq!(
		mismatch.result().unwrap().errors,
		Some(vec!["EMAILS_DO_NOT_MATCH".to_string()])
	);
	assert!(matched.result().unwrap().valid);
}

struct FirstNameSchema;

#[async_trait]
impl ValidationSchema for FirstNameSchema {
	async fn validate_at(&self, field: &str, values: &FormValues) -> Result<(), SchemaError> {
		match values.get(field).and_then(FieldValue::as_text) {
			Some(text) if text.len() >= 2 => Ok(()),
			_ => Err(SchemaError::Invalid(format!("{} is too short", field))),
		}
	}
}

/// Test: Schema validator sees the value being validated
#[rstest]
#[tokio::test]
async fn test_schema_validator(form: FormEngine) {
	let form = form.with_schema(Arc::new(FirstNameSchema));
	form.register_field("firstName", "", vec![builtin::schema().on(EventType::Blur)]);

	let short = form.on_blur("firstName", "G", 1).await.unwrap();
	let long = form.on_blur("firstName", "George", 2).await.unwrap();

	assert_eq!(
		short.result().unwrap().errors,
		Some(vec!["INVALID_SCHEMA".to_string()])
	);
	assert!(long.result().unwrap().valid);
}

/// Test: Every mutation bumps the watched revision
#[rstest]
#[tokio::test]
async fn test_subscribe_sees_revisions(form: FormEngine) {
	let mut revisions = form.subscribe();
	let start = *revisions.borrow_and_update();

	form.register_field("name", "", vec![builtin::required().on(EventType::Blur)]);
	assert!(revisions.has_changed().unwrap());

	form.on_blur("name", "", 1).await.unwrap();
	// marker plus committed result
	assert!(*revisions.borrow_and_update() >= start + 3);
	assert_eq!(form.snapshot().revision, form.revision());
}
