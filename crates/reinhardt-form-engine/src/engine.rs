//! Form engine
//!
//! [`FormEngine`] owns the field registry, the validity records, the run
//! scheduler and the submit state machine. It is a cheap `Clone` handle;
//! every clone drives the same form.
//!
//! All state lives behind one mutex that is only held for short,
//! synchronous critical sections. Validators run with the lock released, so
//! several fields (and several runs of one field) can be in flight at once.
//! A run writes its field's validity record only at its checkpoints, and only
//! while it is still the latest run for that field.

use crate::error::{FormError, FormResult};
use crate::handle::FieldHandle;
use crate::pipeline;
use crate::registry::{FieldKind, FieldRegistry, FieldUiState};
use crate::scheduler::{Checkpoint, RunScheduler, RunStamp};
use crate::settings::FormSettings;
use crate::state::{FormSnapshot, FormUiState};
use futures::FutureExt;
use futures::future::join_all;
use parking_lot::Mutex;
use reinhardt_form_validators::{
	ConditionContext, EventType, FieldId, FieldResult, FieldValidity, FieldValue, FormValues,
	ValidationInput, ValidationSchema, Validator, ValidityMap, panic_message,
};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;

/// What a change, blur or submit did to a field's validity record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationTrigger {
	/// No validator applies to the event; the record is unchanged
	NoOp,
	/// The same value is already being validated
	Deduplicated,
	/// Blur suppressed because focus stayed inside the radio group
	Suppressed,
	/// A newer run started (or the field was removed) before this one could
	/// write its result
	Superseded,
	/// The run finished as the latest and its result was recorded
	Committed(FieldResult),
}

impl ValidationTrigger {
	pub fn result(&self) -> Option<&FieldResult> {
		match self {
			Self::Committed(result) => Some(result),
			_ => None,
		}
	}
}

/// What happened to the submit handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
	NotProvided,
	Completed,
	/// Not called because the form was invalid
	Skipped,
	/// The handler returned an error or panicked
	Failed(String),
}

/// Result of [`FormEngine::submit`] / [`FormEngine::submit_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
	pub is_valid: bool,
	pub results: BTreeMap<FieldId, ValidationTrigger>,
	pub handler: HandlerOutcome,
}

impl SubmitReport {
	pub fn field_result(&self, id: &str) -> Option<&FieldResult> {
		self.results.get(id).and_then(ValidationTrigger::result)
	}
}

/// Where one submit call is in the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitPhase {
	Validating,
	Submitting,
}

/// Submit calls currently in each phase
///
/// Overlapping submits (a double click) each hold one slot, so the UI flags
/// only clear once the last of them leaves the phase.
#[derive(Debug, Default)]
struct SubmitCounts {
	validating: usize,
	submitting: usize,
}

impl SubmitCounts {
	fn slot(&mut self, phase: SubmitPhase) -> &mut usize {
		match phase {
			SubmitPhase::Validating => &mut self.validating,
			SubmitPhase::Submitting => &mut self.submitting,
		}
	}
}

struct FormState {
	registry: FieldRegistry,
	validity: ValidityMap,
	scheduler: RunScheduler,
	ui: FormUiState,
	submits: SubmitCounts,
	schema: Option<Arc<dyn ValidationSchema>>,
}

impl FormState {
	fn new() -> Self {
		Self {
			registry: FieldRegistry::default(),
			validity: ValidityMap::new(),
			scheduler: RunScheduler::new(),
			ui: FormUiState::default(),
			submits: SubmitCounts::default(),
			schema: None,
		}
	}

	fn enter_phase(&mut self, phase: SubmitPhase) {
		*self.submits.slot(phase) += 1;
		self.sync_submit_flags();
	}

	fn leave_phase(&mut self, phase: SubmitPhase) {
		let slot = self.submits.slot(phase);
		*slot = slot.saturating_sub(1);
		self.sync_submit_flags();
	}

	fn sync_submit_flags(&mut self) {
		self.ui.is_validating = self.submits.validating > 0;
		self.ui.is_submitting = self.submits.submitting > 0;
	}

	/// Run is still the latest for a registration that still exists
	fn is_current(
		&self,
		field: &str,
		stamp: RunStamp,
		generation: u64,
		checkpoint: Checkpoint,
	) -> bool {
		self.registry.generation(field) == Some(generation)
			&& self.scheduler.checkpoint(field, stamp, checkpoint)
	}

	/// AND over every registered field's record
	///
	/// Unvalidated fields count as valid, in-flight ones as not valid.
	fn aggregate_validity(&self) -> bool {
		self.registry
			.ids()
			.all(|id| match self.validity.get(id) {
				None => true,
				Some(FieldValidity::Settled(result)) => result.valid,
				Some(FieldValidity::Validating { .. }) => false,
			})
	}
}

struct EngineInner {
	settings: FormSettings,
	state: Mutex<FormState>,
	revision: watch::Sender<u64>,
}

/// Form-state and validation engine
///
/// # Examples
///
/// ```
/// use reinhardt_form_engine::FormEngine;
/// use reinhardt_form_validators::{builtin, EventType};
///
/// # tokio_test::block_on(async {
/// let form = FormEngine::default();
/// form.register_field(
///     "email",
///     "",
///     vec![
///         builtin::required().on_all([EventType::Blur, EventType::Submit]),
///         builtin::email().on_all([EventType::Blur, EventType::Submit]),
///     ],
/// );
///
/// let trigger = form.on_blur("email", "", 1).await.unwrap();
/// let result = trigger.result().unwrap();
/// assert!(!result.valid);
/// assert_eq!(result.errors, Some(vec!["REQUIRED".to_string()]));
/// # });
/// ```
#[derive(Clone)]
pub struct FormEngine {
	inner: Arc<EngineInner>,
}

impl Default for FormEngine {
	fn default() -> Self {
		Self::from_settings(FormSettings::default())
	}
}

impl FormEngine {
	/// Create an engine after validating `settings`
	pub fn new(settings: FormSettings) -> FormResult<Self> {
		settings.validate()?;
		Ok(Self::from_settings(settings))
	}

	/// Create an engine with default settings and the given form id
	pub fn with_id(id: impl Into<String>) -> FormResult<Self> {
		Self::new(FormSettings::new(id))
	}

	fn from_settings(settings: FormSettings) -> Self {
		let (revision, _) = watch::channel(0);
		Self {
			inner: Arc::new(EngineInner {
				settings,
				state: Mutex::new(FormState::new()),
				revision,
			}),
		}
	}

	/// Attach the schema used by [`builtin::schema`](reinhardt_form_validators::builtin::schema)
	pub fn with_schema(self, schema: Arc<dyn ValidationSchema>) -> Self {
		self.inner.state.lock().schema = Some(schema);
		self
	}

	pub fn id(&self) -> &str {
		&self.inner.settings.form_id
	}

	pub fn settings(&self) -> &FormSettings {
		&self.inner.settings
	}

	/// Build a validator that fails with the configured default error code
	pub fn custom_validator<F, Fut, E>(&self, predicate: F) -> Validator
	where
		F: Fn(ValidationInput) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<bool, E>> + Send + 'static,
		E: fmt::Display + Send + 'static,
	{
		Validator::new(self.inner.settings.default_error_code.clone(), predicate)
	}

	fn notify(&self) {
		self.inner.revision.send_modify(|revision| *revision += 1);
	}

	fn unknown(id: &str) -> FormError {
		FormError::UnknownField(id.to_string())
	}

	/// Register an input field
	///
	/// Registering an id that already exists keeps its value and baseline
	/// and replaces its validators.
	pub fn register_field(
		&self,
		id: impl Into<FieldId>,
		initial: impl Into<FieldValue>,
		validators: Vec<Validator>,
	) -> FieldHandle {
		self.register(id.into(), initial.into(), FieldKind::Input, validators)
	}

	/// Register a radio group: several radio inputs sharing one field id
	pub fn register_radio_group(
		&self,
		id: impl Into<FieldId>,
		initial: impl Into<FieldValue>,
		validators: Vec<Validator>,
	) -> FieldHandle {
		self.register(id.into(), initial.into(), FieldKind::RadioGroup, validators)
	}

	fn register(
		&self,
		id: FieldId,
		initial: FieldValue,
		kind: FieldKind,
		validators: Vec<Validator>,
	) -> FieldHandle {
		let fresh = {
			let mut state = self.inner.state.lock();
			state.registry.register(&id, initial, kind, validators)
		};
		tracing::debug!(form = %self.id(), field = %id, ?kind, fresh, "field registered");
		self.notify();
		FieldHandle::new(self.clone(), id)
	}

	/// Forget a field entirely: value, baseline, validators, validity and
	/// run stamp
	///
	/// Returns `false` when no such field is registered. Runs still in
	/// flight for the field are discarded at their next checkpoint.
	pub fn remove_field(&self, id: &str) -> bool {
		let removed = {
			let mut state = self.inner.state.lock();
			let removed = state.registry.remove(id).is_some();
			if removed {
				state.validity.remove(id);
				state.scheduler.forget(id);
			}
			removed
		};
		if removed {
			tracing::debug!(form = %self.id(), field = id, "field removed");
			self.notify();
		}
		removed
	}

	/// Record a new value and run the field's change validators
	///
	/// A change older than the field's latest run is stale: the stored value
	/// is left alone and the trigger is `Superseded`.
	pub async fn on_change(
		&self,
		id: &str,
		value: impl Into<FieldValue>,
		stamp: impl Into<RunStamp>,
	) -> FormResult<ValidationTrigger> {
		let value = value.into();
		let stamp = stamp.into();
		let stale = {
			let mut state = self.inner.state.lock();
			let stale = state
				.scheduler
				.latest(id)
				.is_some_and(|latest| stamp < latest);
			let entry = state.registry.get_mut(id).ok_or_else(|| Self::unknown(id))?;
			if !stale {
				entry.value = value.clone();
			}
			stale
		};
		if stale {
			tracing::debug!(form = %self.id(), field = id, %stamp, "stale change ignored");
			return Ok(ValidationTrigger::Superseded);
		}
		self.notify();

		let debounce = self.inner.settings.change_debounce();
		Ok(self
			.run_validation(id, EventType::Change, value, stamp, debounce)
			.await)
	}

	/// Run the field's blur validators against `value`
	///
	/// The stored value is not touched; blur reports what the UI shows.
	pub async fn on_blur(
		&self,
		id: &str,
		value: impl Into<FieldValue>,
		stamp: impl Into<RunStamp>,
	) -> FormResult<ValidationTrigger> {
		if !self.inner.state.lock().registry.contains(id) {
			return Err(Self::unknown(id));
		}
		Ok(self
			.run_validation(id, EventType::Blur, value.into(), stamp.into(), None)
			.await)
	}

	/// Blur carrying the id of the element that receives focus next
	///
	/// For a radio group, moving focus to another radio of the same group is
	/// not a blur of the field and is suppressed.
	pub async fn on_blur_related(
		&self,
		id: &str,
		value: impl Into<FieldValue>,
		stamp: impl Into<RunStamp>,
		related_target: Option<&str>,
	) -> FormResult<ValidationTrigger> {
		let kind = self
			.inner
			.state
			.lock()
			.registry
			.get(id)
			.map(|entry| entry.kind)
			.ok_or_else(|| Self::unknown(id))?;

		if kind == FieldKind::RadioGroup && related_target == Some(id) {
			tracing::trace!(form = %self.id(), field = id, "blur within radio group suppressed");
			return Ok(ValidationTrigger::Suppressed);
		}
		self.on_blur(id, value, stamp).await
	}

	/// Mark the field visited
	pub fn on_focus(&self, id: &str) -> FormResult<()> {
		let changed = {
			let mut state = self.inner.state.lock();
			let entry = state.registry.get_mut(id).ok_or_else(|| Self::unknown(id))?;
			!std::mem::replace(&mut entry.visited, true)
		};
		if changed {
			self.notify();
		}
		Ok(())
	}

	async fn run_validation(
		&self,
		id: &str,
		event_type: EventType,
		value: FieldValue,
		stamp: RunStamp,
		debounce: Option<std::time::Duration>,
	) -> ValidationTrigger {
		let form = self.id();
		let (applicable, values, schema, generation) = {
			let mut state = self.inner.state.lock();
			let Some(entry) = state.registry.get(id) else {
				return ValidationTrigger::Superseded;
			};
			let validators = Arc::clone(&entry.validators);
			let generation = entry.generation;
			let values = state.registry.values();

			let context = ConditionContext {
				field: id,
				validity: &state.validity,
				values: &values,
			};
			let applicable = pipeline::applicable_validators(&validators, event_type, &context);
			if applicable.is_empty() {
				tracing::trace!(form = %form, field = id, event = %event_type, "no applicable validators");
				return ValidationTrigger::NoOp;
			}

			let in_flight = state
				.validity
				.get(id)
				.and_then(FieldValidity::validating_value);
			if self.inner.settings.dedupe_in_flight
				&& event_type != EventType::Submit
				&& in_flight == Some(&value)
			{
				tracing::debug!(form = %form, field = id, event = %event_type, %stamp, "value already being validated");
				return ValidationTrigger::Deduplicated;
			}

			if !state.scheduler.begin_run(id, stamp) {
				tracing::debug!(form = %form, field = id, event = %event_type, %stamp, "validation run started stale");
				return ValidationTrigger::Superseded;
			}
			(applicable, Arc::new(values), state.schema.clone(), generation)
		};
		tracing::debug!(form = %form, field = id, event = %event_type, %stamp, validators = applicable.len(), "validation run started");

		if let Some(debounce) = debounce {
			tokio::time::sleep(debounce).await;
			let state = self.inner.state.lock();
			if !state.is_current(id, stamp, generation, Checkpoint::AfterDebounce) {
				return ValidationTrigger::Superseded;
			}
		}

		{
			let mut state = self.inner.state.lock();
			if !state.is_current(id, stamp, generation, Checkpoint::MarkValidating) {
				return ValidationTrigger::Superseded;
			}
			state.validity.insert(
				id.to_string(),
				FieldValidity::Validating {
					value: value.clone(),
				},
			);
		}
		self.notify();

		let result = pipeline::run_applicable(id, &applicable, &value, values, schema).await;

		{
			let mut state = self.inner.state.lock();
			if !state.is_current(id, stamp, generation, Checkpoint::Commit) {
				return ValidationTrigger::Superseded;
			}
			state
				.validity
				.insert(id.to_string(), FieldValidity::Settled(result.clone()));
		}
		self.notify();
		tracing::debug!(form = %form, field = id, event = %event_type, %stamp, valid = result.valid, "validation run committed");

		ValidationTrigger::Committed(result)
	}

	/// Validate every field for submit without calling a handler
	pub async fn submit(&self, stamp: impl Into<RunStamp>) -> SubmitReport {
		self.submit_inner(
			stamp.into(),
			None::<fn(FormValues) -> std::future::Ready<Result<(), Infallible>>>,
		)
		.await
	}

	/// Validate every field, then hand the values to `handler`
	///
	/// The handler runs while `is_submitting` is set. Its errors and panics
	/// are logged and reported in [`SubmitReport::handler`], never
	/// propagated. `is_validating` and `is_submitting` are reset on every
	/// exit path, including the returned future being dropped.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_engine::{FormEngine, HandlerOutcome};
	/// use reinhardt_form_validators::{builtin, EventType};
	///
	/// # tokio_test::block_on(async {
	/// let form = FormEngine::default();
	/// form.register_field("name", "George", vec![builtin::required().on(EventType::Submit)]);
	///
	/// let report = form
	///     .submit_with(1, |values| async move {
	///         assert_eq!(values["name"].as_text(), Some("George"));
	///         Ok::<_, std::convert::Infallible>(())
	///     })
	///     .await;
	/// assert!(report.is_valid);
	/// assert_eq!(report.handler, HandlerOutcome::Completed);
	/// assert!(!form.ui_state().is_submitting);
	/// # });
	/// ```
	pub async fn submit_with<H, Fut, E>(&self, stamp: impl Into<RunStamp>, handler: H) -> SubmitReport
	where
		H: FnOnce(FormValues) -> Fut,
		Fut: Future<Output = Result<(), E>>,
		E: fmt::Display,
	{
		self.submit_inner(stamp.into(), Some(handler)).await
	}

	async fn submit_inner<H, Fut, E>(&self, stamp: RunStamp, handler: Option<H>) -> SubmitReport
	where
		H: FnOnce(FormValues) -> Fut,
		Fut: Future<Output = Result<(), E>>,
		E: fmt::Display,
	{
		let form = self.id();
		let fields: Vec<(FieldId, FieldValue)> = {
			let mut state = self.inner.state.lock();
			let fields = state
				.registry
				.iter()
				.map(|(id, entry)| (id.clone(), entry.value.clone()))
				.collect();
			state.enter_phase(SubmitPhase::Validating);
			fields
		};
		let mut guard = SubmitGuard {
			engine: self,
			phase: SubmitPhase::Validating,
		};
		self.notify();
		tracing::debug!(form = %form, %stamp, fields = fields.len(), "submit started");

		let runs = fields.into_iter().map(|(id, value)| async move {
			let trigger = self
				.run_validation(&id, EventType::Submit, value, stamp, None)
				.await;
			(id, trigger)
		});
		let results: BTreeMap<FieldId, ValidationTrigger> = join_all(runs).await.into_iter().collect();

		let (is_valid, values) = {
			let mut state = self.inner.state.lock();
			let is_valid = state.aggregate_validity();
			let values = state.registry.values();
			state.leave_phase(SubmitPhase::Validating);
			state.enter_phase(SubmitPhase::Submitting);
			// An overlapping submit still validating owns `is_valid`
			if !state.ui.is_validating {
				state.ui.is_valid = is_valid;
			}
			(is_valid, values)
		};
		guard.phase = SubmitPhase::Submitting;
		self.notify();

		let handler = match handler {
			None => HandlerOutcome::NotProvided,
			Some(_) if !is_valid && !self.inner.settings.invoke_handler_when_invalid => {
				tracing::debug!(form = %form, "submit handler skipped for invalid form");
				HandlerOutcome::Skipped
			}
			Some(handler) => Self::invoke_handler(form, handler, values).await,
		};

		tracing::info!(form = %form, is_valid, handler = ?handler, "form submitted");
		SubmitReport {
			is_valid,
			results,
			handler,
		}
	}

	async fn invoke_handler<H, Fut, E>(form: &str, handler: H, values: FormValues) -> HandlerOutcome
	where
		H: FnOnce(FormValues) -> Fut,
		Fut: Future<Output = Result<(), E>>,
		E: fmt::Display,
	{
		let pending = match std::panic::catch_unwind(AssertUnwindSafe(|| handler(values))) {
			Ok(pending) => pending,
			Err(payload) => {
				let message = panic_message(payload);
				tracing::error!(form = %form, error = %message, "submit handler panicked");
				return HandlerOutcome::Failed(message);
			}
		};

		match AssertUnwindSafe(pending).catch_unwind().await {
			Ok(Ok(())) => HandlerOutcome::Completed,
			Ok(Err(e)) => {
				tracing::error!(form = %form, error = %e, "submit handler failed");
				HandlerOutcome::Failed(e.to_string())
			}
			Err(payload) => {
				let message = panic_message(payload);
				tracing::error!(form = %form, error = %message, "submit handler panicked");
				HandlerOutcome::Failed(message)
			}
		}
	}

	pub fn ui_state(&self) -> FormUiState {
		self.inner.state.lock().ui
	}

	pub fn values(&self) -> FormValues {
		self.inner.state.lock().registry.values()
	}

	pub fn value(&self, id: &str) -> Option<FieldValue> {
		self.inner
			.state
			.lock()
			.registry
			.get(id)
			.map(|entry| entry.value.clone())
	}

	pub fn validity(&self) -> ValidityMap {
		self.inner.state.lock().validity.clone()
	}

	pub fn field_validity(&self, id: &str) -> Option<FieldValidity> {
		self.inner.state.lock().validity.get(id).cloned()
	}

	pub fn field_ui_state(&self, id: &str) -> Option<FieldUiState> {
		self.inner
			.state
			.lock()
			.registry
			.get(id)
			.map(|entry| entry.ui_state())
	}

	pub fn is_registered(&self, id: &str) -> bool {
		self.inner.state.lock().registry.contains(id)
	}

	/// Consistent view of the whole form
	pub fn snapshot(&self) -> FormSnapshot {
		let state = self.inner.state.lock();
		FormSnapshot {
			id: self.id().to_string(),
			ui_state: state.ui,
			values: state.registry.values(),
			validity: state.validity.clone(),
			fields: state
				.registry
				.iter()
				.map(|(id, entry)| (id.clone(), entry.ui_state()))
				.collect(),
			revision: *self.inner.revision.borrow(),
		}
	}

	/// Watch the state revision
	///
	/// The revision increases after every mutation of values, UI flags or
	/// validity records; re-read a [`snapshot`](Self::snapshot) when it
	/// changes.
	pub fn subscribe(&self) -> watch::Receiver<u64> {
		self.inner.revision.subscribe()
	}

	pub fn revision(&self) -> u64 {
		*self.inner.revision.borrow()
	}
}

impl fmt::Debug for FormEngine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormEngine")
			.field("id", &self.id())
			.field("ui_state", &self.ui_state())
			.finish_non_exhaustive()
	}
}

/// Releases this submit's phase slot however the submit ends
struct SubmitGuard<'a> {
	engine: &'a FormEngine,
	phase: SubmitPhase,
}

impl Drop for SubmitGuard<'_> {
	fn drop(&mut self) {
		self.engine.inner.state.lock().leave_phase(self.phase);
		self.engine.notify();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_form_validators::builtin;
	use rstest::{fixture, rstest};

	#[fixture]
	fn form() -> FormEngine {
		FormEngine::default()
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_field_events_are_errors(form: FormEngine) {
		assert!(matches!(
			form.on_change("missing", "a", 1).await,
			Err(FormError::UnknownField(id)) if id == "missing"
		));
		assert!(form.on_blur("missing", "a", 1).await.is_err());
		assert!(form.on_focus("missing").is_err());
		assert!(!form.remove_field("missing"));
	}

	#[rstest]
	fn test_focus_marks_visited(form: FormEngine) {
		form.register_field("name", "", vec![]);
		assert_eq!(form.field_ui_state("name"), Some(FieldUiState::default()));

		form.on_focus("name").unwrap();
		assert!(form.field_ui_state("name").unwrap().visited);
	}

	#[rstest]
	#[tokio::test]
	async fn test_change_without_validators_updates_value_only(form: FormEngine) {
		form.register_field("name", "", vec![]);

		let trigger = form.on_change("name", "George", 1).await.unwrap();

		assert_eq!(trigger, ValidationTrigger::NoOp);
		assert_eq!(form.value("name"), Some(FieldValue::from("George")));
		assert!(form.field_validity("name").is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_blur_does_not_store_value(form: FormEngine) {
		form.register_field("name", "a", vec![builtin::required().on(EventType::Blur)]);

		let trigger = form.on_blur("name", "", 1).await.unwrap();

		assert!(!trigger.result().unwrap().valid);
		assert_eq!(form.value("name"), Some(FieldValue::from("a")));
	}

	#[rstest]
	#[tokio::test]
	async fn test_stale_stamp_is_superseded(form: FormEngine) {
		form.register_field("name", "", vec![builtin::required().on(EventType::Blur)]);
		form.on_blur("name", "a", 5).await.unwrap();

		let trigger = form.on_blur("name", "", 3).await.unwrap();

		assert_eq!(trigger, ValidationTrigger::Superseded);
		assert!(form.field_validity("name").unwrap().is_valid());
	}

	#[rstest]
	#[tokio::test]
	async fn test_panicking_guard_skips_validator(form: FormEngine) {
		let validator = builtin::required().on_if(EventType::Change, |_: &ConditionContext<'_>| {
			if true {
				panic!("guard exploded");
			}
			true
		});
		form.register_field("name", "", vec![validator]);

		let trigger = form.on_change("name", "", 1).await.unwrap();

		assert_eq!(trigger, ValidationTrigger::NoOp);
		assert!(form.field_validity("name").is_none());
	}

	#[rstest]
	fn test_new_rejects_invalid_settings() {
		let result = FormEngine::new(FormSettings::new(""));
		assert!(matches!(result, Err(FormError::Settings(_))));
	}

	#[rstest]
	fn test_custom_validator_uses_configured_code() {
		let mut settings = FormSettings::new("signup");
		settings.default_error_code = "INVALID".to_string();
		let form = FormEngine::new(settings).unwrap();

		let validator = form.custom_validator(|_input: ValidationInput| async {
			Ok::<_, Infallible>(false)
		});

		assert_eq!(validator.error(), "INVALID");
	}

	#[rstest]
	fn test_snapshot_serializes(form: FormEngine) {
		form.register_field("agree", false, vec![]);
		let snapshot = form.snapshot();

		let json = serde_json::to_value(&snapshot).unwrap();
		assert_eq!(json["id"], "form");
		assert_eq!(json["values"]["agree"], false);
		assert_eq!(json["fields"]["agree"]["pristine"], true);
		assert_eq!(json["ui_state"]["is_valid"], true);
	}
}
