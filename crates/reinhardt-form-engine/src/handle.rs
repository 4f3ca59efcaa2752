//! Per-field handle

use crate::engine::{FormEngine, ValidationTrigger};
use crate::error::FormResult;
use crate::registry::FieldUiState;
use crate::scheduler::RunStamp;
use reinhardt_form_validators::{FieldId, FieldValidity, FieldValue};

/// A field of a [`FormEngine`], as handed back by registration
///
/// Handles are cheap to clone and stay valid after the field is removed;
/// reads then return `None` and events fail with
/// [`FormError::UnknownField`](crate::FormError::UnknownField).
#[derive(Debug, Clone)]
pub struct FieldHandle {
	engine: FormEngine,
	id: FieldId,
}

impl FieldHandle {
	pub(crate) fn new(engine: FormEngine, id: FieldId) -> Self {
		Self { engine, id }
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn engine(&self) -> &FormEngine {
		&self.engine
	}

	pub fn value(&self) -> Option<FieldValue> {
		self.engine.value(&self.id)
	}

	pub fn ui_state(&self) -> Option<FieldUiState> {
		self.engine.field_ui_state(&self.id)
	}

	pub fn validity(&self) -> Option<FieldValidity> {
		self.engine.field_validity(&self.id)
	}

	pub async fn change(
		&self,
		value: impl Into<FieldValue>,
		stamp: impl Into<RunStamp>,
	) -> FormResult<ValidationTrigger> {
		self.engine.on_change(&self.id, value, stamp).await
	}

	/// Set the value from code; behaves exactly like a change event
	pub async fn set_value(
		&self,
		value: impl Into<FieldValue>,
		stamp: impl Into<RunStamp>,
	) -> FormResult<ValidationTrigger> {
		self.change(value, stamp).await
	}

	pub async fn blur(
		&self,
		value: impl Into<FieldValue>,
		stamp: impl Into<RunStamp>,
	) -> FormResult<ValidationTrigger> {
		self.engine.on_blur(&self.id, value, stamp).await
	}

	pub fn focus(&self) -> FormResult<()> {
		self.engine.on_focus(&self.id)
	}

	/// Remove the field from its form
	pub fn remove(self) -> bool {
		self.engine.remove_field(&self.id)
	}
}
