//! Form-level UI state and read-only snapshots

use crate::registry::FieldUiState;
use reinhardt_form_validators::{FieldId, FormValues, ValidityMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submit state machine flags
///
/// idle → validating → submitting → idle. `is_valid` stays optimistic
/// until a submit has finished validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormUiState {
	pub is_validating: bool,
	pub is_submitting: bool,
	pub is_valid: bool,
}

impl Default for FormUiState {
	fn default() -> Self {
		Self {
			is_validating: false,
			is_submitting: false,
			is_valid: true,
		}
	}
}

/// Everything a UI needs to render the form, taken under one lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
	pub id: String,
	pub ui_state: FormUiState,
	pub values: FormValues,
	pub validity: ValidityMap,
	pub fields: BTreeMap<FieldId, FieldUiState>,
	/// Revision the snapshot was taken at; see [`FormEngine::subscribe`](crate::FormEngine::subscribe)
	pub revision: u64,
}
