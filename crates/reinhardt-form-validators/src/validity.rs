//! Field validity records
//!
//! A field is either unvalidated (no record in the map), validating (a run is
//! in flight for a specific value) or settled with a [`FieldResult`].

use crate::value::{FieldId, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validity records of a whole form, keyed by field id
pub type ValidityMap = BTreeMap<FieldId, FieldValidity>;

/// A validator that could not reach a verdict
///
/// `error` is the validator's configured code, `additional` is the cause
/// reported by the failing validator (error message or panic payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndeterminedValidation {
	pub error: String,
	pub additional: String,
}

/// Settled outcome of one pipeline run for a field
///
/// # Examples
///
/// ```
/// use reinhardt_form_validators::FieldResult;
///
/// let result = FieldResult::invalid("email", vec!["REQUIRED".to_string()]);
/// assert!(!result.valid);
/// assert_eq!(result.errors.as_deref(), Some(&["REQUIRED".to_string()][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResult {
	pub field: FieldId,
	pub valid: bool,
	/// Present only when `valid` is false
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<Vec<String>>,
	/// Present whenever at least one validator was undetermined
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub undetermined_validations: Option<Vec<UndeterminedValidation>>,
}

impl FieldResult {
	pub fn valid(field: impl Into<FieldId>) -> Self {
		Self {
			field: field.into(),
			valid: true,
			errors: None,
			undetermined_validations: None,
		}
	}

	pub fn invalid(field: impl Into<FieldId>, errors: Vec<String>) -> Self {
		Self {
			field: field.into(),
			valid: false,
			errors: Some(errors),
			undetermined_validations: None,
		}
	}

	/// Attaches undetermined outcomes; an empty list leaves the field unset.
	pub fn with_undetermined(mut self, undetermined: Vec<UndeterminedValidation>) -> Self {
		self.undetermined_validations = if undetermined.is_empty() {
			None
		} else {
			Some(undetermined)
		};
		self
	}
}

/// Validity record of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldValidity {
	/// A run is in flight for `value`
	Validating { value: FieldValue },
	/// The latest run settled
	Settled(FieldResult),
}

impl FieldValidity {
	pub fn is_validating(&self) -> bool {
		matches!(self, Self::Validating { .. })
	}

	/// The settled result, if the record is not in flight
	pub fn result(&self) -> Option<&FieldResult> {
		match self {
			Self::Settled(result) => Some(result),
			Self::Validating { .. } => None,
		}
	}

	/// True only for a settled, valid record
	pub fn is_valid(&self) -> bool {
		self.result().is_some_and(|result| result.valid)
	}

	/// Value of the in-flight run, if any
	pub fn validating_value(&self) -> Option<&FieldValue> {
		match self {
			Self::Validating { value } => Some(value),
			Self::Settled(_) => None,
		}
	}
}
