//! Registered fields and their values

use reinhardt_form_validators::{FieldId, FieldValue, FormValues, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How a field receives its value from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	/// A single input element
	Input,
	/// Several radio inputs sharing one field id
	RadioGroup,
}

/// Per-field UI flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUiState {
	/// Current value equals the value given at registration
	pub pristine: bool,
	/// The field has received focus at least once
	pub visited: bool,
}

impl Default for FieldUiState {
	fn default() -> Self {
		Self {
			pristine: true,
			visited: false,
		}
	}
}

#[derive(Debug, Clone)]
pub(crate) struct FieldEntry {
	pub(crate) value: FieldValue,
	pub(crate) original: FieldValue,
	pub(crate) visited: bool,
	pub(crate) kind: FieldKind,
	pub(crate) validators: Arc<Vec<Validator>>,
	/// Bumped on every fresh registration; runs started against an earlier
	/// registration of the same id never commit.
	pub(crate) generation: u64,
}

impl FieldEntry {
	pub(crate) fn ui_state(&self) -> FieldUiState {
		FieldUiState {
			pristine: self.value == self.original,
			visited: self.visited,
		}
	}
}

/// Field id to value, baseline and validators
#[derive(Debug, Default)]
pub(crate) struct FieldRegistry {
	fields: BTreeMap<FieldId, FieldEntry>,
	next_generation: u64,
}

impl FieldRegistry {
	/// Register `id`, or replace the validators of an existing registration
	///
	/// The first registration fixes the value, original value and kind;
	/// later ones only swap the validator set. Returns `true` for a fresh
	/// registration.
	pub(crate) fn register(
		&mut self,
		id: &str,
		initial: FieldValue,
		kind: FieldKind,
		validators: Vec<Validator>,
	) -> bool {
		if let Some(entry) = self.fields.get_mut(id) {
			entry.validators = Arc::new(validators);
			return false;
		}

		self.next_generation += 1;
		self.fields.insert(
			id.to_string(),
			FieldEntry {
				value: initial.clone(),
				original: initial,
				visited: false,
				kind,
				validators: Arc::new(validators),
				generation: self.next_generation,
			},
		);
		true
	}

	pub(crate) fn remove(&mut self, id: &str) -> Option<FieldEntry> {
		self.fields.remove(id)
	}

	pub(crate) fn get(&self, id: &str) -> Option<&FieldEntry> {
		self.fields.get(id)
	}

	pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut FieldEntry> {
		self.fields.get_mut(id)
	}

	pub(crate) fn contains(&self, id: &str) -> bool {
		self.fields.contains_key(id)
	}

	pub(crate) fn generation(&self, id: &str) -> Option<u64> {
		self.fields.get(id).map(|entry| entry.generation)
	}

	pub(crate) fn ids(&self) -> impl Iterator<Item = &FieldId> {
		self.fields.keys()
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldEntry)> {
		self.fields.iter()
	}

	pub(crate) fn values(&self) -> FormValues {
		self.fields
			.iter()
			.map(|(id, entry)| (id.clone(), entry.value.clone()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_first_registration_fixes_baseline() {
		let mut registry = FieldRegistry::default();
		assert!(registry.register("name", FieldValue::from("a"), FieldKind::Input, vec![]));
		assert!(!registry.register(
			"name",
			FieldValue::from("b"),
			FieldKind::RadioGroup,
			vec![reinhardt_form_validators::required()]
		));

		let entry = registry.get("name").unwrap();
		assert_eq!(entry.value, FieldValue::from("a"));
		assert_eq!(entry.original, FieldValue::from("a"));
		assert_eq!(entry.kind, FieldKind::Input);
		assert_eq!(entry.validators.len(), 1);
	}

	#[rstest]
	fn test_reregistration_after_remove_gets_new_generation() {
		let mut registry = FieldRegistry::default();
		registry.register("name", FieldValue::Null, FieldKind::Input, vec![]);
		let first = registry.generation("name");
		registry.remove("name");
		registry.register("name", FieldValue::Null, FieldKind::Input, vec![]);
		assert_ne!(registry.generation("name"), first);
	}

	#[rstest]
	fn test_pristine_follows_value() {
		let mut registry = FieldRegistry::default();
		registry.register("name", FieldValue::from("a"), FieldKind::Input, vec![]);
		let entry = registry.get_mut("name").unwrap();
		entry.value = FieldValue::from("b");
		assert!(!entry.ui_state().pristine);
		entry.value = FieldValue::from("a");
		assert!(entry.ui_state().pristine);
	}
}
