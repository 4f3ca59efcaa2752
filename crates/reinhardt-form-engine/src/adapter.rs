//! Raw UI input to field values
//!
//! The UI layer reports what the user did in one of a few shapes; each shape
//! maps to exactly one [`FieldValue`] form.

use reinhardt_form_validators::FieldValue;
use serde::{Deserialize, Serialize};

/// One `<option>` of a multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	pub value: String,
	pub selected: bool,
}

impl SelectOption {
	pub fn new(value: impl Into<String>, selected: bool) -> Self {
		Self {
			value: value.into(),
			selected,
		}
	}
}

/// Input as reported by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawInput {
	/// Text-like inputs: text, email, password, textarea, single select
	Text { value: String },
	Checkbox { checked: bool },
	/// One radio button of a group
	Radio { value: String, checked: bool },
	SelectMultiple { options: Vec<SelectOption> },
}

impl RawInput {
	/// Convert to the value stored for the field
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_engine::{RawInput, SelectOption};
	/// use reinhardt_form_validators::FieldValue;
	///
	/// let input = RawInput::SelectMultiple {
	///     options: vec![SelectOption::new("red", true), SelectOption::new("blue", false)],
	/// };
	/// assert_eq!(input.into_value(), FieldValue::from(vec!["red"]));
	/// ```
	pub fn into_value(self) -> FieldValue {
		match self {
			Self::Text { value } => FieldValue::Text(value),
			Self::Checkbox { checked } => FieldValue::Bool(checked),
			Self::Radio { value, checked: true } => FieldValue::Text(value),
			Self::Radio { checked: false, .. } => FieldValue::Null,
			Self::SelectMultiple { options } => FieldValue::List(
				options
					.into_iter()
					.filter(|option| option.selected)
					.map(|option| option.value)
					.collect(),
			),
		}
	}
}

impl From<RawInput> for FieldValue {
	fn from(input: RawInput) -> Self {
		input.into_value()
	}
}
