//! Dynamically typed field values
//!
//! A form field can hold plain text, a boolean (checkboxes), a list of strings
//! (multi-selects) or a domain value such as a date. `FieldValue` is the
//! closed set of shapes the engine tracks; converting raw UI input into one of
//! them is the job of the input adapter, not of the validators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a field, unique within one form
pub type FieldId = String;

/// The form record: every registered field's current value
pub type FormValues = BTreeMap<FieldId, FieldValue>;

/// Current value of a form field
///
/// Serialized untagged, so the JSON shape is exactly what a UI layer would
/// send: `null`, `true`, `"text"`, `["a", "b"]`. A JSON string is always
/// text; dates are written as `{"date": "YYYY-MM-DD"}` so that text which
/// happens to look like a date stays text.
///
/// # Examples
///
/// ```
/// use reinhardt_form_validators::FieldValue;
///
/// let value = FieldValue::from("hello");
/// assert_eq!(value.as_text(), Some("hello"));
/// assert!(!value.is_empty());
/// assert!(FieldValue::Null.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	/// No value (unset, or an unchecked radio button)
	#[default]
	Null,
	/// Checkbox state
	Bool(bool),
	/// Free text
	Text(String),
	/// Calendar date
	Date(#[serde(with = "tagged_date")] NaiveDate),
	/// Selected options of a multi-select
	List(Vec<String>),
}

impl FieldValue {
	/// Returns `true` when the value carries no user input.
	///
	/// `Null`, `false` (an unchecked checkbox), empty text and empty lists
	/// are empty. Dates are always considered present.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Null => true,
			Self::Bool(flag) => !flag,
			Self::Text(text) => text.is_empty(),
			Self::List(items) => items.is_empty(),
			Self::Date(_) => false,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(flag) => Some(*flag),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_date(&self) -> Option<NaiveDate> {
		match self {
			Self::Date(date) => Some(*date),
			_ => None,
		}
	}
}

mod tagged_date {
	use chrono::NaiveDate;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	#[derive(Serialize, Deserialize)]
	#[serde(deny_unknown_fields)]
	struct Tagged {
		date: NaiveDate,
	}

	pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
		Tagged { date: *date }.serialize(serializer)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
		Tagged::deserialize(deserializer).map(|tagged| tagged.date)
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => Ok(()),
			Self::Bool(flag) => write!(f, "{}", flag),
			Self::Date(date) => write!(f, "{}", date),
			Self::Text(text) => f.write_str(text),
			Self::List(items) => f.write_str(&items.join(",")),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<NaiveDate> for FieldValue {
	fn from(value: NaiveDate) -> Self {
		Self::Date(value)
	}
}

impl From<Vec<String>> for FieldValue {
	fn from(value: Vec<String>) -> Self {
		Self::List(value)
	}
}

impl From<Vec<&str>> for FieldValue {
	fn from(value: Vec<&str>) -> Self {
		Self::List(value.into_iter().map(str::to_string).collect())
	}
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(FieldValue::Null, true)]
	#[case(FieldValue::from(""), true)]
	#[case(FieldValue::from("a"), false)]
	#[case(FieldValue::List(vec![]), true)]
	#[case(FieldValue::from(vec!["red"]), false)]
	#[case(FieldValue::Bool(false), true)]
	#[case(FieldValue::Bool(true), false)]
	#[case(FieldValue::Date(NaiveDate::from_ymd_opt(2018, 2, 1).unwrap()), false)]
	fn test_is_empty(#[case] value: FieldValue, #[case] expected: bool) {
		assert_eq!(value.is_empty(), expected);
	}

	#[rstest]
	fn test_deserialize_untagged_shapes() {
		let values: Vec<FieldValue> = serde_json::from_value(json!([
			null,
			true,
			{ "date": "2018-02-01" },
			"george",
			["red", "green"]
		]))
		.unwrap();

		assert_eq!(values[0], FieldValue::Null);
		assert_eq!(values[1], FieldValue::Bool(true));
		assert_eq!(
			values[2],
			FieldValue::Date(NaiveDate::from_ymd_opt(2018, 2, 1).unwrap())
		);
		assert_eq!(values[3], FieldValue::from("george"));
		assert_eq!(values[4], FieldValue::from(vec!["red", "green"]));
	}

	#[rstest]
	#[case(FieldValue::from("2018-02-01"), json!("2018-02-01"))]
	#[case(FieldValue::Date(NaiveDate::from_ymd_opt(2018, 2, 1).unwrap()), json!({ "date": "2018-02-01" }))]
	fn test_date_like_text_stays_text(#[case] value: FieldValue, #[case] encoded: serde_json::Value) {
		let json = serde_json::to_value(&value).unwrap();
		assert_eq!(json, encoded);

		let back: FieldValue = serde_json::from_value(json).unwrap();
		assert_eq!(back, value);
	}

	#[rstest]
	fn test_option_conversion() {
		assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
		assert_eq!(FieldValue::from(Some("10")), FieldValue::from("10"));
	}

	#[rstest]
	fn test_display_list_joins_with_commas() {
		assert_eq!(FieldValue::from(vec!["a", "b"]).to_string(), "a,b");
		assert_eq!(FieldValue::Null.to_string(), "");
	}
}
