//! Form engine settings
//!
//! Settings can be built in code, or parsed from TOML or JSON:
//!
//! ```toml
//! form_id = "signup"
//! dedupe_in_flight = true
//! change_debounce_ms = 300
//! invoke_handler_when_invalid = false
//! ```

use crate::error::SettingsError;
use reinhardt_form_validators::DEFAULT_ERROR_CODE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted change debounce
pub const MAX_CHANGE_DEBOUNCE_MS: u64 = 60_000;

/// Behaviour knobs of a [`FormEngine`](crate::FormEngine)
///
/// # Examples
///
/// ```
/// use reinhardt_form_engine::FormSettings;
///
/// let settings = FormSettings::from_toml_str("form_id = \"signup\"\nchange_debounce_ms = 250").unwrap();
/// assert_eq!(settings.form_id, "signup");
/// assert!(settings.dedupe_in_flight);
/// assert_eq!(settings.change_debounce().map(|d| d.as_millis()), Some(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Form identifier, used in logs and snapshots
	pub form_id: String,
	/// Error code for validators built without one
	pub default_error_code: String,
	/// Ignore a change/blur whose value is already being validated
	pub dedupe_in_flight: bool,
	/// Wait this long after a change before validating it
	pub change_debounce_ms: Option<u64>,
	/// Call the submit handler even when the form is invalid
	pub invoke_handler_when_invalid: bool,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			form_id: "form".to_string(),
			default_error_code: DEFAULT_ERROR_CODE.to_string(),
			dedupe_in_flight: true,
			change_debounce_ms: None,
			invoke_handler_when_invalid: true,
		}
	}
}

impl FormSettings {
	pub fn new(form_id: impl Into<String>) -> Self {
		Self {
			form_id: form_id.into(),
			..Self::default()
		}
	}

	pub fn with_dedupe_in_flight(mut self, enabled: bool) -> Self {
		self.dedupe_in_flight = enabled;
		self
	}

	pub fn with_change_debounce(mut self, debounce: Duration) -> Self {
		self.change_debounce_ms = Some(u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX));
		self
	}

	pub fn with_invoke_handler_when_invalid(mut self, enabled: bool) -> Self {
		self.invoke_handler_when_invalid = enabled;
		self
	}

	/// Parse and validate settings from a TOML document.
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Parse and validate settings from a JSON document.
	pub fn from_json_str(content: &str) -> Result<Self, SettingsError> {
		let settings: Self = serde_json::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.form_id.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "form_id",
				reason: "must not be empty".to_string(),
			});
		}
		if self.default_error_code.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "default_error_code",
				reason: "must not be empty".to_string(),
			});
		}
		if let Some(ms) = self.change_debounce_ms
			&& ms > MAX_CHANGE_DEBOUNCE_MS
		{
			return Err(SettingsError::Invalid {
				key: "change_debounce_ms",
				reason: format!("{} exceeds the maximum of {}", ms, MAX_CHANGE_DEBOUNCE_MS),
			});
		}
		Ok(())
	}

	/// Debounce applied to change validation, if any
	///
	/// A zero debounce counts as none.
	pub fn change_debounce(&self) -> Option<Duration> {
		self.change_debounce_ms
			.filter(|ms| *ms > 0)
			.map(Duration::from_millis)
	}
}
