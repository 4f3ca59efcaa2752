//! Engine error types

use reinhardt_form_validators::FieldId;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(FieldId),
	#[error("Settings error: {0}")]
	Settings(#[from] SettingsError),
}

pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while loading or validating [`FormSettings`](crate::FormSettings)
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to parse TOML settings: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("Failed to parse JSON settings: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Invalid setting `{key}`: {reason}")]
	Invalid { key: &'static str, reason: String },
}
