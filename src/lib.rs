//! # Reinhardt Form State
//!
//! Form-state and asynchronous validation orchestration for reactive UIs.
//!
//! The engine tracks named fields, their values and pristine/visited flags,
//! and runs per-field async validator pipelines on change, blur and submit.
//! Concurrent runs for the same field are ordered by logical stamp: only the
//! latest run may write the field's validity, however late an older run
//! finishes.
//!
//! ## Feature Flags
//!
//! - `engine` - `FormEngine`, pipeline, scheduler and raw-input adapter
//! - `full` (default) - everything
//!
//! Validators and value types are always available.
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_form_state::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let form = FormEngine::default();
//! let email = form.register_field(
//!     "email",
//!     "",
//!     vec![
//!         builtin::required().on_all([EventType::Blur, EventType::Submit]),
//!         builtin::email()
//!             .on(EventType::Blur)
//!             .on_if(EventType::Change, conditions::reward_early_validate_late),
//!     ],
//! );
//!
//! email.change("george@thejungle", 1).await.unwrap();
//! let blurred = email.blur("george@thejungle", 2).await.unwrap();
//! assert_eq!(blurred.result().unwrap().errors, Some(vec!["INVALID_EMAIL".to_string()]));
//!
//! let fixed = email.change("george@thejungle.com", 3).await.unwrap();
//! assert!(fixed.result().unwrap().valid);
//!
//! let report = form.submit(4).await;
//! assert!(report.is_valid);
//! # });
//! ```

pub use reinhardt_form_validators as validators;

#[cfg(feature = "engine")]
pub use reinhardt_form_engine as engine;

pub use reinhardt_form_validators::{
	EventType, FieldId, FieldResult, FieldValidity, FieldValue, FormValues, SchemaError,
	ValidationInput, ValidationOutcome, ValidationSchema, Validator, builtin, conditions,
};

#[cfg(feature = "engine")]
pub use reinhardt_form_engine::{
	FieldHandle, FormEngine, FormError, FormResult, FormSettings, FormSnapshot, FormUiState,
	HandlerOutcome, RawInput, RunStamp, SubmitReport, ValidationTrigger,
};

/// Commonly used types
pub mod prelude {
	pub use reinhardt_form_validators::prelude::*;

	#[cfg(feature = "engine")]
	pub use reinhardt_form_engine::{
		FieldHandle, FormEngine, FormSettings, FormUiState, HandlerOutcome, RawInput,
		SubmitReport, ValidationTrigger,
	};
}
