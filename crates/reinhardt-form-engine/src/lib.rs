//! Form-state engine for Reinhardt
//!
//! Tracks the fields of a form, their values and pristine/visited flags, and
//! orchestrates asynchronous validation:
//! - `pipeline`: runs a field's applicable validators in order, stopping at
//!   the first invalid outcome
//! - `scheduler`: per-field "latest run wins" ordering by logical stamp
//! - `engine`: the `FormEngine` itself, with change/blur/focus/submit entry
//!   points and the validating → submitting state machine
//! - `adapter`: conversion of raw UI input into field values
//!
//! Validators and value types live in `reinhardt-form-validators`.

pub mod adapter;
pub mod engine;
pub mod error;
pub mod handle;
pub mod pipeline;
mod registry;
pub mod scheduler;
pub mod settings;
pub mod state;

pub use adapter::{RawInput, SelectOption};
pub use engine::{FormEngine, HandlerOutcome, SubmitReport, ValidationTrigger};
pub use error::{FormError, FormResult, SettingsError};
pub use handle::FieldHandle;
pub use pipeline::PipelineOutcome;
pub use registry::{FieldKind, FieldUiState};
pub use scheduler::{Checkpoint, RunScheduler, RunStamp};
pub use settings::FormSettings;
pub use state::{FormSnapshot, FormUiState};
