//! Validation trigger events and `when` applicability rules

use crate::validator::panic_message;
use crate::validity::ValidityMap;
use crate::value::FormValues;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// UI event that can trigger validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
	#[serde(rename = "onChange")]
	Change,
	#[serde(rename = "onBlur")]
	Blur,
	#[serde(rename = "onSubmit")]
	Submit,
}

impl EventType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Change => "onChange",
			Self::Blur => "onBlur",
			Self::Submit => "onSubmit",
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Form state a guard condition may inspect
///
/// Built once per pipeline invocation; guards never see updates made while
/// the pipeline is running.
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
	pub field: &'a str,
	pub validity: &'a ValidityMap,
	pub values: &'a FormValues,
}

/// Guard predicate attached to a `when` entry
pub type Condition = Arc<dyn Fn(&ConditionContext<'_>) -> bool + Send + Sync>;

/// One entry of a validator's `when` set
#[derive(Clone)]
pub enum When {
	/// Applies whenever the event fires
	Event(EventType),
	/// Applies when the event fires and the condition holds
	Guarded {
		event_type: EventType,
		condition: Condition,
	},
}

impl When {
	pub fn event_type(&self) -> EventType {
		match self {
			Self::Event(event_type) => *event_type,
			Self::Guarded { event_type, .. } => *event_type,
		}
	}

	/// A guard that panics counts as not applicable.
	pub fn applies(&self, event_type: EventType, context: &ConditionContext<'_>) -> bool {
		match self {
			Self::Event(own) => *own == event_type,
			Self::Guarded {
				event_type: own,
				condition,
			} => {
				*own == event_type
					&& std::panic::catch_unwind(AssertUnwindSafe(|| condition(context)))
						.unwrap_or_else(|payload| {
							tracing::warn!(
								field = context.field,
								event = %event_type,
								cause = %panic_message(payload),
								"guard condition panicked"
							);
							false
						})
			}
		}
	}
}

impl From<EventType> for When {
	fn from(event_type: EventType) -> Self {
		Self::Event(event_type)
	}
}

impl fmt::Debug for When {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Event(event_type) => f.debug_tuple("Event").field(event_type).finish(),
			Self::Guarded { event_type, .. } => f
				.debug_struct("Guarded")
				.field("event_type", event_type)
				.finish_non_exhaustive(),
		}
	}
}

/// Stock guard conditions
pub mod conditions {
	use super::ConditionContext;

	/// "Reward early, validate late"
	///
	/// Holds once the field has a validity record that is not settled-valid:
	/// it was found invalid, or a run is still in flight. A field that was
	/// never validated does not qualify, so aggressive on-change validation
	/// only starts after a blur or submit has flagged the field.
	pub fn reward_early_validate_late(context: &ConditionContext<'_>) -> bool {
		context
			.validity
			.get(context.field)
			.is_some_and(|record| !record.is_valid())
	}
}
