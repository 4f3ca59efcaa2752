//! Per-field "latest run wins" ordering
//!
//! Every validation run carries a logical [`RunStamp`]. The scheduler keeps
//! the greatest stamp begun per field; a run may only write the field's
//! validity record while its stamp is still the greatest. Ordering is purely
//! logical, so it does not depend on which validator happens to finish first.

use reinhardt_form_validators::FieldId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Logical ordering token of a validation run
///
/// Usually the UI event's timestamp. Stamps only need to be ordered per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunStamp(pub u64);

impl From<u64> for RunStamp {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

impl fmt::Display for RunStamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Points at which a run re-checks that it is still the latest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
	/// After waiting out the change debounce
	AfterDebounce,
	/// Before recording the in-flight marker
	MarkValidating,
	/// Before committing the settled result
	Commit,
}

impl Checkpoint {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::AfterDebounce => "after_debounce",
			Self::MarkValidating => "mark_validating",
			Self::Commit => "commit",
		}
	}
}

impl fmt::Display for Checkpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Greatest begun stamp per field
///
/// # Examples
///
/// ```
/// use reinhardt_form_engine::{RunScheduler, RunStamp};
///
/// let mut scheduler = RunScheduler::new();
/// assert!(scheduler.begin_run("name", RunStamp(1)));
/// assert!(scheduler.begin_run("name", RunStamp(2)));
/// assert!(!scheduler.is_latest("name", RunStamp(1)));
/// assert!(scheduler.is_latest("name", RunStamp(2)));
/// ```
#[derive(Debug, Default)]
pub struct RunScheduler {
	latest: HashMap<FieldId, RunStamp>,
}

impl RunScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a run at `stamp`
	///
	/// Returns `false` when a greater stamp has already begun; the run is
	/// stale before it starts and must not write anything. An equal stamp is
	/// accepted without advancing.
	pub fn begin_run(&mut self, field: &str, stamp: RunStamp) -> bool {
		match self.latest.get_mut(field) {
			Some(latest) if *latest > stamp => false,
			Some(latest) => {
				*latest = stamp;
				true
			}
			None => {
				self.latest.insert(field.to_string(), stamp);
				true
			}
		}
	}

	/// Whether no greater stamp than `stamp` has begun for `field`
	///
	/// A forgotten field has no latest run, so nothing is latest for it.
	pub fn is_latest(&self, field: &str, stamp: RunStamp) -> bool {
		self.latest
			.get(field)
			.is_some_and(|latest| stamp >= *latest)
	}

	/// [`is_latest`](Self::is_latest), logging supersession at `checkpoint`
	pub fn checkpoint(&self, field: &str, stamp: RunStamp, checkpoint: Checkpoint) -> bool {
		let current = self.is_latest(field, stamp);
		if !current {
			tracing::debug!(
				field,
				%stamp,
				latest = ?self.latest(field),
				checkpoint = %checkpoint,
				"validation run superseded"
			);
		}
		current
	}

	pub fn latest(&self, field: &str) -> Option<RunStamp> {
		self.latest.get(field).copied()
	}

	pub fn forget(&mut self, field: &str) {
		self.latest.remove(field);
	}
}
