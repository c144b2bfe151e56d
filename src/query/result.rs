use std::fmt;

use crate::api::FetchError;

/// State of one outstanding lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchResult<T> {
	/// Requested, no answer yet.
	Pending,
	/// The record arrived.
	Succeeded(T),
	/// The lookup failed for good.
	Failed(FetchError),
}

impl<T> Default for FetchResult<T> {
	fn default() -> Self {
		FetchResult::Pending
	}
}

impl<T> FetchResult<T> {
	/// The record, if it arrived.
	pub fn succeeded(&self) -> Option<&T> {
		match self {
			FetchResult::Succeeded(value) => Some(value),
			_ => None,
		}
	}

	/// Still waiting.
	pub fn is_pending(&self) -> bool {
		matches!(self, FetchResult::Pending)
	}

	/// Failed.
	pub fn is_failed(&self) -> bool {
		matches!(self, FetchResult::Failed(_))
	}
}

impl<T> From<Result<T, FetchError>> for FetchResult<T> {
	fn from(result: Result<T, FetchError>) -> Self {
		match result {
			Ok(value) => FetchResult::Succeeded(value),
			Err(err) => FetchResult::Failed(err),
		}
	}
}

/// Record kinds the detail view resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
	/// A character.
	Entity,
	/// A film.
	Appearance,
	/// A starship.
	Vehicle,
	/// A planet.
	Place,
}

impl ResourceKind {
	/// Lower-case name, as used in node and log keys.
	pub fn as_str(self) -> &'static str {
		match self {
			ResourceKind::Entity => "entity",
			ResourceKind::Appearance => "appearance",
			ResourceKind::Vehicle => "vehicle",
			ResourceKind::Place => "place",
		}
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Cache key: one fetch result exists per (kind, id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
	/// Record kind.
	pub kind: ResourceKind,
	/// Dataset id within the kind.
	pub id: u32,
}

impl QueryKey {
	/// Key for `id` of `kind`.
	pub const fn new(kind: ResourceKind, id: u32) -> Self {
		Self { kind, id }
	}
}

impl fmt::Display for QueryKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.kind, self.id)
	}
}
