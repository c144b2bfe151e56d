use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use super::result::{FetchResult, ResourceKind};
use crate::api::{Appearance, Entity, FetchError, Gateway, Place, Vehicle};

/// Fetch results of one record kind, keyed by id.
#[derive(Debug)]
pub struct Table<T> {
	slots: RefCell<HashMap<u32, FetchResult<T>>>,
}

impl<T> Default for Table<T> {
	fn default() -> Self {
		Self {
			slots: RefCell::new(HashMap::new()),
		}
	}
}

impl<T: Clone> Table<T> {
	/// Current state of `id`, or `None` if it was never requested.
	pub fn get(&self, id: u32) -> Option<FetchResult<T>> {
		self.slots.borrow().get(&id).cloned()
	}

	/// Marks `id` as in flight. Returns false when the key is already pending or
	/// settled, in which case the caller attaches to the existing result.
	pub(crate) fn claim(&self, id: u32) -> bool {
		let mut slots = self.slots.borrow_mut();
		if slots.contains_key(&id) {
			return false;
		}
		slots.insert(id, FetchResult::Pending);
		true
	}

	/// Stores the outcome for `id`. The first resolution wins.
	pub(crate) fn settle(&self, id: u32, result: FetchResult<T>) -> bool {
		let mut slots = self.slots.borrow_mut();
		match slots.get_mut(&id) {
			Some(slot) if slot.is_pending() => {
				*slot = result;
				true
			}
			Some(_) => false,
			None => {
				slots.insert(id, result);
				true
			}
		}
	}
}

/// Session-wide store of lookups, shared by every view that needs records.
///
/// Entries are written once and never invalidated while the session lives.
#[derive(Debug, Default)]
pub struct QueryCache {
	entities: Table<Entity>,
	appearances: Table<Appearance>,
	vehicles: Table<Vehicle>,
	places: Table<Place>,
}

impl QueryCache {
	/// Empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Character lookups.
	pub fn entities(&self) -> &Table<Entity> {
		&self.entities
	}

	/// Film lookups.
	pub fn appearances(&self) -> &Table<Appearance> {
		&self.appearances
	}

	/// Starship lookups.
	pub fn vehicles(&self) -> &Table<Vehicle> {
		&self.vehicles
	}

	/// Planet lookups.
	pub fn places(&self) -> &Table<Place> {
		&self.places
	}
}

/// A record kind the cache knows how to store and the gateway knows how to fetch.
pub trait Resource: Clone + 'static {
	/// Kind used in keys and logs.
	const KIND: ResourceKind;

	/// The table holding this kind.
	fn table(cache: &QueryCache) -> &Table<Self>;

	/// Starts the gateway call for `id`.
	fn fetch(gateway: Rc<dyn Gateway>, id: u32) -> LocalBoxFuture<'static, Result<Self, FetchError>>;
}

impl Resource for Entity {
	const KIND: ResourceKind = ResourceKind::Entity;

	fn table(cache: &QueryCache) -> &Table<Self> {
		&cache.entities
	}

	fn fetch(gateway: Rc<dyn Gateway>, id: u32) -> LocalBoxFuture<'static, Result<Self, FetchError>> {
		Box::pin(async move { gateway.entity(id).await })
	}
}

impl Resource for Appearance {
	const KIND: ResourceKind = ResourceKind::Appearance;

	fn table(cache: &QueryCache) -> &Table<Self> {
		&cache.appearances
	}

	fn fetch(gateway: Rc<dyn Gateway>, id: u32) -> LocalBoxFuture<'static, Result<Self, FetchError>> {
		Box::pin(async move { gateway.appearance(id).await })
	}
}

impl Resource for Vehicle {
	const KIND: ResourceKind = ResourceKind::Vehicle;

	fn table(cache: &QueryCache) -> &Table<Self> {
		&cache.vehicles
	}

	fn fetch(gateway: Rc<dyn Gateway>, id: u32) -> LocalBoxFuture<'static, Result<Self, FetchError>> {
		Box::pin(async move { gateway.vehicle(id).await })
	}
}

impl Resource for Place {
	const KIND: ResourceKind = ResourceKind::Place;

	fn table(cache: &QueryCache) -> &Table<Self> {
		&cache.places
	}

	fn fetch(gateway: Rc<dyn Gateway>, id: u32) -> LocalBoxFuture<'static, Result<Self, FetchError>> {
		Box::pin(async move { gateway.place(id).await })
	}
}
