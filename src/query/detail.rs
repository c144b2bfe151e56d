//! Dependent lookups behind the character detail panel.
//!
//! A selection resolves in levels: the character, then its homeworld and films, then
//! the starships of every film that has resolved. [`DetailQuery`] issues each lookup
//! once its parent has succeeded, shares results through the session [`QueryCache`],
//! and republishes a [`DetailSnapshot`] whenever any lookup settles.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use futures::future::LocalBoxFuture;
use log::{debug, error, info, warn};

use super::cache::{QueryCache, Resource};
use super::result::{FetchResult, QueryKey, ResourceKind};
use crate::api::{Appearance, Entity, Gateway, Place, Vehicle};

/// Hands a future to the local executor.
pub type Spawn = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

type Listener = Rc<dyn Fn(&DetailSnapshot)>;

/// Everything currently known about one selection, read from the cache in one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailSnapshot {
	/// Selected character, `None` when nothing is selected.
	pub selection: Option<u32>,
	/// The character itself.
	pub entity: FetchResult<Entity>,
	/// `None` until the character is known, and forever when it has no homeworld.
	pub homeworld: Option<FetchResult<Place>>,
	/// Films of a resolved character.
	pub appearances: BTreeMap<u32, FetchResult<Appearance>>,
	/// Starships of resolved films only.
	pub vehicles: BTreeMap<u32, FetchResult<Vehicle>>,
}

/// What the homeworld line of the detail card shows.
#[derive(Clone, Debug, PartialEq)]
pub enum HomeworldView {
	/// The planet lookup is in flight.
	Loading,
	/// No homeworld, a failed lookup, or a planet named "unknown".
	Unknown,
	/// A planet worth showing.
	Known(Place),
}

impl DetailSnapshot {
	/// Reads everything reachable from `root` out of the cache.
	pub fn capture(cache: &QueryCache, root: u32) -> Self {
		let entity = cache.entities().get(root).unwrap_or_default();
		let mut homeworld = None;
		let mut appearances = BTreeMap::new();
		let mut vehicles = BTreeMap::new();

		if let FetchResult::Succeeded(record) = &entity {
			homeworld = record
				.homeworld
				.map(|id| cache.places().get(id).unwrap_or_default());
			for &id in &record.appearances {
				let appearance = cache.appearances().get(id).unwrap_or_default();
				if let FetchResult::Succeeded(film) = &appearance {
					for &vehicle in &film.vehicles {
						vehicles
							.entry(vehicle)
							.or_insert_with(|| cache.vehicles().get(vehicle).unwrap_or_default());
					}
				}
				appearances.insert(id, appearance);
			}
		}

		Self {
			selection: Some(root),
			entity,
			homeworld,
			appearances,
			vehicles,
		}
	}

	/// Failed and absent homeworlds look the same; only a pending one says so.
	pub fn homeworld_view(&self) -> HomeworldView {
		match &self.homeworld {
			Some(FetchResult::Pending) => HomeworldView::Loading,
			Some(FetchResult::Succeeded(place)) if place.is_known() => {
				HomeworldView::Known(place.clone())
			}
			_ => HomeworldView::Unknown,
		}
	}

	/// True once no lookup reachable from the selection is still pending.
	pub fn is_settled(&self) -> bool {
		!self.entity.is_pending()
			&& !self.homeworld.as_ref().is_some_and(FetchResult::is_pending)
			&& !self.appearances.values().any(FetchResult::is_pending)
			&& !self.vehicles.values().any(FetchResult::is_pending)
	}
}

/// Orchestrates the lookups for whichever character is selected.
pub struct DetailQuery {
	inner: Rc<Inner>,
}

struct Inner {
	gateway: Rc<dyn Gateway>,
	cache: Rc<QueryCache>,
	spawn: Spawn,
	selection: Cell<Option<u32>>,
	last: RefCell<Option<DetailSnapshot>>,
	listener: RefCell<Option<Listener>>,
}

impl DetailQuery {
	/// Orchestrator with no selection. `spawn` runs the lookups.
	pub fn new(gateway: Rc<dyn Gateway>, cache: Rc<QueryCache>, spawn: Spawn) -> Self {
		Self {
			inner: Rc::new(Inner {
				gateway,
				cache,
				spawn,
				selection: Cell::new(None),
				last: RefCell::new(None),
				listener: RefCell::new(None),
			}),
		}
	}

	/// Registers the callback that receives every changed snapshot.
	pub fn on_change(&self, listener: impl Fn(&DetailSnapshot) + 'static) {
		*self.inner.listener.borrow_mut() = Some(Rc::new(listener));
	}

	/// Switches to `id` and requests whatever is not cached yet. Reselecting the
	/// current character does nothing.
	pub fn select(&self, id: u32) {
		if self.inner.selection.get() == Some(id) {
			return;
		}
		info!("selected entity {}", id);
		self.inner.selection.set(Some(id));
		self.inner.last.borrow_mut().take();
		self.inner.evaluate();
	}

	/// Drops the selection and publishes an empty snapshot.
	pub fn clear(&self) {
		self.inner.selection.set(None);
		self.inner.last.borrow_mut().take();
		self.inner.publish(DetailSnapshot::default());
	}

	/// Reads the current selection straight from the cache.
	pub fn snapshot(&self) -> DetailSnapshot {
		match self.inner.selection.get() {
			Some(root) => DetailSnapshot::capture(&self.inner.cache, root),
			None => DetailSnapshot::default(),
		}
	}
}

impl Inner {
	/// Walks the current selection top-down, requesting every lookup whose parent has
	/// succeeded, then publishes the resulting snapshot.
	fn evaluate(self: &Rc<Self>) {
		let Some(root) = self.selection.get() else {
			return;
		};

		self.request::<Entity>(root, root);
		if let Some(FetchResult::Succeeded(entity)) = self.cache.entities().get(root) {
			if let Some(place) = entity.homeworld {
				self.request::<Place>(place, root);
			}
			for &id in &entity.appearances {
				self.request::<Appearance>(id, root);
				if let Some(FetchResult::Succeeded(appearance)) = self.cache.appearances().get(id) {
					for &vehicle in &appearance.vehicles {
						self.request::<Vehicle>(vehicle, root);
					}
				}
			}
		}

		self.publish(DetailSnapshot::capture(&self.cache, root));
	}

	fn publish(&self, snapshot: DetailSnapshot) {
		{
			let mut last = self.last.borrow_mut();
			if last.as_ref() == Some(&snapshot) {
				return;
			}
			*last = Some(snapshot.clone());
		}
		let listener = self.listener.borrow().clone();
		if let Some(listener) = listener {
			listener(&snapshot);
		}
	}

	/// Starts the lookup for `id` unless the cache already has it pending or settled.
	fn request<R: Resource>(self: &Rc<Self>, id: u32, origin: u32) {
		if !R::table(&self.cache).claim(id) {
			return;
		}
		let key = QueryKey::new(R::KIND, id);
		debug!("requesting {} for entity {}", key, origin);

		let fetch = R::fetch(Rc::clone(&self.gateway), id);
		let cache = Rc::clone(&self.cache);
		let query: Weak<Inner> = Rc::downgrade(self);
		(self.spawn)(Box::pin(async move {
			let result = fetch.await;
			if let Err(err) = &result {
				if key.kind == ResourceKind::Entity {
					error!("{}: {}", key, err);
				} else {
					warn!("{} omitted: {}", key, err);
				}
			}
			R::table(&cache).settle(id, result.into());

			let Some(inner) = query.upgrade() else {
				return;
			};
			// The new selection may share this key, so it is still re-walked; fan-out
			// only ever starts from the current root.
			if inner.selection.get() != Some(origin) {
				debug!("{} settled after selection left entity {}", key, origin);
			}
			inner.evaluate();
		}));
	}
}
