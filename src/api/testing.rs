//! In-memory gateway for driving the query layer in tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;

use super::error::FetchError;
use super::gateway::Gateway;
use super::types::{Appearance, Entity, Page, Place, Vehicle};
use crate::query::{QueryKey, ResourceKind};

/// Serves canned records, records every call, and can hold a reply until released.
#[derive(Default)]
pub struct ScriptedGateway {
	entities: HashMap<u32, Entity>,
	appearances: HashMap<u32, Appearance>,
	vehicles: HashMap<u32, Vehicle>,
	places: HashMap<u32, Place>,
	pages: HashMap<u32, Page<Entity>>,
	gates: RefCell<HashMap<QueryKey, oneshot::Receiver<()>>>,
	calls: RefCell<Vec<QueryKey>>,
	page_calls: RefCell<Vec<u32>>,
}

impl ScriptedGateway {
	pub fn with_entity(mut self, entity: Entity) -> Self {
		self.entities.insert(entity.id, entity);
		self
	}

	pub fn with_appearance(mut self, appearance: Appearance) -> Self {
		self.appearances.insert(appearance.id, appearance);
		self
	}

	pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
		self.vehicles.insert(vehicle.id, vehicle);
		self
	}

	pub fn with_place(mut self, place: Place) -> Self {
		self.places.insert(place.id, place);
		self
	}

	pub fn with_page(mut self, number: u32, page: Page<Entity>) -> Self {
		self.pages.insert(number, page);
		self
	}

	/// Holds the reply for `key` until the returned sender fires (or is dropped).
	pub fn hold(&self, key: QueryKey) -> oneshot::Sender<()> {
		let (tx, rx) = oneshot::channel();
		self.gates.borrow_mut().insert(key, rx);
		tx
	}

	pub fn calls(&self) -> Vec<QueryKey> {
		self.calls.borrow().clone()
	}

	pub fn calls_for(&self, key: QueryKey) -> usize {
		self.calls.borrow().iter().filter(|k| **k == key).count()
	}

	pub fn page_calls(&self) -> Vec<u32> {
		self.page_calls.borrow().clone()
	}

	async fn arrive(&self, key: QueryKey) {
		self.calls.borrow_mut().push(key);
		let gate = self.gates.borrow_mut().remove(&key);
		if let Some(gate) = gate {
			let _ = gate.await;
		}
	}
}

fn lookup<T: Clone>(records: &HashMap<u32, T>, key: QueryKey) -> Result<T, FetchError> {
	records.get(&key.id).cloned().ok_or_else(|| FetchError::NotFound {
		url: format!("/{}/{}", key.kind, key.id),
	})
}

#[async_trait(?Send)]
impl Gateway for ScriptedGateway {
	async fn list_entities(&self, page: u32) -> Result<Page<Entity>, FetchError> {
		self.page_calls.borrow_mut().push(page);
		self.pages
			.get(&page)
			.cloned()
			.ok_or_else(|| FetchError::Transport(format!("no page {}", page)))
	}

	async fn entity(&self, id: u32) -> Result<Entity, FetchError> {
		let key = QueryKey::new(ResourceKind::Entity, id);
		self.arrive(key).await;
		lookup(&self.entities, key)
	}

	async fn appearance(&self, id: u32) -> Result<Appearance, FetchError> {
		let key = QueryKey::new(ResourceKind::Appearance, id);
		self.arrive(key).await;
		lookup(&self.appearances, key)
	}

	async fn vehicle(&self, id: u32) -> Result<Vehicle, FetchError> {
		let key = QueryKey::new(ResourceKind::Vehicle, id);
		self.arrive(key).await;
		lookup(&self.vehicles, key)
	}

	async fn place(&self, id: u32) -> Result<Place, FetchError> {
		let key = QueryKey::new(ResourceKind::Place, id);
		self.arrive(key).await;
		lookup(&self.places, key)
	}
}

pub fn entity(id: u32, name: &str, homeworld: Option<u32>, appearances: &[u32]) -> Entity {
	Entity {
		id,
		name: name.into(),
		height: "172".into(),
		mass: "77".into(),
		hair_color: "blond".into(),
		skin_color: "fair".into(),
		eye_color: "blue".into(),
		birth_year: "19BBY".into(),
		gender: "male".into(),
		homeworld,
		appearances: appearances.to_vec(),
	}
}

pub fn appearance(id: u32, title: &str, vehicles: &[u32]) -> Appearance {
	Appearance {
		id,
		title: title.into(),
		vehicles: vehicles.to_vec(),
	}
}

pub fn vehicle(id: u32, name: &str) -> Vehicle {
	Vehicle {
		id,
		name: name.into(),
	}
}

pub fn place(id: u32, name: &str) -> Place {
	Place {
		id,
		name: name.into(),
		rotation_period: "23".into(),
		orbital_period: "304".into(),
		diameter: "10465".into(),
		climate: "arid".into(),
		gravity: "1 standard".into(),
		terrain: "desert".into(),
		surface_water: "1".into(),
		population: "200000".into(),
	}
}
