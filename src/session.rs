use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use crate::api::{Gateway, HttpGateway};
use crate::config::AppConfig;
use crate::query::{QueryCache, Spawn};

/// Per-tab handles shared through context: the gateway and the query cache.
///
/// Both are single-threaded, so they sit in local stored values.
#[derive(Clone, Copy)]
pub struct Session {
	gateway: StoredValue<Rc<dyn Gateway>, LocalStorage>,
	cache: StoredValue<Rc<QueryCache>, LocalStorage>,
}

impl Session {
	pub fn new(config: &AppConfig) -> Self {
		let gateway: Rc<dyn Gateway> = Rc::new(HttpGateway::new(config.api_base_url.clone()));
		Self {
			gateway: StoredValue::new_local(gateway),
			cache: StoredValue::new_local(Rc::new(QueryCache::new())),
		}
	}

	pub fn gateway(&self) -> Rc<dyn Gateway> {
		self.gateway.get_value()
	}

	pub fn cache(&self) -> Rc<QueryCache> {
		self.cache.get_value()
	}

	/// Spawner backed by the browser's microtask queue.
	pub fn spawner() -> Spawn {
		Rc::new(|fut: LocalBoxFuture<'static, ()>| leptos::task::spawn_local(fut))
	}
}
