use async_trait::async_trait;

use super::error::FetchError;
use super::types::{Appearance, Entity, Page, Place, Vehicle};

/// Remote source of dataset records.
///
/// Futures are `?Send`: the browser fetch backend is single threaded.
#[async_trait(?Send)]
pub trait Gateway {
	/// Fetches one page (1-based) of the character listing.
	async fn list_entities(&self, page: u32) -> Result<Page<Entity>, FetchError>;

	/// Fetches one character.
	async fn entity(&self, id: u32) -> Result<Entity, FetchError>;

	/// Fetches one film.
	async fn appearance(&self, id: u32) -> Result<Appearance, FetchError>;

	/// Fetches one starship.
	async fn vehicle(&self, id: u32) -> Result<Vehicle, FetchError>;

	/// Fetches one planet.
	async fn place(&self, id: u32) -> Result<Place, FetchError>;
}
