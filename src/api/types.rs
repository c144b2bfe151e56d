//! Wire records returned by the people/films/starships/planets endpoints.
//!
//! Only the fields the app reads are modelled; everything else in the payload is
//! ignored by serde. Reference lists arrive as plain integer ids.

use serde::Deserialize;
use url::Url;

/// Place name the dataset uses when it has nothing to say about a planet.
pub const UNKNOWN: &str = "unknown";

/// A browsable character.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Entity {
	/// Dataset id, also used for the portrait file name.
	pub id: u32,
	/// Display name.
	pub name: String,
	/// Centimetres, as text.
	#[serde(default)]
	pub height: String,
	/// Kilograms, as text.
	#[serde(default)]
	pub mass: String,
	/// Hair colour.
	#[serde(default)]
	pub hair_color: String,
	/// Skin colour.
	#[serde(default)]
	pub skin_color: String,
	/// Eye colour.
	#[serde(default)]
	pub eye_color: String,
	/// Birth year in the BBY/ABY calendar.
	#[serde(default)]
	pub birth_year: String,
	/// Gender.
	#[serde(default)]
	pub gender: String,
	/// Planet id; `None` when the dataset has no homeworld.
	#[serde(default)]
	pub homeworld: Option<u32>,
	/// Films the character appears in, in dataset order.
	#[serde(default, rename = "films")]
	pub appearances: Vec<u32>,
}

/// A film, referencing the starships used in it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Appearance {
	/// Dataset id.
	pub id: u32,
	/// Film title.
	pub title: String,
	/// Starship ids, in dataset order.
	#[serde(default, rename = "starships")]
	pub vehicles: Vec<u32>,
}

/// A starship.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Vehicle {
	/// Dataset id.
	pub id: u32,
	/// Display name.
	pub name: String,
}

/// Homeworld details. Every attribute is free text in the dataset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Place {
	/// Dataset id.
	pub id: u32,
	/// Planet name, possibly [`UNKNOWN`].
	pub name: String,
	/// Hours per day.
	#[serde(default)]
	pub rotation_period: String,
	/// Days per year.
	#[serde(default)]
	pub orbital_period: String,
	/// Kilometres.
	#[serde(default)]
	pub diameter: String,
	/// Climate.
	#[serde(default)]
	pub climate: String,
	/// Gravity.
	#[serde(default)]
	pub gravity: String,
	/// Terrain.
	#[serde(default)]
	pub terrain: String,
	/// Percentage of the surface covered by water.
	#[serde(default)]
	pub surface_water: String,
	/// Population.
	#[serde(default)]
	pub population: String,
}

impl Place {
	/// Whether the record carries anything worth showing.
	pub fn is_known(&self) -> bool {
		!self.name.is_empty() && self.name != UNKNOWN
	}
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
	/// Total records across all pages.
	#[serde(default)]
	pub count: u32,
	/// Link to the following page.
	pub next: Option<String>,
	/// Link to the preceding page.
	#[serde(default)]
	pub previous: Option<String>,
	/// Records on this page.
	pub results: Vec<T>,
}

impl<T> Page<T> {
	/// Page number encoded in the `next` link, if there is a next page.
	pub fn next_page(&self) -> Option<u32> {
		self.next.as_deref().and_then(page_token)
	}
}

/// Extracts the `page` query parameter from a listing link.
pub fn page_token(link: &str) -> Option<u32> {
	let url = Url::parse(link).ok()?;
	url.query_pairs()
		.find(|(key, _)| key == "page")
		.and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_reads_films_as_appearances() {
		let json = r#"{
			"id": 1,
			"name": "Luke Skywalker",
			"height": "172",
			"mass": "77",
			"hair_color": "blond",
			"skin_color": "fair",
			"eye_color": "blue",
			"birth_year": "19BBY",
			"gender": "male",
			"homeworld": 1,
			"films": [1, 2, 3, 6],
			"species": [1],
			"starships": [12, 22],
			"url": "https://sw-api.starnavi.io/people/1/"
		}"#;
		let entity: Entity = serde_json::from_str(json).unwrap();
		assert_eq!(entity.appearances, vec![1, 2, 3, 6]);
		assert_eq!(entity.homeworld, Some(1));
		assert_eq!(entity.birth_year, "19BBY");
	}

	#[test]
	fn entity_accepts_null_homeworld() {
		let json = r#"{"id": 7, "name": "Drifter", "homeworld": null, "films": []}"#;
		let entity: Entity = serde_json::from_str(json).unwrap();
		assert_eq!(entity.homeworld, None);
		assert!(entity.appearances.is_empty());
	}

	#[test]
	fn appearance_reads_starships_as_vehicles() {
		let json = r#"{"id": 1, "title": "A New Hope", "episode_id": 4, "starships": [2, 3, 5]}"#;
		let appearance: Appearance = serde_json::from_str(json).unwrap();
		assert_eq!(appearance.vehicles, vec![2, 3, 5]);
	}

	#[test]
	fn unknown_place_is_not_known() {
		let json = r#"{"id": 28, "name": "unknown", "climate": "unknown"}"#;
		let place: Place = serde_json::from_str(json).unwrap();
		assert!(!place.is_known());
	}

	#[test]
	fn next_page_comes_from_link_query() {
		let page: Page<Entity> = Page {
			count: 82,
			next: Some("https://sw-api.starnavi.io/people/?page=2".into()),
			previous: None,
			results: vec![],
		};
		assert_eq!(page.next_page(), Some(2));
		assert_eq!(page_token("not a url"), None);
		assert_eq!(page_token("https://sw-api.starnavi.io/people/"), None);
	}
}
