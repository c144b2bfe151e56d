//! Application settings.

use log::warn;
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "https://sw-api.starnavi.io";
const DEFAULT_IMAGE_BASE_URL: &str = "https://starwars-visualguide.com/assets/img/characters";
const PAGE_CONFIG_SELECTOR: &str = "meta[name=app-config]";

/// Settings for the dataset, portraits and graph panel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Root of the JSON API.
	pub api_base_url: String,
	/// Directory holding `<id>.jpg` character portraits.
	pub image_base_url: String,
	/// Graph canvas height in pixels.
	pub graph_height: f64,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.to_string(),
			image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
			graph_height: 500.0,
		}
	}
}

impl AppConfig {
	/// Defaults, then the page's `app-config` meta tag, then `SWAPI_BASE_URL` /
	/// `CHARACTER_IMAGE_URL` if they were set while compiling.
	pub fn load() -> Self {
		Self::from_page().unwrap_or_default().with_overrides(
			option_env!("SWAPI_BASE_URL"),
			option_env!("CHARACTER_IMAGE_URL"),
		)
	}

	fn from_page() -> Option<Self> {
		let meta = web_sys::window()?
			.document()?
			.query_selector(PAGE_CONFIG_SELECTOR)
			.ok()??;
		Self::from_json(&meta.get_attribute("content")?)
	}

	fn from_json(json: &str) -> Option<Self> {
		serde_json::from_str(json)
			.map_err(|err| warn!("ignoring page config: {}", err))
			.ok()
	}

	fn with_overrides(mut self, api: Option<&str>, images: Option<&str>) -> Self {
		if let Some(url) = api.filter(|url| !url.is_empty()) {
			self.api_base_url = url.to_string();
		}
		if let Some(url) = images.filter(|url| !url.is_empty()) {
			self.image_base_url = url.to_string();
		}
		self
	}

	/// Portrait image for character `id`.
	pub fn portrait_url(&self, id: u32) -> String {
		format!("{}/{}.jpg", self.image_base_url.trim_end_matches('/'), id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_overrides_keep_defaults() {
		let config = AppConfig::default().with_overrides(Some(""), None);
		assert_eq!(config, AppConfig::default());
	}

	#[test]
	fn overrides_replace_urls() {
		let config = AppConfig::default()
			.with_overrides(Some("http://localhost:8000"), Some("http://img/"));
		assert_eq!(config.api_base_url, "http://localhost:8000");
		assert_eq!(config.portrait_url(4), "http://img/4.jpg");
	}

	#[test]
	fn page_config_fills_missing_fields_with_defaults() {
		let config = AppConfig::from_json(r#"{"graph_height": 320.0}"#).unwrap();
		assert_eq!(config.graph_height, 320.0);
		assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
	}

	#[test]
	fn malformed_page_config_is_ignored() {
		assert_eq!(AppConfig::from_json("{graph_height: tall}"), None);
		assert_eq!(AppConfig::from_json("").unwrap_or_default(), AppConfig::default());
	}

	#[test]
	fn build_overrides_win_over_page_config() {
		let page = AppConfig::from_json(r#"{"api_base_url": "http://page", "graph_height": 300.0}"#)
			.unwrap();
		let config = page.with_overrides(Some("http://build"), None);
		assert_eq!(config.api_base_url, "http://build");
		assert_eq!(config.graph_height, 300.0);
		assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
	}
}
