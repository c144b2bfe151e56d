use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::error::FetchError;
use super::gateway::Gateway;
use super::types::{Appearance, Entity, Page, Place, Vehicle};

/// Gateway backed by the public JSON API.
#[derive(Clone, Debug)]
pub struct HttpGateway {
	http: Client,
	base_url: String,
}

impl HttpGateway {
	/// Gateway rooted at `base_url`; a trailing slash is ignored.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			http: Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
		let url = self.url(path);
		debug!("GET {}", url);

		let response = self.http.get(&url).send().await?;
		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Err(FetchError::NotFound { url });
		}
		if !status.is_success() {
			return Err(FetchError::Transport(format!("{} from {}", status, url)));
		}

		let body = response.text().await?;
		Ok(serde_json::from_str(&body)?)
	}
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
	async fn list_entities(&self, page: u32) -> Result<Page<Entity>, FetchError> {
		self.get(&format!("/people/?page={}", page)).await
	}

	async fn entity(&self, id: u32) -> Result<Entity, FetchError> {
		self.get(&format!("/people/{}", id)).await
	}

	async fn appearance(&self, id: u32) -> Result<Appearance, FetchError> {
		self.get(&format!("/films/{}", id)).await
	}

	async fn vehicle(&self, id: u32) -> Result<Vehicle, FetchError> {
		self.get(&format!("/starships/{}", id)).await
	}

	async fn place(&self, id: u32) -> Result<Place, FetchError> {
		self.get(&format!("/planets/{}", id)).await
	}
}
