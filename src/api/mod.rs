//! Access to the remote character dataset.

mod error;
mod gateway;
mod http;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use error::FetchError;
pub use gateway::Gateway;
pub use http::HttpGateway;
pub use types::{Appearance, Entity, Page, Place, UNKNOWN, Vehicle, page_token};
