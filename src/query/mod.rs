//! Client-side query state: the session cache, the detail orchestrator and the
//! listing cursor.

mod cache;
mod detail;
mod pages;
mod result;

pub use cache::{QueryCache, Resource, Table};
pub use detail::{DetailQuery, DetailSnapshot, HomeworldView, Spawn};
pub use pages::{ListStatus, Paginator};
pub use result::{FetchResult, QueryKey, ResourceKind};
