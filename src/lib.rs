//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
mod components;
pub mod config;
pub mod graph;
mod pages;
pub mod query;
mod session;

pub use components::force_graph::{GraphData, GraphLink, GraphNode};

use crate::config::AppConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::session::Session;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Root component: provides the session and configuration, then routes to the
/// heroes browser.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	info!("using dataset at {}", config.api_base_url);
	provide_context(Session::new(&config));
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="Star Wars Heroes" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
