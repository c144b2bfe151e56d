use leptos::html::Li;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry};

use crate::api::Entity;
use crate::query::{ListStatus, Paginator};
use crate::session::Session;

type Observer = (IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>);

/// Infinite-scrolling list of characters. The next page loads once the row after
/// the last character scrolls into view.
#[component]
pub fn HeroesList(#[prop(into)] on_select: Callback<u32>) -> impl IntoView {
	let session = expect_context::<Session>();
	let gateway = StoredValue::new_local(session.gateway());
	let pager = RwSignal::new(Paginator::<Entity>::new());

	let load_more = move || {
		if pager.with_untracked(|p| p.is_fetching() || !p.has_more()) {
			return;
		}
		let Some(page) = pager.try_update(Paginator::begin_next).flatten() else {
			return;
		};
		let gateway = gateway.get_value();
		leptos::task::spawn_local(async move {
			let result = gateway.list_entities(page).await;
			pager.update(|p| p.complete(page, result));
		});
	};
	load_more();

	let sentinel = NodeRef::<Li>::new();
	let observer: StoredValue<Option<Observer>, LocalStorage> = StoredValue::new_local(None);

	// A fresh observer reports the sentinel's current visibility straight away, so
	// re-arming after every page keeps loading while the list is shorter than the view.
	Effect::new(move |_| {
		let armed = pager.with(|p| p.has_more() && !p.is_fetching() && p.error().is_none());
		let target = sentinel.get();
		observer.update_value(|slot| {
			if let Some((old, _)) = slot.take() {
				old.disconnect();
			}
		});
		let (true, Some(target)) = (armed, target) else {
			return;
		};

		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			let visible = entries
				.iter()
				.any(|entry| entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
			if visible {
				load_more();
			}
		});
		match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
			Ok(watcher) => {
				watcher.observe(&target);
				observer.set_value(Some((watcher, callback)));
			}
			Err(err) => warn!("intersection observer unavailable: {:?}", err),
		}
	});

	on_cleanup(move || {
		observer.try_update_value(|slot| {
			if let Some((old, _)) = slot.take() {
				old.disconnect();
			}
		});
	});

	view! {
		<Show when=move || pager.with(|p| p.status() == ListStatus::Loading)>
			<div class="status">"Loading..."</div>
		</Show>
		<Show when=move || pager.with(|p| p.status() == ListStatus::Error)>
			<div class="status error">"Error loading data"</div>
		</Show>
		<ul class="heroes-list">
			<For
				each=move || pager.with(|p| p.items().cloned().collect::<Vec<_>>())
				key=|hero| hero.id
				children=move |hero: Entity| {
					let id = hero.id;
					view! {
						<li class="hero-row" on:click=move |_| on_select.run(id)>
							{hero.name}
						</li>
					}
				}
			/>
			<Show when=move || pager.with(|p| p.is_fetching() && !p.pages().is_empty())>
				<li class="loading-row">
					<div class="spinner" role="progressbar"></div>
				</li>
			</Show>
			<Show when=move || pager.with(|p| p.error().is_some() && !p.pages().is_empty())>
				<li class="loading-row">
					<button on:click=move |_| load_more()>"Retry"</button>
				</li>
			</Show>
			<li node_ref=sentinel class="sentinel" aria-hidden="true"></li>
		</ul>
	}
}
