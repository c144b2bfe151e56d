use leptos::prelude::*;

use crate::components::hero_detail::HeroDetail;
use crate::components::heroes_list::HeroesList;

/// Character list on the left, the selected character's details on the right.
#[component]
pub fn Home() -> impl IntoView {
	let selected = RwSignal::new(None::<u32>);

	view! {
		<div class="app">
			<h1 class="app-title">"Star Wars Heroes"</h1>
			<div class="app-body">
				<aside class="panel list-panel">
					<HeroesList on_select=move |id: u32| selected.set(Some(id)) />
				</aside>
				<main class="panel detail-panel">
					<HeroDetail selected=selected />
				</main>
			</div>
		</div>
	}
}
