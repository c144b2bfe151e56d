use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::planet_tooltip::PlanetTooltip;
use crate::config::AppConfig;
use crate::graph::assemble;
use crate::query::{DetailQuery, DetailSnapshot, FetchResult};
use crate::session::Session;

#[component]
fn Attribute(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
	view! {
		<p class="attribute">
			<strong>{label}": "</strong>
			{value}
		</p>
	}
}

/// Detail card and film/starship graph for the selected character.
#[component]
pub fn HeroDetail(#[prop(into)] selected: Signal<Option<u32>>) -> impl IntoView {
	let session = expect_context::<Session>();
	let config = expect_context::<AppConfig>();

	let query = DetailQuery::new(session.gateway(), session.cache(), Session::spawner());
	let snapshot = RwSignal::new(query.snapshot());
	query.on_change(move |latest| snapshot.set(latest.clone()));
	let query = StoredValue::new_local(query);

	Effect::new(move |_| match selected.get() {
		Some(id) => query.with_value(|q| q.select(id)),
		None => query.with_value(DetailQuery::clear),
	});

	// Split so the card only re-renders when the character itself changes.
	let card = Memo::new(move |_| snapshot.with(|s| (s.selection, s.entity.clone())));
	let homeworld = Memo::new(move |_| snapshot.with(DetailSnapshot::homeworld_view));
	let graph = Memo::new(move |_| snapshot.with(assemble));
	let settled = Memo::new(move |_| snapshot.with(DetailSnapshot::is_settled));

	move || match card.get() {
		(None, _) => view! { <p class="placeholder">"No hero selected"</p> }.into_any(),
		(Some(_), FetchResult::Pending) => {
			view! { <div class="spinner" role="progressbar"></div> }.into_any()
		}
		(Some(_), FetchResult::Failed(_)) => {
			view! { <p class="status error">"Error loading character data"</p> }.into_any()
		}
		(Some(id), FetchResult::Succeeded(hero)) => view! {
			<div class="hero-detail">
				<div class="hero-card">
					<img
						class="portrait"
						src=config.portrait_url(id)
						alt=hero.name.clone()
						title=hero.name.clone()
					/>
					<h2>{hero.name.clone()}</h2>
					<Attribute label="Height" value=format!("{} cm", hero.height) />
					<p class="attribute">
						<strong>"Homeworld: "</strong>
						{move || view! { <PlanetTooltip homeworld=homeworld.get() /> }}
					</p>
					<Attribute label="Mass" value=format!("{} kg", hero.mass) />
					<Attribute label="Hair Color" value=hero.hair_color />
					<Attribute label="Skin Color" value=hero.skin_color />
					<Attribute label="Eye Color" value=hero.eye_color />
					<Attribute label="Birth Year" value=hero.birth_year />
					<Attribute label="Gender" value=hero.gender />
				</div>
				<div class="hero-graph">
					<Show when=move || !settled.get()>
						<p class="status">"Loading films and starships..."</p>
					</Show>
					<ForceGraphCanvas data=graph height=config.graph_height />
				</div>
			</div>
		}
		.into_any(),
	}
}
