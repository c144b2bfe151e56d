use leptos::prelude::*;

use crate::query::HomeworldView;

/// Homeworld name with a hover card of planet details.
#[component]
pub fn PlanetTooltip(homeworld: HomeworldView) -> impl IntoView {
	match homeworld {
		HomeworldView::Loading => view! { <span class="muted">"Loading..."</span> }.into_any(),
		HomeworldView::Unknown => view! { <strong>"Unknown"</strong> }.into_any(),
		HomeworldView::Known(place) => view! {
			<span class="planet">
				<span class="planet-name">{place.name.clone()}</span>
				<span class="planet-card" role="tooltip">
					<span class="planet-card-title">{place.name}</span>
					<span><strong>"Rotation Period: "</strong>{place.rotation_period}</span>
					<span><strong>"Orbital Period: "</strong>{place.orbital_period}</span>
					<span><strong>"Diameter: "</strong>{format!("{} km", place.diameter)}</span>
					<span><strong>"Climate: "</strong>{place.climate}</span>
					<span><strong>"Gravity: "</strong>{place.gravity}</span>
					<span><strong>"Terrain: "</strong>{place.terrain}</span>
					<span><strong>"Surface Water: "</strong>{format!("{}%", place.surface_water)}</span>
					<span><strong>"Population: "</strong>{place.population}</span>
				</span>
			</span>
		}
		.into_any(),
	}
}
