//! Interactive mind map of the technical-writing workflow.

mod component;
mod interaction;
mod minimap;
mod registry;
mod render;
mod seed;
mod state;
mod style;
mod types;
mod viewport;

use leptos::prelude::*;

use component::MindMapCanvas;
use seed::initial_model;

/// Height of the diagram container.
pub const MIND_MAP_HEIGHT: &str = "800px";

/// The mountable diagram: full width, fixed height, seeded with the workflow.
#[component]
pub fn InteractiveMindMap() -> impl IntoView {
	let model = Signal::derive(initial_model);

	view! {
		<div
			class="mind-map"
			style:width="100%"
			style:height=MIND_MAP_HEIGHT
			style:background=style::CANVAS_BACKGROUND
			style:position="relative"
		>
			<MindMapCanvas data=model />
		</div>
	}
}
