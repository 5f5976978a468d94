use leptos::prelude::*;

use crate::components::features::HomepageFeatures;
use crate::components::mind_map::InteractiveMindMap;
use crate::{SITE_TAGLINE, SITE_TITLE};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<header class="hero">
			<h1>{SITE_TITLE}</h1>
			<p class="subtitle">{SITE_TAGLINE}</p>
		</header>
		<HomepageFeatures />
		<section class="workflow">
			<h2>"Technical Writing Workflow"</h2>
			<p class="subtitle">
				"Drag nodes to reposition. Drag from a handle to connect. Scroll to zoom. Drag background to pan."
			</p>
			<InteractiveMindMap />
		</section>
	}
}
