use leptos::prelude::*;

/// One card in the homepage feature row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
	pub title: &'static str,
	pub description: &'static str,
}

pub const FEATURES: [Feature; 3] = [
	Feature {
		title: "🧠 Visual Problem Solver",
		description: "Interactive experiences that make complex concepts accessible: \
			node-link visualizations, custom mind maps and examples users can actually use.",
	},
	Feature {
		title: "🚀 Modern Technical Stack",
		description: "Built with tools that demonstrate real-world skills: Rust and WebAssembly, \
			Git workflows with CI/CD integration, responsive and accessible design.",
	},
	Feature {
		title: "📊 User-Centered Approach",
		description: "Content designed around actual user needs: research-driven strategy, \
			progressive disclosure for different skill levels, multiple formats for diverse audiences.",
	},
];

#[component]
fn FeatureCard(feature: Feature) -> impl IntoView {
	view! {
		<div class="feature">
			<h3>{feature.title}</h3>
			<p>{feature.description}</p>
		</div>
	}
}

#[component]
pub fn HomepageFeatures() -> impl IntoView {
	view! {
		<section class="features">
			{FEATURES.iter().map(|&feature| view! { <FeatureCard feature=feature /> }).collect_view()}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn feature_titles_are_distinct_and_filled() {
		for (i, a) in FEATURES.iter().enumerate() {
			assert!(!a.description.is_empty());
			assert!(FEATURES[i + 1..].iter().all(|b| b.title != a.title));
		}
	}
}
