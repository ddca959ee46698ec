use leptos::prelude::*;

use crate::components::github_link::GithubLink;
use crate::components::vector_graph::{GraphConfig, VectorWorkbench};

const SOURCE_URL: &str = "https://github.com/peterbucci/VectorMathReact";

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = GraphConfig::default();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="vector-math">
				<h1>"Vector Math"</h1>
				<p class="subtitle">
					"Drag a vector to move it, drag its head to resize it, or edit its values and press Update."
				</p>
				<VectorWorkbench config=config />
				<GithubLink href=SOURCE_URL />
			</div>
		</ErrorBoundary>
	}
}
