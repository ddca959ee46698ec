use leptos::prelude::*;
use web_sys::MouseEvent;

use super::component::GraphHandle;
use super::types::VectorField;

fn field_label(field: VectorField, name: char) -> (String, Option<&'static str>) {
	match field {
		VectorField::Magnitude => (format!("|{name}|"), None),
		VectorField::Angle => ("θ".to_string(), None),
		VectorField::XComponent => (name.to_string(), Some("x")),
		VectorField::YComponent => (name.to_string(), Some("y")),
	}
}

/// Magnitude, angle, and components of the active vector, with commit and close.
#[component]
pub fn VectorDetailsPanel(graph: GraphHandle) -> impl IntoView {
	let snapshot = graph.snapshot();
	// Rebuild the inputs only when the active vector changes, not on every edit.
	let active = Memo::new(move |_| {
		snapshot.with(|s| s.active.as_ref().map(|a| (a.name, a.read_only)))
	});
	let editing = move || snapshot.with(|s| s.active.as_ref().is_some_and(|a| a.editing));

	view! {
		<div class="vector-details">
			{move || match active.get() {
				Some((name, read_only)) => {
					view! {
						<div class="button-container">
							<button
								class=move || if editing() { "toggle pending" } else { "toggle" }
								disabled=read_only
								on:click=move |_: MouseEvent| graph.apply(|s| s.commit_active_vector())
							>
								"Update"
							</button>
							<button
								class="close"
								on:click=move |_: MouseEvent| {
									graph.update(|s| s.close_details());
								}
							>
								"x"
							</button>
						</div>
						{VectorField::ALL
							.into_iter()
							.map(|field| {
								view! { <VectorInput graph=graph field=field name=name read_only=read_only /> }
							})
							.collect_view()}
					}
						.into_any()
				}
				None => view! { <p>"Select a vector to view details"</p> }.into_any(),
			}}
		</div>
	}
}

#[component]
fn VectorInput(graph: GraphHandle, field: VectorField, name: char, read_only: bool) -> impl IntoView {
	let snapshot = graph.snapshot();
	let (label, sub_label) = field_label(field, name);
	let value = move || {
		snapshot.with(|s| {
			s.active
				.as_ref()
				.map(|a| a.details.get(field).display())
				.unwrap_or_default()
		})
	};

	view! {
		<div class="field-container">
			<label>{label} {sub_label.map(|sub| view! { <sub>{sub}</sub> })}</label>
			<input
				type="number"
				class="vector-details-input"
				prop:value=value
				readonly=read_only
				on:input=move |ev| {
					let raw = event_target_value(&ev);
					graph.apply(|s| s.adjust_active_vector_field(field, &raw));
				}
			/>
		</div>
	}
}
