use leptos::prelude::*;
use web_sys::MouseEvent;

use super::collection::MAX_OPERANDS;
use super::component::GraphHandle;
use super::types::{NewVector, Operation};

/// Operation picker plus add, delete, and grid-lock buttons.
#[component]
pub fn VectorControls(graph: GraphHandle) -> impl IntoView {
	let snapshot = graph.snapshot();

	let on_add = move |_: MouseEvent| graph.apply(|s| s.add_vector(NewVector::default()).map(|_| ()));
	let on_delete = move |_: MouseEvent| graph.apply(|s| s.delete_active_vector());
	let on_lock = move |_: MouseEvent| {
		graph.update(|s| s.toggle_lock_to_grid());
	};

	view! {
		<div class="vector-controls">
			<div>
				<label>"Operation: "</label>
				<select
					prop:value=move || snapshot.with(|s| s.operation.label())
					on:change=move |ev| {
						if let Some(operation) = Operation::from_label(&event_target_value(&ev)) {
							graph.update(|s| s.set_operation(operation));
						}
					}
				>
					{Operation::ALL
						.into_iter()
						.map(|op| view! { <option value=op.label()>{op.label()}</option> })
						.collect_view()}
				</select>
			</div>
			<div>
				<button
					class="styled-button"
					on:click=on_add
					disabled=move || !snapshot.with(|s| s.can_add)
				>
					"Add Vector"
				</button>
				<button
					class="styled-button"
					on:click=on_delete
					disabled=move || !snapshot.with(|s| s.can_delete)
				>
					"Delete Vector"
				</button>
				<button
					class=move || {
						if snapshot.with(|s| s.lock_to_grid) {
							"styled-button grid-lock locked"
						} else {
							"styled-button grid-lock"
						}
					}
					on:click=on_lock
				>
					"Toggle Grid Lock"
				</button>
				<span class="operand-count">
					{move || snapshot.with(|s| format!("{} of {MAX_OPERANDS} vectors", s.operand_count))}
				</span>
			</div>
		</div>
	}
}
