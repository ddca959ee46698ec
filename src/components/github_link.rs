use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsValue;
use web_sys::MouseEvent;

/// Opens `url` in a new browser tab.
pub fn open_external_link(url: &str) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	window.open_with_url_and_target(url, "_blank")?;
	Ok(())
}

/// Footer pointing at the project's source code.
#[component]
pub fn GithubLink(#[prop(into)] href: String) -> impl IntoView {
	let on_click = move |ev: MouseEvent| {
		ev.prevent_default();
		if let Err(err) = open_external_link(&href) {
			warn!("Could not open {href}: {err:?}");
		}
	};

	view! {
		<footer class="github-container">
			"Check out the code on "
			<button class="github-button" on:click=on_click>
				"Github"
			</button>
		</footer>
	}
}
