use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::force_graph::GraphHandle;

/// Search field and zoom buttons along the bottom edge.
#[component]
pub fn Controls(handle: GraphHandle) -> impl IntoView {
	let query = RwSignal::new(String::new());

	let handle_search = handle.clone();
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		handle_search.search(&query.get_untracked());
	};

	let (handle_out, handle_reset, handle_in) = (handle.clone(), handle.clone(), handle);

	view! {
		<div class="graph-controls">
			<form class="graph-search" on:submit=on_submit>
				<input
					type="text"
					placeholder="Find artist..."
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
				/>
			</form>

			<div class="graph-controls-separator"></div>

			<div class="graph-zoom">
				<button on:click=move |_| handle_out.zoom_out() title="Zoom out">"−"</button>
				<button on:click=move |_| handle_reset.reset_view() title="Reset view">"⟲"</button>
				<button on:click=move |_| handle_in.zoom_in() title="Zoom in">"+"</button>
			</div>
		</div>
	}
}
