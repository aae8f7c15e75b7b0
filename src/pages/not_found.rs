use leptos::prelude::*;

/// 404 Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="screen-centered">
			<h1>"Lost in space"</h1>
			<p>"Nothing lives at this address."</p>
			<a class="button" href="/">"Back to your universe"</a>
		</div>
	}
}
