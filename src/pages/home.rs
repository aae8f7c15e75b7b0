use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::catalog::{self, CatalogError};
use crate::components::artist_panel::ArtistInfoPanel;
use crate::components::controls::Controls;
use crate::components::force_graph::{ForceGraphCanvas, GraphHandle};
use crate::config::AppConfig;
use crate::graph::{self, IndexedGraph};

#[derive(Clone)]
enum LoadState {
	Loading,
	Failed { message: String, needs_login: bool },
	Ready(IndexedGraph),
}

impl From<Result<Vec<graph::ArtistRecord>, CatalogError>> for LoadState {
	fn from(result: Result<Vec<graph::ArtistRecord>, CatalogError>) -> Self {
		match result {
			Ok(records) => Self::Ready(IndexedGraph::new(graph::build(&records))),
			Err(err) => Self::Failed {
				message: err.to_string(),
				needs_login: err.needs_login(),
			},
		}
	}
}

/// Loads the catalog, then shows the universe or an error.
///
/// With `demo` set the bundled catalog is used and no sign-in is needed.
#[component]
pub fn Home(#[prop(default = false)] demo: bool) -> impl IntoView {
	let config = AppConfig::from_browser();
	let login_url = config.login_url();
	let load = RwSignal::new(LoadState::Loading);

	if demo {
		load.set(catalog::demo_records().into());
	} else {
		spawn_local(async move {
			load.set(catalog::load(&config).await.into());
		});
	}

	move || match load.get() {
		LoadState::Loading => view! { <LoadingScreen /> }.into_any(),
		LoadState::Failed {
			message,
			needs_login,
		} => {
			warn!("Showing error screen: {message}");
			view! { <ErrorScreen message needs_login login_url=login_url.clone() /> }.into_any()
		}
		LoadState::Ready(graph) => view! { <Universe graph /> }.into_any(),
	}
}

#[component]
fn LoadingScreen() -> impl IntoView {
	view! {
		<div class="screen-centered">
			<div class="spinner"></div>
			<p class="loading-label">"LOADING UNIVERSE"</p>
		</div>
	}
}

#[component]
fn ErrorScreen(message: String, needs_login: bool, login_url: String) -> impl IntoView {
	let (heading, hint) = error_copy(needs_login);

	view! {
		<div class="screen-centered error-screen">
			<h1 class="title">"Music Verse"</h1>
			<h2>{heading}</h2>
			<p>{hint}</p>
			<p class="error-detail">{message}</p>
			<a class="button button-primary" href=login_url>"Connect Spotify"</a>
			<a class="button" href="/demo">"Explore the demo universe"</a>
		</div>
	}
}

/// Heading and hint for the error screen.
fn error_copy(needs_login: bool) -> (&'static str, &'static str) {
	if needs_login {
		(
			"Connect your account",
			"Your session has ended. Please sign in again.",
		)
	} else {
		(
			"Could not load data",
			"The catalog is unavailable right now. Try again later.",
		)
	}
}

#[component]
fn Universe(graph: IndexedGraph) -> impl IntoView {
	let handle = GraphHandle::new();
	let summary = format!(
		"{} Artists • {} Connections",
		graph.model.nodes.len(),
		graph.model.edges.len()
	);
	let data = {
		let graph = graph.clone();
		Signal::derive(move || graph.clone())
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data handle=handle.clone() fullscreen=true />
			<div class="graph-overlay">
				<h1>"Music Verse"</h1>
				<p class="subtitle">{summary}</p>
			</div>
			<ArtistInfoPanel graph handle=handle.clone() />
			<Controls handle />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_login_failures_ask_to_sign_in() {
		let (_, hint) = error_copy(true);
		assert!(hint.contains("sign in"));

		let (heading, hint) = error_copy(false);
		assert_eq!(heading, "Could not load data");
		assert!(!hint.contains("sign in"));
	}

	#[test]
	fn failed_fetch_maps_to_error_state() {
		let unavailable = CatalogError::Status {
			status: 503,
			body: "busy".into(),
		};
		let failed: Result<Vec<graph::ArtistRecord>, _> = Err(unavailable);
		match LoadState::from(failed) {
			LoadState::Failed { needs_login, .. } => assert!(!needs_login),
			_ => panic!("expected a failed state"),
		}
		let failed: Result<Vec<graph::ArtistRecord>, _> = Err(CatalogError::NoSession);
		match LoadState::from(failed) {
			LoadState::Failed { needs_login, .. } => assert!(needs_login),
			_ => panic!("expected a failed state"),
		}
	}
}
