//! Music Verse: your top-listened artists as an interactive genre-similarity
//! graph.
//!
//! [`graph`] turns artist records into a weighted node/edge model. The
//! force-graph component drives hover highlighting, selection, search and
//! viewport commands over it.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod catalog;
mod components;
pub mod config;
pub mod graph;
mod pages;

pub use components::force_graph::{
	DrawIntent, InteractionController, InteractionState, Viewport, style_for,
};

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the universe and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Music Verse" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=|| view! { <Home /> } />
				<Route path=path!("/demo") view=|| view! { <Home demo=true /> } />
			</Routes>
		</Router>
	}
}
