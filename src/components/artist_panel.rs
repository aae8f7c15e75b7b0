use leptos::prelude::*;

use crate::graph::{GraphNode, IndexedGraph};

use super::force_graph::GraphHandle;

const SHOWN_GENRES: usize = 3;

/// Detail overlay for the selected artist. Hidden while nothing is selected;
/// closing it behaves like a click on empty space.
#[component]
pub fn ArtistInfoPanel(graph: IndexedGraph, handle: GraphHandle) -> impl IntoView {
	let selected = handle.selected();
	let artist = Memo::new(move |_| {
		selected
			.get()
			.and_then(|id| graph.model.node(&id).cloned())
			.map(|node| {
				let connections = graph.neighbors.degree(&node.id);
				(node, connections)
			})
	});
	let field = move |f: fn(&GraphNode) -> String| {
		move || artist.with(|a| a.as_ref().map(|(node, _)| f(node)).unwrap_or_default())
	};

	view! {
		<div class="artist-panel" class:hidden=move || artist.with(Option::is_none)>
			<button class="artist-panel-close" on:click=move |_| handle.background_click()>
				"×"
			</button>

			<div class="artist-panel-header">
				<img
					class="artist-panel-image"
					src=field(|node| node.image_url.clone().unwrap_or_default())
					alt=field(|node| node.name.clone())
				/>
				<h2>{field(|node| node.name.clone())}</h2>
				<div class="artist-panel-genres">
					{move || {
						artist
							.with(|a| {
								a.as_ref()
									.map(|(node, _)| {
										node.genres.iter().take(SHOWN_GENRES).cloned().collect::<Vec<_>>()
									})
									.unwrap_or_default()
							})
							.into_iter()
							.map(|genre| view! { <span class="genre-tag">{genre}</span> })
							.collect_view()
					}}
				</div>
			</div>

			<div class="artist-panel-row">
				<span>"Popularity"</span>
				<div class="popularity-bar">
					<div
						class="popularity-fill"
						style=move || {
							let weight = artist.with(|a| a.as_ref().map_or(0, |(node, _)| node.weight));
							format!("width: {weight}%")
						}
					></div>
				</div>
				<span>{field(|node| node.weight.to_string())}</span>
			</div>

			<div class="artist-panel-row">
				<span>"Connections"</span>
				<span>
					{move || artist.with(|a| a.as_ref().map_or(0, |(_, connections)| *connections))}
					" Linked"
				</span>
			</div>

			<a
				class="artist-panel-link"
				target="_blank"
				rel="noopener"
				href=field(|node| format!("https://open.spotify.com/artist/{}", node.id))
			>
				"Open in Spotify"
			</a>
		</div>
	}
}
