use gloo_net::http::Request;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::graph::ArtistRecord;

use super::CatalogError;

#[derive(Deserialize)]
struct TopArtistsPage {
	#[serde(default)]
	items: Vec<SpotifyArtist>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
	id: String,
	name: String,
	#[serde(default)]
	genres: Vec<String>,
	#[serde(default)]
	images: Vec<SpotifyImage>,
	#[serde(default)]
	popularity: u8,
}

#[derive(Deserialize)]
struct SpotifyImage {
	url: String,
}

impl From<SpotifyArtist> for ArtistRecord {
	fn from(artist: SpotifyArtist) -> Self {
		Self {
			id: artist.id,
			name: artist.name,
			genres: artist.genres,
			image_url: artist.images.into_iter().next().map(|image| image.url),
			popularity: artist.popularity.min(100),
		}
	}
}

/// Parses one page of `/me/top/artists`, keeping the upstream order.
pub fn parse_top_artists(raw: &str) -> Result<Vec<ArtistRecord>, serde_json::Error> {
	let page: TopArtistsPage = serde_json::from_str(raw)?;
	Ok(page.items.into_iter().map(ArtistRecord::from).collect())
}

/// Fetches one page of the user's top artists with a bearer `token`.
pub async fn fetch_top_artists(
	config: &AppConfig,
	token: &str,
) -> Result<Vec<ArtistRecord>, CatalogError> {
	let response = Request::get(&config.top_artists_url())
		.header("Authorization", &format!("Bearer {token}"))
		.send()
		.await?;

	let status = response.status();
	let body = response.text().await?;
	if !response.ok() {
		return Err(CatalogError::Status { status, body });
	}
	Ok(parse_top_artists(&body)?)
}
