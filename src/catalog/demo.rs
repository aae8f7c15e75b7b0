use crate::graph::ArtistRecord;

use super::CatalogError;

const DEMO_CATALOG: &str = include_str!("../../assets/demo_artists.json");

/// Bundled catalog for exploring without an account.
pub fn demo_records() -> Result<Vec<ArtistRecord>, CatalogError> {
	Ok(serde_json::from_str(DEMO_CATALOG)?)
}
