//! Adapters around the artist catalog: session token, upstream fetch and the
//! bundled demo catalog. The graph is only built from what these return.

mod demo;
mod session;
mod spotify;

use log::{error, info};
use thiserror::Error;

use crate::config::AppConfig;
use crate::graph::ArtistRecord;

pub use demo::demo_records;
pub use session::{access_token, forget_token};
pub use spotify::{fetch_top_artists, parse_top_artists};

/// Why the catalog could not be loaded.
#[derive(Error, Debug)]
pub enum CatalogError {
	/// No access token in the URL or the session.
	#[error("Not signed in")]
	NoSession,

	/// The request never produced a response.
	#[error("Request failed: {0}")]
	Http(#[from] gloo_net::Error),

	/// Non-success status; 401 means the token expired.
	#[error("Catalog returned {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, shown as the error detail.
		body: String,
	},

	/// The response body did not parse.
	#[error("Malformed catalog: {0}")]
	Decode(#[from] serde_json::Error),
}

impl CatalogError {
	/// Whether signing in again could fix this.
	pub fn needs_login(&self) -> bool {
		matches!(self, Self::NoSession | Self::Status { status: 401, .. })
	}
}

/// Fetches the signed-in user's top artists. No retries.
pub async fn load(config: &AppConfig) -> Result<Vec<ArtistRecord>, CatalogError> {
	let token = access_token().ok_or(CatalogError::NoSession)?;
	match fetch_top_artists(config, &token).await {
		Ok(records) => {
			info!("Fetched {} top artists", records.len());
			Ok(records)
		}
		Err(err) => {
			error!("Failed to fetch top artists: {err}");
			if err.needs_login() {
				forget_token();
			}
			Err(err)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn expired_token_and_missing_session_need_login() {
		assert!(CatalogError::NoSession.needs_login());
		assert!(
			CatalogError::Status {
				status: 401,
				body: String::new()
			}
			.needs_login()
		);
		assert!(
			!CatalogError::Status {
				status: 503,
				body: "busy".into()
			}
			.needs_login()
		);
	}

	#[test]
	fn status_error_names_the_code() {
		let err = CatalogError::Status {
			status: 429,
			body: "slow down".into(),
		};
		assert_eq!(err.to_string(), "Catalog returned 429: slow down");
	}
}
