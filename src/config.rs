//! Where the catalog comes from and how to ask for it.

/// Upper bound the Web API accepts for one page of top artists.
pub const MAX_PAGE_SIZE: u8 = 50;

/// Listening window the top-artists ranking covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange {
	/// About the last four weeks.
	ShortTerm,
	/// About the last six months.
	MediumTerm,
	/// Several years.
	#[default]
	LongTerm,
}

impl TimeRange {
	/// Query parameter value.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ShortTerm => "short_term",
			Self::MediumTerm => "medium_term",
			Self::LongTerm => "long_term",
		}
	}
}

/// Catalog endpoints and sign-in parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Web API root.
	pub api_base: String,
	/// OAuth authorize endpoint.
	pub authorize_url: String,
	/// Registered application id.
	pub client_id: String,
	/// Where the authorize endpoint sends the user back to.
	pub redirect_uri: String,
	/// OAuth scopes requested at sign-in.
	pub scopes: Vec<&'static str>,
	/// Artists per request, at most [`MAX_PAGE_SIZE`].
	pub page_size: u8,
	/// Ranking window.
	pub time_range: TimeRange,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: "https://api.spotify.com/v1".into(),
			authorize_url: "https://accounts.spotify.com/authorize".into(),
			client_id: option_env!("SPOTIFY_CLIENT_ID").unwrap_or_default().into(),
			redirect_uri: String::new(),
			scopes: vec!["user-top-read", "user-read-private", "user-read-email"],
			page_size: MAX_PAGE_SIZE,
			time_range: TimeRange::default(),
		}
	}
}

impl AppConfig {
	/// Defaults, redirecting back to the page's own origin.
	pub fn from_browser() -> Self {
		let mut config = Self::default();
		if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
			config.redirect_uri = format!("{origin}/");
		}
		config
	}

	/// Request URL for one page of top artists.
	pub fn top_artists_url(&self) -> String {
		format!(
			"{}/me/top/artists?limit={}&time_range={}",
			self.api_base.trim_end_matches('/'),
			self.page_size.clamp(1, MAX_PAGE_SIZE),
			self.time_range.as_str(),
		)
	}

	/// Implicit-grant authorize URL; the token comes back in the fragment.
	pub fn login_url(&self) -> String {
		format!(
			"{}?client_id={}&response_type=token&redirect_uri={}&scope={}",
			self.authorize_url,
			urlencoding::encode(&self.client_id),
			urlencoding::encode(&self.redirect_uri),
			urlencoding::encode(&self.scopes.join(" ")),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn top_artists_url_uses_page_and_range() {
		let config = AppConfig::default();
		assert_eq!(
			config.top_artists_url(),
			"https://api.spotify.com/v1/me/top/artists?limit=50&time_range=long_term"
		);
	}

	#[test]
	fn page_size_is_capped() {
		let config = AppConfig {
			api_base: "http://localhost:9000/".into(),
			page_size: 200,
			time_range: TimeRange::ShortTerm,
			..AppConfig::default()
		};
		assert_eq!(
			config.top_artists_url(),
			"http://localhost:9000/me/top/artists?limit=50&time_range=short_term"
		);
	}

	#[test]
	fn login_url_encodes_redirect_and_scopes() {
		let config = AppConfig {
			client_id: "abc123".into(),
			redirect_uri: "http://127.0.0.1:8080/".into(),
			..AppConfig::default()
		};
		assert_eq!(
			config.login_url(),
			"https://accounts.spotify.com/authorize?client_id=abc123&response_type=token\
			 &redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2F\
			 &scope=user-top-read%20user-read-private%20user-read-email"
		);
	}
}
