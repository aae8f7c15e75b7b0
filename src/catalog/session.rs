use web_sys::Storage;

const TOKEN_KEY: &str = "music_verse_token";

/// Bearer token for the catalog, if the user has signed in.
///
/// A fresh token arrives in the URL fragment after the authorize redirect;
/// it is moved into session storage and the fragment cleared. The token is
/// never validated or refreshed here.
pub fn access_token() -> Option<String> {
	let window = web_sys::window()?;
	let storage = session_storage();

	if let Ok(hash) = window.location().hash()
		&& let Some(token) = token_from_fragment(&hash)
	{
		if let Some(storage) = &storage {
			let _ = storage.set_item(TOKEN_KEY, &token);
		}
		let _ = window.location().set_hash("");
		return Some(token);
	}

	storage?.get_item(TOKEN_KEY).ok().flatten()
}

/// Drops the stored token so the next load asks for a new sign-in.
pub fn forget_token() {
	if let Some(storage) = session_storage() {
		let _ = storage.remove_item(TOKEN_KEY);
	}
}

fn session_storage() -> Option<Storage> {
	web_sys::window()?.session_storage().ok().flatten()
}

fn token_from_fragment(fragment: &str) -> Option<String> {
	fragment
		.trim_start_matches('#')
		.split('&')
		.filter_map(|pair| pair.split_once('='))
		.find(|(key, _)| *key == "access_token")
		.and_then(|(_, value)| urlencoding::decode(value).ok())
		.map(|value| value.into_owned())
		.filter(|value| !value.is_empty())
}
