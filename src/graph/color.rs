/// Stand-in for an absent genre, hashed like any other string.
pub const UNKNOWN_GENRE: &str = "unknown";

/// Maps a genre to a stable `#RRGGBB` color.
///
/// Folds UTF-16 code units into an `i32` with `hash = c + ((hash << 5) - hash)`,
/// wrapping on overflow, then keeps the low 24 bits. Identical genres always
/// share a color, which is what groups them visually.
pub fn color_for(genre: Option<&str>) -> String {
	let genre = genre.unwrap_or(UNKNOWN_GENRE);
	let hash = genre.encode_utf16().fold(0i32, |hash, unit| {
		(unit as i32).wrapping_add((hash << 5).wrapping_sub(hash))
	});
	format!("#{:06X}", hash & 0x00FF_FFFF)
}
