//! Derived display data for the render sink.
//!
//! Nothing here touches the network; these helpers turn catalog records into
//! the strings and links a view shows.

use serde_json::{Map, Value, json};

use crate::model::{CastMember, MovieDetails, MovieSummary, Video};

/// Image shown when a record has no poster.
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Text shown when a record has no synopsis.
pub const NO_OVERVIEW: &str = "No description available.";

/// Cast members listed on a detail view.
pub const CAST_LIMIT: usize = 8;

/// Characters of synopsis shown on a result card.
pub const CARD_SNIPPET_CHARS: usize = 160;

/// Returns the four-digit year of a `YYYY-MM-DD` date.
pub fn release_year(date: Option<&str>) -> Option<&str> {
	let date = date?.trim();
	date.get(..4).filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
}

/// Truncates `text` to `max_chars` characters, ending with an ellipsis.
pub fn snippet(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
		None => text.to_string(),
	}
}

/// Joins an image path onto `image_base`, or returns the placeholder.
pub fn poster_url(image_base: &str, path: Option<&str>) -> String {
	match path.filter(|p| !p.is_empty()) {
		Some(path) => format!("{}{}", image_base.trim_end_matches('/'), path),
		None => POSTER_PLACEHOLDER.to_string(),
	}
}

impl MovieSummary {
	pub fn year(&self) -> Option<&str> {
		release_year(self.release_date.as_deref())
	}

	/// Card synopsis: truncated overview or the fallback text.
	pub fn card_overview(&self) -> String {
		match self.overview.as_deref().filter(|o| !o.is_empty()) {
			Some(overview) => snippet(overview, CARD_SNIPPET_CHARS),
			None => NO_OVERVIEW.to_string(),
		}
	}

	/// Hero image: backdrop first, then poster.
	pub fn hero_image(&self, image_base: &str) -> String {
		let path = self.backdrop_path.as_deref().or(self.poster_path.as_deref());
		poster_url(image_base, path)
	}
}

/// A point in the trailer estimated from the film's runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActMarker {
	pub label: &'static str,
	pub start_secs: u64,
}

impl ActMarker {
	/// `m:ss` timestamp of the marker.
	pub fn timestamp(&self) -> String {
		format!("{}:{:02}", self.start_secs / 60, self.start_secs % 60)
	}
}

const ACTS: [(&str, u64); 3] = [("Act I", 25), ("Midpoint", 50), ("Climax", 75)];

impl MovieDetails {
	/// `title`, falling back to `name`, or empty.
	pub fn display_title(&self) -> &str {
		self.title.as_deref().or(self.name.as_deref()).unwrap_or_default()
	}

	pub fn year(&self) -> Option<&str> {
		release_year(self.release_date.as_deref())
	}

	pub fn genre_names(&self) -> Vec<&str> {
		self.genres.iter().map(|g| g.name.as_str()).collect()
	}

	/// `"<n> min"`, or `"Unknown"` without a runtime.
	pub fn runtime_label(&self) -> String {
		match self.runtime.filter(|&m| m > 0) {
			Some(minutes) => format!("{minutes} min"),
			None => "Unknown".to_string(),
		}
	}

	/// Leading cast members, at most [`CAST_LIMIT`].
	pub fn top_cast(&self) -> &[CastMember] {
		let cast = self.credits.as_ref().map(|c| c.cast.as_slice()).unwrap_or_default();
		&cast[..cast.len().min(CAST_LIMIT)]
	}

	/// First YouTube trailer or teaser.
	pub fn trailer(&self) -> Option<&Video> {
		self.videos
			.as_ref()?
			.results
			.iter()
			.find(|v| v.site == "YouTube" && (v.kind == "Trailer" || v.kind == "Teaser"))
	}

	/// Markers at 25, 50 and 75 percent of the runtime.
	///
	/// Empty unless the record has both a runtime and a trailer to seek in.
	pub fn estimated_acts(&self) -> Vec<ActMarker> {
		let Some(minutes) = self.runtime.filter(|&m| m > 0) else {
			return Vec::new();
		};
		if self.trailer().is_none() {
			return Vec::new();
		}
		let total = u64::from(minutes) * 60;
		ACTS.iter()
			.map(|&(label, percent)| ActMarker {
				label,
				start_secs: total * percent / 100,
			})
			.collect()
	}

	/// schema.org `Movie` record; absent fields are omitted.
	pub fn structured_data(&self, image_base: &str) -> Value {
		let mut doc = Map::new();
		doc.insert("@context".into(), json!("https://schema.org"));
		doc.insert("@type".into(), json!("Movie"));
		doc.insert("name".into(), json!(self.display_title()));
		doc.insert("image".into(), json!(poster_url(image_base, self.poster_path.as_deref())));
		doc.insert("description".into(), json!(self.overview.as_deref().unwrap_or_default()));
		if let Some(date) = self.release_date.as_deref().filter(|d| !d.is_empty()) {
			doc.insert("datePublished".into(), json!(date));
		}
		doc.insert("genre".into(), json!(self.genre_names()));
		if let Some(minutes) = self.runtime.filter(|&m| m > 0) {
			doc.insert("duration".into(), json!(format!("PT{minutes}M")));
		}
		if self.credits.is_some() {
			let actors: Vec<Value> = self
				.top_cast()
				.iter()
				.map(|c| json!({ "@type": "Person", "name": c.name }))
				.collect();
			doc.insert("actor".into(), Value::Array(actors));
		}
		Value::Object(doc)
	}
}

/// Embeddable player URL for a YouTube video, optionally seeking to `start_secs`.
pub fn trailer_embed_url(key: &str, start_secs: Option<u64>) -> String {
	match start_secs {
		Some(start) => format!("https://www.youtube.com/embed/{key}?rel=0&autoplay=1&start={start}"),
		None => format!("https://www.youtube.com/embed/{key}?rel=0"),
	}
}

/// Watch-page URL for a YouTube video at `start_secs`.
pub fn trailer_watch_url(key: &str, start_secs: u64) -> String {
	format!("https://www.youtube.com/watch?v={key}&t={start_secs}s")
}
