use std::fmt;

/// A search string as issued: trimmed text plus its cache key.
///
/// The text keeps the user's casing and is what gets sent to the catalog;
/// the key is lowercased so "Batman" and "batman " share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
	text: String,
	key: String,
}

impl Query {
	pub fn new(raw: &str) -> Self {
		let text = raw.trim().to_string();
		let key = text.to_lowercase();
		Self { text, key }
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Case-folded cache key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Length of the trimmed text in characters.
	pub fn char_len(&self) -> usize {
		self.text.chars().count()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}
}

impl fmt::Display for Query {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

impl From<&str> for Query {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}
