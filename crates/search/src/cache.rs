//! Bounded query-result cache with first-in-first-out eviction.
//!
//! Reads never reorder entries and overwriting a key keeps its slot, so the
//! eviction order is exactly the order in which keys were first inserted.

use indexmap::IndexMap;

use crate::query::Query;

/// Default number of cached queries.
pub const DEFAULT_CAPACITY: usize = 120;

/// Query-keyed result store bounded to a fixed number of entries.
#[derive(Debug, Clone)]
pub struct ResultCache<V> {
	entries: IndexMap<String, V>,
	capacity: usize,
}

impl<V> Default for ResultCache<V> {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

impl<V> ResultCache<V> {
	/// Creates an empty cache. A capacity of zero is treated as one.
	pub fn new(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			entries: IndexMap::with_capacity(capacity),
			capacity,
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the entry for `query` without affecting eviction order.
	pub fn get(&self, query: &Query) -> Option<&V> {
		self.entries.get(query.key())
	}

	pub fn contains(&self, query: &Query) -> bool {
		self.entries.contains_key(query.key())
	}

	/// Stores `value` under `query`.
	///
	/// An existing key is overwritten in place. A new key inserted at
	/// capacity first evicts the oldest inserted entry, whose key is
	/// returned.
	pub fn put(&mut self, query: &Query, value: V) -> Option<String> {
		if let Some(slot) = self.entries.get_mut(query.key()) {
			*slot = value;
			return None;
		}

		let evicted = if self.entries.len() >= self.capacity {
			self.entries.shift_remove_index(0).map(|(key, _)| key)
		} else {
			None
		};
		if let Some(key) = &evicted {
			tracing::trace!(evicted = %key, capacity = self.capacity, "cache.evict");
		}

		self.entries.insert(query.key().to_string(), value);
		evicted
	}

	/// Keys from oldest to newest insertion.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
