//! Sorted, binary-searchable record index.
//!
//! A [`RecordIndex`] owns the records of one kind, sorted once at
//! construction by a designated key compared case-insensitively. Lookups by
//! that key are `O(log n)`; lookups by any other field go through
//! [`RecordIndex::find_by`] / [`RecordIndex::filter_by`] and scan linearly.
//!
//! The sort is stable, so records sharing a key stay contiguous and keep
//! their original relative order. A key lookup therefore returns a slice.

/// Records of one kind, sorted by a case-insensitive primary key.
#[derive(Debug, Clone)]
pub struct RecordIndex<R> {
    records: Vec<R>,
    /// Lowercased primary key of each record, parallel to `records`.
    keys: Vec<String>,
}

impl<R> Default for RecordIndex<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl<R> RecordIndex<R> {
    /// Build an index over `records`, sorted by the string `key` returns.
    pub fn new(records: Vec<R>, key: impl Fn(&R) -> &str) -> Self {
        let mut keyed: Vec<(String, R)> = records
            .into_iter()
            .map(|record| (key(&record).to_lowercase(), record))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let (keys, records) = keyed.into_iter().unzip();
        Self { records, keys }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in key order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Every record whose key equals `value`, ignoring case.
    ///
    /// Binary search lands on *some* match; the matching run is then widened
    /// in both directions. Returns an empty slice when nothing matches.
    pub fn lookup_all(&self, value: &str) -> &[R] {
        let needle = value.to_lowercase();
        let Some(hit) = self.search(&needle) else {
            return &[];
        };

        let mut first = hit;
        while let Some(prev) = first.checked_sub(1) {
            if self.keys.get(prev) != Some(&needle) {
                break;
            }
            first = prev;
        }

        let mut end = hit.saturating_add(1);
        while self.keys.get(end) == Some(&needle) {
            end = end.saturating_add(1);
        }

        self.records.get(first..end).unwrap_or_default()
    }

    /// The first record whose key equals `value`, ignoring case.
    pub fn lookup_one(&self, value: &str) -> Option<&R> {
        self.lookup_all(value).first()
    }

    /// The first record (in key order) matching `predicate`.
    ///
    /// Used for non-key fields; exact matching is up to the predicate.
    pub fn find_by(&self, predicate: impl Fn(&R) -> bool) -> Option<&R> {
        self.records.iter().find(|record| predicate(record))
    }

    /// Every record (in key order) matching `predicate`.
    pub fn filter_by(&self, predicate: impl Fn(&R) -> bool) -> Vec<&R> {
        self.records.iter().filter(|record| predicate(record)).collect()
    }

    /// Index of any record whose lowercased key equals `needle`.
    fn search(&self, needle: &str) -> Option<usize> {
        let mut low = 0_usize;
        let mut high = self.keys.len();
        while low < high {
            let mid = low.saturating_add(high.saturating_sub(low) / 2);
            let key = self.keys.get(mid)?;
            match key.as_str().cmp(needle) {
                std::cmp::Ordering::Less => low = mid.saturating_add(1),
                std::cmp::Ordering::Greater => high = mid,
                std::cmp::Ordering::Equal => return Some(mid),
            }
        }
        None
    }
}

impl<'a, R> IntoIterator for &'a RecordIndex<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
