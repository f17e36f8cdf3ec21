//! Frequency distributions over an explicitly typed key space.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

/// Count of observations per value.
///
/// Keys are kept in a [`BTreeMap`] so iteration order (and therefore every
/// statistic computed from it) is deterministic. The running `total` always
/// equals the sum of the counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "K: Serialize + Ord")]
pub struct FrequencyDistribution<K: Ord> {
    counts: BTreeMap<K, u64>,
    total: u64,
}

impl<K: Ord> Default for FrequencyDistribution<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<K: Ord> FrequencyDistribution<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A distribution with every key of `domain` present at count zero.
    pub fn zero_filled(domain: impl IntoIterator<Item = K>) -> Self {
        let counts = domain.into_iter().map(|k| (k, 0)).collect();
        Self { counts, total: 0 }
    }

    /// Record one observation of `key`.
    pub fn observe(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Record `count` observations of `key`. Adding zero still registers the key.
    pub fn add(&mut self, key: K, count: u64) {
        *self.counts.entry(key).or_insert(0) += count;
        self.total += count;
    }

    /// Extend the key space with `domain`, leaving existing counts untouched.
    pub fn with_domain(mut self, domain: impl IntoIterator<Item = K>) -> Self {
        for key in domain {
            self.counts.entry(key).or_insert(0);
        }
        self
    }

    pub fn count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of keys, including zero-count keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of keys with a non-zero count.
    pub fn non_zero(&self) -> usize {
        self.counts.values().filter(|&&c| c > 0).count()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn keys(&self) -> btree_map::Keys<'_, K, u64> {
        self.counts.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, u64> {
        self.counts.iter()
    }

    /// Key with the highest count. Ties resolve to the smallest key.
    pub fn mode(&self) -> Option<(&K, u64)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&K, u64)>, (k, &c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((k, c)),
            })
    }

    pub fn as_map(&self) -> &BTreeMap<K, u64> {
        &self.counts
    }
}

impl<K: Ord> FromIterator<K> for FrequencyDistribution<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut dist = Self::new();
        for key in iter {
            dist.observe(key);
        }
        dist
    }
}

impl<K: Ord> FromIterator<(K, u64)> for FrequencyDistribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (key, count) in iter {
            dist.add(key, count);
        }
        dist
    }
}

impl<'a, K: Ord> IntoIterator for &'a FrequencyDistribution<K> {
    type Item = (&'a K, &'a u64);
    type IntoIter = btree_map::Iter<'a, K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
