//! Entity graph builder.
//!
//! Turns a validated batch into the indexed views the analyzers read. All
//! views borrow entity names from the records and iterate in first-seen
//! order, which keeps analyzer output deterministic for a given batch order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::types::{AmountBucket, TransactionRecord};

// ---------------------------------------------------------------------------
// Insertion-ordered map
// ---------------------------------------------------------------------------

/// Map that iterates in the order keys were first inserted.
#[derive(Debug, Clone)]
pub struct FirstSeenMap<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for FirstSeenMap<K, V> {
    fn default() -> Self {
        FirstSeenMap {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> FirstSeenMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push((key, default()));
                i
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Push `value` unless it is already present. Neighbour lists stay tiny, so a
/// linear scan keeps first-seen order without a second index.
fn push_unique<'a>(list: &mut Vec<&'a str>, value: &'a str) {
    if !list.contains(&value) {
        list.push(value);
    }
}

// ---------------------------------------------------------------------------
// Edges and pairs
// ---------------------------------------------------------------------------

/// One directed transfer, derived 1:1 from a [`TransactionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectedEdge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub bucket: AmountBucket,
    pub timestamp: DateTime<Utc>,
}

impl<'a> From<&'a TransactionRecord> for DirectedEdge<'a> {
    fn from(r: &'a TransactionRecord) -> Self {
        DirectedEdge {
            from: &r.sender,
            to: &r.receiver,
            bucket: r.amount_bucket,
            timestamp: r.timestamp,
        }
    }
}

/// Ordered (sender, receiver) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairRef<'a> {
    pub sender: &'a str,
    pub receiver: &'a str,
}

impl PairRef<'_> {
    pub fn to_owned_pair(&self) -> EntityPair {
        EntityPair {
            sender: self.sender.to_string(),
            receiver: self.receiver.to_string(),
        }
    }
}

/// Owned ordered pair carried by pattern tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityPair {
    pub sender: String,
    pub receiver: String,
}

impl fmt::Display for EntityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.sender, self.receiver)
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Read-only views over one batch.
#[derive(Debug, Clone)]
pub struct EntityGraph<'a> {
    pub edges: Vec<DirectedEdge<'a>>,
    /// Small-bucket timestamps per ordered pair, in record order.
    pub small_timestamps: FirstSeenMap<PairRef<'a>, Vec<DateTime<Utc>>>,
    /// Per-pair count of each bucket, buckets in first-seen order.
    pub bucket_counts: FirstSeenMap<PairRef<'a>, Vec<(AmountBucket, u32)>>,
    /// Unique targets reachable over small/medium edges, per source.
    pub layering_adjacency: FirstSeenMap<&'a str, Vec<&'a str>>,
    /// Unique undirected neighbours per entity, regardless of bucket.
    pub neighbours: FirstSeenMap<&'a str, Vec<&'a str>>,
}

impl<'a> EntityGraph<'a> {
    pub fn build(records: &'a [TransactionRecord]) -> Self {
        let edges: Vec<DirectedEdge<'a>> = records.iter().map(DirectedEdge::from).collect();

        let mut small_timestamps = FirstSeenMap::new();
        let mut bucket_counts: FirstSeenMap<PairRef<'a>, Vec<(AmountBucket, u32)>> =
            FirstSeenMap::new();
        let mut layering_adjacency = FirstSeenMap::new();
        let mut neighbours = FirstSeenMap::new();

        for e in &edges {
            let pair = PairRef {
                sender: e.from,
                receiver: e.to,
            };

            if e.bucket == AmountBucket::Small {
                small_timestamps
                    .get_or_insert_with(pair, Vec::new)
                    .push(e.timestamp);
            }

            let counts = bucket_counts.get_or_insert_with(pair, Vec::new);
            match counts.iter_mut().find(|(b, _)| *b == e.bucket) {
                Some((_, n)) => *n += 1,
                None => counts.push((e.bucket, 1)),
            }

            if e.bucket.is_layering_size() {
                push_unique(layering_adjacency.get_or_insert_with(e.from, Vec::new), e.to);
            }

            push_unique(neighbours.get_or_insert_with(e.from, Vec::new), e.to);
            push_unique(neighbours.get_or_insert_with(e.to, Vec::new), e.from);
        }

        EntityGraph {
            edges,
            small_timestamps,
            bucket_counts,
            layering_adjacency,
            neighbours,
        }
    }

    /// Every entity in the batch, senders before receivers, in record order.
    pub fn entities(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.neighbours.keys().copied()
    }

    pub fn entity_count(&self) -> usize {
        self.neighbours.len()
    }

    pub fn contains_entity(&self, name: &str) -> bool {
        self.neighbours.get(name).is_some()
    }

    pub fn degree(&self, name: &str) -> usize {
        self.neighbours.get(name).map_or(0, Vec::len)
    }

    pub fn transaction_count(&self) -> usize {
        self.edges.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
