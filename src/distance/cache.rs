//! Caller-owned memoization of travel matrices.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::debug;
use lru::LruCache;
use rustc_hash::FxHasher;

use crate::error::InputError;
use crate::models::Node;

use super::geometry::GeometryModel;
use super::matrix::TravelMatrices;
use super::projection::Projection;

/// Bit patterns of every input the matrices depend on: coordinates in
/// order, then destination, tortuosity, speed, and projection.
fn content_bits(model: &GeometryModel, nodes: &[Node]) -> Vec<u64> {
    let mut bits = Vec::with_capacity(2 * nodes.len() + 5);
    for n in nodes {
        bits.push(n.lon().to_bits());
        bits.push(n.lat().to_bits());
    }
    bits.push(model.destination().lon().to_bits());
    bits.push(model.destination().lat().to_bits());
    bits.push(model.tortuosity().to_bits());
    bits.push(model.avg_speed_kmh().to_bits());
    bits.push(match model.projection() {
        Projection::Planar => 0,
        Projection::LocalEquirectangular => 1,
    });
    bits
}

/// Content fingerprint of a node set under a geometry model.
///
/// Equal node sets (same length, bit-identical coordinates in the same
/// order, same destination, tortuosity, speed, and projection) always map
/// to the same key. Distinct sets may collide; [`MatrixCache`] compares the
/// full content on every hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeSetKey(u64);

impl NodeSetKey {
    /// Fingerprints `nodes` as seen through `model`.
    pub fn new(model: &GeometryModel, nodes: &[Node]) -> Self {
        Self::of(&content_bits(model, nodes))
    }

    fn of(bits: &[u64]) -> Self {
        let mut h = FxHasher::default();
        bits.hash(&mut h);
        Self(h.finish())
    }

    /// Raw 64-bit fingerprint.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// LRU cache of travel matrices keyed by [`NodeSetKey`].
///
/// Matrices are shared as `Arc` so runs with different benefit factors can
/// reuse them without copying. Entries are recomputed only on a miss or
/// after [`invalidate`](Self::invalidate).
///
/// # Examples
///
/// ```
/// use u_carpool::config::GeometryConfig;
/// use u_carpool::distance::{GeometryModel, MatrixCache, Origin};
///
/// let model = GeometryModel::new(&GeometryConfig::default()).unwrap();
/// let nodes = model
///     .build_nodes(&[Origin::new(-1.7, 48.2), Origin::new(-1.6, 48.0)])
///     .unwrap();
///
/// let mut cache = MatrixCache::new(4);
/// let a = cache.get_or_compute(&model, &nodes);
/// let b = cache.get_or_compute(&model, &nodes);
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.stats(), (1, 1));
/// ```
pub struct MatrixCache {
    entries: LruCache<NodeSetKey, Entry>,
    hits: u64,
    misses: u64,
}

struct Entry {
    content: Vec<u64>,
    matrices: Arc<TravelMatrices>,
}

impl MatrixCache {
    /// Creates a cache holding at most `capacity` node sets (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Key under which `nodes` would be stored.
    pub fn key_for(&self, model: &GeometryModel, nodes: &[Node]) -> NodeSetKey {
        NodeSetKey::new(model, nodes)
    }

    /// Returns cached matrices for `nodes`, computing them on a miss.
    ///
    /// An entry whose key matches but whose content differs counts as a
    /// miss and is replaced.
    pub fn get_or_compute(
        &mut self,
        model: &GeometryModel,
        nodes: &[Node],
    ) -> Arc<TravelMatrices> {
        let content = content_bits(model, nodes);
        let key = NodeSetKey::of(&content);
        if let Some(entry) = self.entries.get(&key) {
            if entry.content == content {
                self.hits += 1;
                debug!("matrix_cache: hit key={:016x}", key.0);
                return Arc::clone(&entry.matrices);
            }
            debug!("matrix_cache: collision key={:016x}", key.0);
        }
        self.misses += 1;
        debug!("matrix_cache: miss key={:016x} nodes={}", key.0, nodes.len());
        let matrices = Arc::new(model.travel_matrices(nodes));
        self.entries.put(
            key,
            Entry {
                content,
                matrices: Arc::clone(&matrices),
            },
        );
        matrices
    }

    /// Looks up `nodes` without computing.
    pub fn get(&mut self, model: &GeometryModel, nodes: &[Node]) -> Option<Arc<TravelMatrices>> {
        let content = content_bits(model, nodes);
        self.entries
            .get(&NodeSetKey::of(&content))
            .filter(|entry| entry.content == content)
            .map(|entry| Arc::clone(&entry.matrices))
    }

    /// Stores externally computed matrices for `nodes`.
    ///
    /// The matrices are validated against the node count first.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use u_carpool::config::GeometryConfig;
    /// use u_carpool::distance::{GeometryModel, MatrixCache, Origin};
    ///
    /// let model = GeometryModel::new(&GeometryConfig::default()).unwrap();
    /// let nodes = model.build_nodes(&[Origin::new(-1.7, 48.2)]).unwrap();
    /// let matrices = Arc::new(model.travel_matrices(&nodes));
    ///
    /// let mut cache = MatrixCache::new(4);
    /// let key = cache.insert(&model, &nodes, Arc::clone(&matrices)).unwrap();
    /// assert_eq!(key, cache.key_for(&model, &nodes));
    /// assert!(Arc::ptr_eq(&cache.get_or_compute(&model, &nodes), &matrices));
    /// assert_eq!(cache.stats(), (1, 0));
    /// ```
    pub fn insert(
        &mut self,
        model: &GeometryModel,
        nodes: &[Node],
        matrices: Arc<TravelMatrices>,
    ) -> Result<NodeSetKey, InputError> {
        matrices.validate(nodes.len())?;
        let content = content_bits(model, nodes);
        let key = NodeSetKey::of(&content);
        self.entries.put(key, Entry { content, matrices });
        Ok(key)
    }

    /// Drops one entry. Returns `true` if it was present.
    pub fn invalidate(&mut self, key: &NodeSetKey) -> bool {
        self.entries.pop(key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached node sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
