use std::hash::BuildHasherDefault;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Iteration follows insertion order, which keeps every search deterministic
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Insertion ordered set, used for visited patients
pub type FxIndexSet<K> = IndexSet<K, BuildHasherDefault<FxHasher>>;
