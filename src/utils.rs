use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

/// An insertion-ordered map using the Fx hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
/// An insertion-ordered set using the Fx hasher.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// The suffix given to the backward half of a split reversible reaction.
pub const BACKWARD_SUFFIX: &str = "_b";
