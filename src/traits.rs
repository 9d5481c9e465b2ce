use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for class label types accepted by the classifiers.
///
/// Labels are counted in hash maps, compared for the deterministic mode
/// tie-break (smallest label wins), and shared across rayon workers during
/// prediction. Every integer type satisfies these bounds.
pub trait Label: Copy + Ord + Hash + Debug + Send + Sync {}

impl<T> Label for T where T: Copy + Ord + Hash + Debug + Send + Sync {}
