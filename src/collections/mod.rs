// ============================================================================
// observable-map - Collections
// The observable map and its insertion-ordered storage
// ============================================================================
//
// ObservableMap keeps its entries in OrderedEntries and owns one Subject.
// Reads go straight to the storage. Writes go through the change-detection
// policy in reactivity::equality and publish a MapEvent on success.
// ============================================================================

mod map;
mod ordered;

pub use map::ObservableMap;
pub use ordered::{Iter, Keys, Values};
