// ============================================================================
// observable-map - Type Definitions
// Shared function types used by the map and its event channel
// ============================================================================

use std::rc::Rc;

/// Structural equality used by a map to detect no-op writes.
///
/// A plain function pointer, so maps stay cheap to clone.
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default structural equality via `PartialEq`.
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// A callback invoked synchronously for every delivered value.
pub type ObserverFn<T> = Rc<dyn Fn(&T)>;

/// A filter applied by a derived stream before delivery.
pub type PredicateFn<T> = Rc<dyn Fn(&T) -> bool>;

/// Identifies one subscription within a channel.
pub type SubscriberId = u64;
