// ============================================================================
// observable-map - An Observable, Insertion-Ordered Map for Rust
// ============================================================================
//
// ObservableMap behaves like an ordinary map for reads and publishes a
// MapEvent (Added / Removed / Changed) for every write that changes it.
// Observers subscribe to one of four streams over the same channel and run
// synchronously inside the mutating call.
// ============================================================================

pub mod collections;
pub mod core;
pub mod primitives;
pub mod reactivity;

// Re-export core items at crate root for ergonomic access
pub use crate::core::event::{MapEvent, MapEventKind};
pub use crate::core::types::{default_equals, EqualsFn, ObserverFn, PredicateFn, SubscriberId};

// Re-export the channel primitives
pub use primitives::subject::{EventStream, Subject, Subscription};

// Re-export change detection
pub use reactivity::equality::{
    always_equals, is_noop_write, never_equals, Truthy,
};

// Re-export collections
pub use collections::ObservableMap;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn root_exports_cover_the_common_path() {
        let mut map: ObservableMap<&str, i32> = ObservableMap::new();
        let count = Rc::new(Cell::new(0));

        let counter = count.clone();
        let sub: Subscription = map.on_event().subscribe(move |event: &MapEvent<&'static str, i32>| {
            assert_ne!(event.kind(), MapEventKind::Changed);
            counter.set(counter.get() + 1);
        });

        map.set("a", 1);
        map.delete("a");
        assert_eq!(count.get(), 2);
        assert!(sub.unsubscribe());
    }

    #[test]
    fn map_size_tracks_distinct_keys() {
        let mut map = ObservableMap::from([("v1", 2), ("v2", 5)]);
        assert_eq!(map.len(), 2);
        map.set("v1", 3).set("v3", 1);
        assert_eq!(map.len(), 3);
        map.delete("v2");
        assert_eq!(map.len(), 2);
        map.clear();
        assert_eq!(map.len(), 0);
    }
}
