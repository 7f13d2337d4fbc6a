// ============================================================================
// observable-map - Change Events
// The immutable records broadcast for every structural change to a map
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// EVENT KIND
// =============================================================================

/// What happened to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MapEventKind {
    /// A key that was not present has been inserted.
    Added,
    /// An entry has been removed. The event carries the removed value.
    Removed,
    /// An existing key now holds a different value. The event carries the new value.
    Changed,
}

impl fmt::Display for MapEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapEventKind::Added => "added",
            MapEventKind::Removed => "removed",
            MapEventKind::Changed => "changed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// MAP EVENT
// =============================================================================

/// A single change published by an [`ObservableMap`](crate::ObservableMap).
///
/// Events are immutable once built. Observers receive them by reference.
///
/// # Example
///
/// ```
/// use observable_map::{MapEvent, MapEventKind};
///
/// let event = MapEvent::new(MapEventKind::Added, "answer", 42);
/// assert!(event.is_added());
/// assert_eq!(event.key(), &"answer");
/// assert_eq!(event.value(), &42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapEvent<K, V> {
    kind: MapEventKind,
    key: K,
    value: V,
}

impl<K, V> MapEvent<K, V> {
    pub fn new(kind: MapEventKind, key: K, value: V) -> Self {
        Self { kind, key, value }
    }

    pub fn added(key: K, value: V) -> Self {
        Self::new(MapEventKind::Added, key, value)
    }

    pub fn removed(key: K, value: V) -> Self {
        Self::new(MapEventKind::Removed, key, value)
    }

    pub fn changed(key: K, value: V) -> Self {
        Self::new(MapEventKind::Changed, key, value)
    }

    pub fn kind(&self) -> MapEventKind {
        self.kind
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value that was inserted, the new value of a change, or the value
    /// that was removed.
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn is_added(&self) -> bool {
        self.kind == MapEventKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == MapEventKind::Removed
    }

    pub fn is_changed(&self) -> bool {
        self.kind == MapEventKind::Changed
    }

    /// Consume the event, returning `(kind, key, value)`.
    pub fn into_parts(self) -> (MapEventKind, K, V) {
        (self.kind, self.key, self.value)
    }
}

// =============================================================================
// TESTS
// =============================================================================
