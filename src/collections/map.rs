// ============================================================================
// observable-map - ObservableMap
// An insertion-ordered map that broadcasts every structural change
// ============================================================================

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::collections::ordered::{Iter, Keys, OrderedEntries, Values};
use crate::core::event::{MapEvent, MapEventKind};
use crate::core::types::{default_equals, EqualsFn};
use crate::primitives::subject::{EventStream, Subject};
use crate::reactivity::equality::{is_noop_write, Truthy};

// =============================================================================
// OBSERVABLE MAP
// =============================================================================

/// An insertion-ordered map that publishes a [`MapEvent`] for every addition,
/// removal, and value change.
///
/// Reads never publish. Writes store first and then notify every current
/// observer synchronously, before the mutating call returns.
///
/// A `set` on an existing key is skipped, with no event, when the stored
/// value is [truthy](Truthy) and equal to the new one. A falsy stored value
/// (zero, empty string, `None`, ...) is always overwritten and reported.
/// Likewise `delete` removes falsy values silently.
///
/// # Example
///
/// ```
/// use observable_map::{MapEvent, ObservableMap};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut scores: ObservableMap<&str, i32> = ObservableMap::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = seen.clone();
/// let _sub = scores
///     .on_event()
///     .subscribe(move |event| sink.borrow_mut().push(event.clone()));
///
/// scores.set("alice", 25).set("bob", 30);
/// scores.set("alice", 25); // unchanged, nothing published
/// scores.set("alice", 26);
/// scores.delete("bob");
///
/// assert_eq!(
///     *seen.borrow(),
///     vec![
///         MapEvent::added("alice", 25),
///         MapEvent::added("bob", 30),
///         MapEvent::changed("alice", 26),
///         MapEvent::removed("bob", 30),
///     ]
/// );
/// assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec!["alice"]);
/// ```
pub struct ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    /// The entries, in insertion order
    data: OrderedEntries<K, V>,

    /// Outbound channel shared by all four event streams
    events: Subject<MapEvent<K, V>>,

    /// Structural equality consulted for truthy stored values
    equals: EqualsFn<V>,
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: PartialEq + 'static,
{
    /// Create an empty map using `PartialEq` to detect unchanged writes.
    pub fn new() -> Self {
        Self::with_equals(default_equals)
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equals(capacity, default_equals)
    }

    /// Create a map seeded with `entries`.
    ///
    /// Seeding is silent: no events are published and no equality check runs.
    /// A repeated key keeps its first position and its last value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.load(entries);
        map
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    /// Create an empty map with a custom equality function.
    ///
    /// `equals` is only consulted when the stored value is truthy.
    pub fn with_equals(equals: EqualsFn<V>) -> Self {
        Self {
            data: OrderedEntries::new(),
            events: Subject::new(),
            equals,
        }
    }

    /// Create an empty map with room for `capacity` entries and a custom
    /// equality function.
    pub fn with_capacity_and_equals(capacity: usize, equals: EqualsFn<V>) -> Self {
        Self {
            data: OrderedEntries::with_capacity(capacity),
            events: Subject::new(),
            equals,
        }
    }

    fn load<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.data.insert(key, value);
        }
    }

    fn emit(&self, event: MapEvent<K, V>) {
        let kind = event.kind();
        let observers = self.events.publish(&event);
        tracing::trace!(%kind, observers, "published map event");
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns true if `key` has an entry, whatever its value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(key)
    }

    /// Alias for [`contains_key`](Self::contains_key).
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(key)
    }

    /// The value stored under `key`, or `None` when there is no entry.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get(key)
    }

    /// The stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get_key_value(key)
    }

    /// The oldest entry still present.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.data.first()
    }

    /// The most recently added entry.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.data.last()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.data.iter())
    }

    /// Values in insertion order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.data.iter())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.data.iter()
    }

    /// Same as [`entries`](Self::entries).
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.data.iter()
    }

    /// Call `visitor(value, key)` once per entry, in insertion order.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in self.data.iter() {
            visitor(value, key);
        }
    }

    // =========================================================================
    // EVENT STREAMS
    // =========================================================================

    /// Every event, in publication order.
    pub fn on_event(&self) -> EventStream<MapEvent<K, V>> {
        self.events.stream()
    }

    /// Only [`MapEventKind::Added`] events.
    pub fn on_added(&self) -> EventStream<MapEvent<K, V>> {
        self.on_event().filter(MapEvent::is_added)
    }

    /// Only [`MapEventKind::Removed`] events.
    pub fn on_removed(&self) -> EventStream<MapEvent<K, V>> {
        self.on_event().filter(MapEvent::is_removed)
    }

    /// Only [`MapEventKind::Changed`] events.
    pub fn on_changed(&self) -> EventStream<MapEvent<K, V>> {
        self.on_event().filter(MapEvent::is_changed)
    }

    /// Live subscriptions across all four streams.
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    // =========================================================================
    // CLEAR
    // =========================================================================

    /// Remove every entry, then publish one `Removed` event per entry in
    /// insertion order.
    ///
    /// Unlike [`delete`](Self::delete), falsy values are reported too.
    pub fn clear(&mut self) {
        let removed = self.data.take_all();
        if removed.is_empty() {
            return;
        }

        tracing::debug!(entries = removed.len(), "cleared map");
        for (key, value) in removed {
            self.emit(MapEvent::removed(key, value));
        }
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Truthy + 'static,
{
    // =========================================================================
    // DELETE
    // =========================================================================

    /// Remove `key`. Returns whether an entry was removed.
    ///
    /// A `Removed` event carrying the old value is published only when that
    /// value is truthy; falsy values disappear without an event.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some((key, value)) = self.data.remove(key) else {
            return false;
        };

        if value.is_truthy() {
            self.emit(MapEvent::removed(key, value));
        } else {
            tracing::debug!("deleted falsy value without publishing");
        }
        true
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + Truthy + 'static,
{
    // =========================================================================
    // SET
    // =========================================================================

    /// Store `value` under `key` and publish `Added` or `Changed`.
    ///
    /// Nothing happens when the stored value is truthy and equal to `value`.
    /// The event kind follows the stored value's truthiness: replacing a
    /// truthy value is `Changed`, while writing over a falsy one (or a
    /// missing key) is `Added`. A replaced value keeps its key's original
    /// position.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        let kind = match self.data.get(&key) {
            None => Some(MapEventKind::Added),
            Some(existing) if !existing.is_truthy() => Some(MapEventKind::Added),
            Some(existing) if is_noop_write(existing, &value, self.equals) => None,
            Some(_) => Some(MapEventKind::Changed),
        };

        let Some(kind) = kind else {
            tracing::debug!("set skipped: value unchanged");
            return self;
        };

        self.data.insert(key.clone(), value.clone());
        self.emit(MapEvent::new(kind, key, value));
        self
    }
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

impl<K, V> Default for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    /// Same entries and equality, fresh channel with no subscribers.
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            events: Subject::new(),
            equals: self.equals,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: PartialEq + 'static,
{
    /// Silent, like [`ObservableMap::from_entries`].
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: PartialEq + 'static,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_entries(entries)
    }
}

impl<K, V> Extend<(K, V)> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + Truthy + 'static,
{
    /// Goes through [`set`](ObservableMap::set), so extending publishes.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<K, V> fmt::Debug for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
