// ============================================================================
// observable-map - Subject (synchronous broadcast channel)
//
// A callback list with multicast fan-out. Every value published is handed,
// in publication order, to every subscription registered at the moment the
// publication starts. Derived streams filter on the way out but share the
// same subscriber list, so one publication reaches all views in subscription
// order.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::types::{ObserverFn, PredicateFn, SubscriberId};

// =============================================================================
// SUBSCRIBER LIST
// =============================================================================

struct SubscriberEntry<T> {
    id: SubscriberId,
    observer: ObserverFn<T>,
}

struct SubjectInner<T> {
    next_id: SubscriberId,
    subscribers: Vec<SubscriberEntry<T>>,
}

impl<T> SubjectInner<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            subscribers: Vec::new(),
        }
    }
}

/// Type-erased view of a subscriber list, so `Subscription` is not generic.
trait SubscriberList {
    fn remove(&self, id: SubscriberId) -> bool;
    fn contains(&self, id: SubscriberId) -> bool;
}

impl<T> SubscriberList for RefCell<SubjectInner<T>> {
    fn remove(&self, id: SubscriberId) -> bool {
        let mut inner = self.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|entry| entry.id != id);
        let removed = inner.subscribers.len() != before;
        if removed {
            tracing::trace!(subscriber = id, "unsubscribed");
        }
        removed
    }

    fn contains(&self, id: SubscriberId) -> bool {
        self.borrow().subscribers.iter().any(|entry| entry.id == id)
    }
}

// =============================================================================
// SUBJECT
// =============================================================================

/// The publishing end of a broadcast channel.
///
/// Only the owner of a `Subject` can publish. Everyone else observes through
/// an [`EventStream`] obtained from [`Subject::stream`].
///
/// # Example
///
/// ```
/// use observable_map::Subject;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let subject: Subject<i32> = Subject::new();
/// let evens = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = evens.clone();
/// let _sub = subject
///     .stream()
///     .filter(|n| n % 2 == 0)
///     .subscribe(move |n| sink.borrow_mut().push(*n));
///
/// for n in 1..=4 {
///     subject.publish(&n);
/// }
/// assert_eq!(*evens.borrow(), vec![2, 4]);
/// ```
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner::new())),
        }
    }

    /// An unfiltered stream over everything this subject publishes.
    pub fn stream(&self) -> EventStream<T> {
        EventStream {
            source: self.inner.clone(),
            predicate: None,
        }
    }

    /// Deliver `value` to every current subscription, in subscription order.
    ///
    /// The subscriber list is snapshotted first: observers may subscribe or
    /// unsubscribe from inside their callback, and those changes take effect
    /// from the next publication. Returns the number of subscriptions the
    /// value was dispatched to (filtered streams count even when their
    /// predicate rejects the value).
    pub fn publish(&self, value: &T) -> usize {
        let observers: Vec<ObserverFn<T>> = {
            let inner = self.inner.borrow();
            if inner.subscribers.is_empty() {
                return 0;
            }
            inner
                .subscribers
                .iter()
                .map(|entry| entry.observer.clone())
                .collect()
        };

        for observer in &observers {
            observer(value);
        }

        observers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("subscribers", &self.inner.borrow().subscribers.len())
            .finish()
    }
}

// =============================================================================
// EVENT STREAM
// =============================================================================

/// A read-only, possibly filtered view of a [`Subject`].
///
/// Streams are cheap handles: cloning one, or deriving a new one with
/// [`filter`](EventStream::filter), never duplicates publications. There is
/// no replay; a subscription only sees values published after it was made.
pub struct EventStream<T> {
    source: Rc<RefCell<SubjectInner<T>>>,
    predicate: Option<PredicateFn<T>>,
}

impl<T: 'static> EventStream<T> {
    /// Register `observer`. It runs inline, inside `publish`, for every
    /// value that passes this stream's filters.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let observer: ObserverFn<T> = match &self.predicate {
            Some(predicate) => {
                let predicate = predicate.clone();
                Rc::new(move |value: &T| {
                    if predicate(value) {
                        observer(value);
                    }
                })
            }
            None => Rc::new(observer),
        };

        let id = {
            let mut inner = self.source.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push(SubscriberEntry { id, observer });
            id
        };
        tracing::trace!(subscriber = id, "subscribed");

        let weak: Weak<RefCell<SubjectInner<T>>> = Rc::downgrade(&self.source);
        let source: Weak<dyn SubscriberList> = weak;
        Subscription {
            id,
            source: Some(source),
        }
    }

    /// Derive a stream that only delivers values matching `predicate`.
    /// Filters compose: the result also applies this stream's filter.
    pub fn filter<P>(&self, predicate: P) -> EventStream<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let predicate: PredicateFn<T> = match &self.predicate {
            Some(outer) => {
                let outer = outer.clone();
                Rc::new(move |value: &T| outer(value) && predicate(value))
            }
            None => Rc::new(predicate),
        };
        EventStream {
            source: self.source.clone(),
            predicate: Some(predicate),
        }
    }

    /// Subscriptions on the underlying subject, across all derived streams.
    pub fn subscriber_count(&self) -> usize {
        self.source.borrow().subscribers.len()
    }
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("filtered", &self.predicate.is_some())
            .finish()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for one registered observer.
///
/// Dropping the handle unsubscribes. Use [`detach`](Subscription::detach) to
/// keep the observer for as long as the channel lives.
#[must_use = "dropping a Subscription immediately unsubscribes its observer"]
pub struct Subscription {
    id: SubscriberId,
    source: Option<Weak<dyn SubscriberList>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// True while the observer is registered and its channel is alive.
    pub fn is_active(&self) -> bool {
        self.source
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|list| list.contains(self.id))
    }

    /// Stop delivery. Returns false if the observer was already gone.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    /// Give up the handle without unsubscribing.
    pub fn detach(mut self) {
        self.source = None;
    }

    fn release(&mut self) -> bool {
        match self.source.take().and_then(|weak| weak.upgrade()) {
            Some(list) => list.remove(self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
