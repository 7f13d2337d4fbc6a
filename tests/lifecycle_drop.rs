use observable_map::{MapEvent, ObservableMap, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn counter(map: &ObservableMap<&'static str, i32>) -> (Rc<Cell<usize>>, Subscription) {
    let count = Rc::new(Cell::new(0));
    let count_clone = count.clone();
    let sub = map
        .on_event()
        .subscribe(move |_| count_clone.set(count_clone.get() + 1));
    (count, sub)
}

#[test]
fn test_subscription_drop_stops_delivery() {
    let mut map: ObservableMap<&str, i32> = ObservableMap::new();
    let count = Rc::new(Cell::new(0));

    {
        let count_clone = count.clone();
        let _sub = map
            .on_added()
            .subscribe(move |_| count_clone.set(count_clone.get() + 1));

        map.set("a", 1);
        assert_eq!(count.get(), 1);
        // _sub drops here
    }

    map.set("b", 2);
    assert_eq!(count.get(), 1, "Observer should not run after its subscription drops");
    assert_eq!(map.subscriber_count(), 0);
}

#[test]
fn test_detached_subscription_survives_handle() {
    let mut map: ObservableMap<&str, i32> = ObservableMap::new();
    let count = Rc::new(Cell::new(0));

    let count_clone = count.clone();
    map.on_event()
        .subscribe(move |_| count_clone.set(count_clone.get() + 1))
        .detach();

    map.set("a", 1).set("b", 2);
    assert_eq!(count.get(), 2);
    assert_eq!(map.subscriber_count(), 1);
}

#[test]
fn test_subscription_outlives_map() {
    let map: ObservableMap<&str, i32> = ObservableMap::new();
    let (_count, sub) = counter(&map);
    assert!(sub.is_active());

    drop(map);

    assert!(!sub.is_active(), "Subscription should go inert with its map");
    assert!(!sub.unsubscribe());
}

#[test]
fn test_stream_outlives_map() {
    let map: ObservableMap<&str, i32> = ObservableMap::new();
    let stream = map.on_removed();
    drop(map);

    // Subscribing to an orphaned stream is allowed; nothing will ever publish.
    let sub = stream.subscribe(|_| panic!("no publisher is left"));
    assert!(sub.is_active());
}

#[test]
fn test_unsubscribe_one_of_many() {
    let mut map: ObservableMap<&str, i32> = ObservableMap::new();
    let (first, first_sub) = counter(&map);
    let (second, _second_sub) = counter(&map);

    map.set("a", 1);
    assert!(first_sub.unsubscribe());
    map.set("b", 2);

    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 2);
}

#[test]
fn test_observer_unsubscribes_itself_after_first_event() {
    let mut map: ObservableMap<&str, i32> = ObservableMap::new();
    let seen: Rc<RefCell<Vec<MapEvent<&str, i32>>>> = Rc::new(RefCell::new(Vec::new()));
    let own_handle: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let seen_clone = seen.clone();
    let handle_clone = own_handle.clone();
    let sub = map.on_event().subscribe(move |event| {
        seen_clone.borrow_mut().push(event.clone());
        let taken = handle_clone.borrow_mut().take();
        if let Some(sub) = taken {
            sub.unsubscribe();
        }
    });
    *own_handle.borrow_mut() = Some(sub);

    map.set("a", 1).set("b", 2);
    map.clear();

    assert_eq!(*seen.borrow(), vec![MapEvent::added("a", 1)]);
    assert_eq!(map.subscriber_count(), 0);
}
