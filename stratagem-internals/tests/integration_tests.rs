//! Integration tests for the stratagem-internals crate functionality.
//!
//! This test suite exercises the raw, type-erased layer directly:
//!
//! - Action creation, type checking, and downcasting
//! - Strategy dispatch through the vtable for both named strategy types and
//!   closures
//! - Deep cloning with full independence between the original and the copy
//! - Drop behavior, verifying that every value and strategy is dropped
//!   exactly once
//! - Borrowed views over caller-owned values and strategies
//! - TypeId consistency across vtable operations

use std::{any::TypeId, cell::RefCell, fmt, rc::Rc};

use stratagem_internals::{RawAction, RawActionView, strategy::Strategy};

// Test data structures

#[derive(Clone, Debug, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Square {
    side: f64,
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circle with radius {}", self.radius)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "square with side {}", self.side)
    }
}

// Test strategies

/// Strategy that appends a rendering of the value to a shared log.
#[derive(Clone)]
struct LogStrategy {
    log: Rc<RefCell<Vec<String>>>,
}

impl<V: fmt::Display + 'static> Strategy<V> for LogStrategy {
    fn apply(&self, value: &V) {
        self.log.borrow_mut().push(value.to_string());
    }
}

/// Strategy that counts how many times it has been applied.
#[derive(Clone)]
struct CountStrategy {
    count: Rc<RefCell<u32>>,
}

impl<V: 'static> Strategy<V> for CountStrategy {
    fn apply(&self, _value: &V) {
        *self.count.borrow_mut() += 1;
    }
}

/// Value whose clones and drops are recorded in a shared log.
struct Tracked {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.log.borrow_mut().push(format!("cloned {}", self.name));
        Self {
            name: self.name,
            log: self.log.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.borrow_mut().push(format!("dropped {}", self.name));
    }
}

fn new_log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_action_creation_and_basic_operations() {
    let log = new_log();
    let action = RawAction::new(Circle { radius: 2.0 }, LogStrategy { log: log.clone() });
    let action_ref = action.as_ref();

    assert_eq!(action_ref.value_type_id(), TypeId::of::<Circle>());
    assert_eq!(action_ref.strategy_type_id(), TypeId::of::<LogStrategy>());
    assert!(action_ref.value_type_name().contains("Circle"));
    assert!(action_ref.strategy_type_name().contains("LogStrategy"));

    action_ref.apply();
    assert_eq!(&*log.borrow(), &["circle with radius 2"]);
}

#[test]
fn test_action_downcast() {
    let log = new_log();
    let action = RawAction::new(Square { side: 4.0 }, LogStrategy { log });
    let action_ref = action.as_ref();

    // SAFETY: The action was created with exactly these types
    let value = unsafe { action_ref.value_downcast_unchecked::<Square, LogStrategy>() };
    assert_eq!(value, &Square { side: 4.0 });

    // SAFETY: The action was created with exactly these types
    let strategy = unsafe { action_ref.strategy_downcast_unchecked::<Square, LogStrategy>() };
    strategy.apply(value);
}

#[test]
fn test_closure_strategy() {
    let count = Rc::new(RefCell::new(0_u32));
    let count_clone = count.clone();
    let action = RawAction::new(Circle { radius: 1.0 }, move |_c: &Circle| {
        *count_clone.borrow_mut() += 1;
    });

    action.as_ref().apply();
    action.as_ref().apply();
    action.as_ref().apply();

    assert_eq!(*count.borrow(), 3);
}

#[test]
fn test_multiple_actions_with_different_types() {
    let log = new_log();
    let count = Rc::new(RefCell::new(0_u32));

    let actions = vec![
        RawAction::new(Circle { radius: 1.5 }, LogStrategy { log: log.clone() }),
        RawAction::new(Square { side: 2.5 }, LogStrategy { log: log.clone() }),
        RawAction::new(
            Circle { radius: 3.5 },
            CountStrategy {
                count: count.clone(),
            },
        ),
    ];

    for action in &actions {
        action.as_ref().apply();
    }

    assert_eq!(
        &*log.borrow(),
        &["circle with radius 1.5", "square with side 2.5"]
    );
    assert_eq!(*count.borrow(), 1);

    // Same strategy type over different value types produces different
    // vtables, so the type ids must disagree on the value side only
    let first = actions[0].as_ref();
    let second = actions[1].as_ref();
    assert_ne!(first.value_type_id(), second.value_type_id());
    assert_eq!(first.strategy_type_id(), second.strategy_type_id());
}

#[test]
fn test_clone_produces_independent_action() {
    let log = new_log();
    let original = RawAction::new(
        Tracked {
            name: "original",
            log: log.clone(),
        },
        CountStrategy {
            count: Rc::new(RefCell::new(0)),
        },
    );

    let copy = original.as_ref().clone_action();
    assert_eq!(&*log.borrow(), &["cloned original"]);

    // Dropping the original must not invalidate the copy
    drop(original);
    assert_eq!(&*log.borrow(), &["cloned original", "dropped original"]);

    assert_eq!(copy.as_ref().value_type_id(), TypeId::of::<Tracked>());
    copy.as_ref().apply();
}

#[test]
fn test_clone_preserves_types_and_vtable() {
    let count = Rc::new(RefCell::new(0_u32));
    let original = RawAction::new(
        Circle { radius: 7.0 },
        CountStrategy {
            count: count.clone(),
        },
    );
    let copy = original.as_ref().clone_action();

    assert_eq!(
        original.as_ref().value_type_id(),
        copy.as_ref().value_type_id()
    );
    assert_eq!(
        original.as_ref().strategy_type_id(),
        copy.as_ref().strategy_type_id()
    );
    assert_eq!(
        original.as_ref().value_type_name(),
        copy.as_ref().value_type_name()
    );

    original.as_ref().apply();
    copy.as_ref().apply();
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn test_drop_behavior() {
    let log = new_log();

    let action = RawAction::new(
        Tracked {
            name: "value",
            log: log.clone(),
        },
        CountStrategy {
            count: Rc::new(RefCell::new(0)),
        },
    );
    assert!(log.borrow().is_empty());

    drop(action);
    assert_eq!(&*log.borrow(), &["dropped value"]);
}

#[test]
fn test_clone_and_drop_exactly_once() {
    let log = new_log();

    let original = RawAction::new(
        Tracked {
            name: "v",
            log: log.clone(),
        },
        CountStrategy {
            count: Rc::new(RefCell::new(0)),
        },
    );
    let copy1 = original.as_ref().clone_action();
    let copy2 = copy1.as_ref().clone_action();

    drop(copy1);
    drop(original);
    drop(copy2);

    let events = log.borrow();
    assert_eq!(events.iter().filter(|e| *e == "cloned v").count(), 2);
    assert_eq!(events.iter().filter(|e| *e == "dropped v").count(), 3);
}

#[test]
fn test_view_applies_without_owning() {
    let log = new_log();
    let circle = Circle { radius: 5.0 };
    let strategy = LogStrategy { log: log.clone() };

    let view = RawActionView::new(&circle, &strategy);
    view.apply();
    view.apply();

    assert_eq!(&*log.borrow(), &["circle with radius 5", "circle with radius 5"]);

    // The referents are untouched afterwards
    assert_eq!(circle, Circle { radius: 5.0 });
}

#[test]
fn test_view_copies_share_referents() {
    let count = Rc::new(RefCell::new(0_u32));
    let square = Square { side: 1.0 };
    let strategy = CountStrategy {
        count: count.clone(),
    };

    let view = RawActionView::new(&square, &strategy);
    let copies = [view, view, view];
    for copy in copies {
        copy.apply();
    }

    assert_eq!(*count.borrow(), 3);
}

#[test]
fn test_views_over_collection_of_locals() {
    let log = new_log();
    let strategy = LogStrategy { log: log.clone() };

    let circle = Circle { radius: 1.0 };
    let square = Square { side: 2.0 };

    let views = vec![
        RawActionView::new(&circle, &strategy),
        RawActionView::new(&square, &strategy),
        RawActionView::new(&circle, &strategy),
    ];
    for view in views {
        view.apply();
    }

    assert_eq!(
        &*log.borrow(),
        &[
            "circle with radius 1",
            "square with side 2",
            "circle with radius 1"
        ]
    );
}

#[test]
fn test_type_id_consistency() {
    let log = new_log();
    let action = RawAction::new(Circle { radius: 0.5 }, LogStrategy { log });

    // Type ids must stay stable across repeated queries and across refs
    let id1 = action.as_ref().value_type_id();
    let id2 = action.as_ref().value_type_id();
    assert_eq!(id1, id2);
    assert_eq!(id1, TypeId::of::<Circle>());

    let sid1 = action.as_ref().strategy_type_id();
    let sid2 = action.as_ref().strategy_type_id();
    assert_eq!(sid1, sid2);
    assert_ne!(id1, sid1);
}
