#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Value-semantic type erasure for values paired with pluggable strategies.
//!
//! ## Overview
//!
//! This crate lets you store a value of any concrete type together with a
//! strategy that knows how to act on it, behind one uniform handle. The
//! handle hides both concrete types, yet keeps value semantics: it owns its
//! contents, cloning it deep-copies them, and dropping it releases them.
//!
//! Unlike `dyn Trait` objects, the erased handle pairs *two* independently
//! varying types. The value type and the strategy type can be combined
//! freely, and neither needs to know about the other ahead of time. New
//! value types and new strategies can be added without touching existing
//! code.
//!
//! ## Quick Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use stratagem::prelude::*;
//!
//! let out = Rc::new(RefCell::new(String::new()));
//!
//! let mut actions = Actions::new();
//! actions.push(Action::new(2.3, Recorder::new("circle", out.clone())));
//! actions.push(Action::new(1.2, Recorder::new("square", out.clone())));
//! actions.push(Action::new(4.1, Recorder::new("circle", out.clone())));
//! actions.invoke_all();
//!
//! assert_eq!(*out.borrow(), "circle(2.3)\nsquare(1.2)\ncircle(4.1)\n");
//! ```
//!
//! ## Core Concepts
//!
//! The crate revolves around three handle types and one trait:
//!
//! - [`Strategy<V>`]: the capability contract. A strategy is any type that
//!   knows how to act on a shared reference to a `V`. Closures of the shape
//!   `Fn(&V)` are strategies automatically.
//! - [`Action`]: the owning handle. Created from any `(value, strategy)`
//!   pair, it stores both by value in a single allocation and dispatches
//!   through a hand-rolled vtable. [`Action::invoke`] runs the strategy
//!   against the value. `Clone` produces a fully independent deep copy.
//! - [`ActionRef`]: a copyable borrowed handle to an [`Action`], for
//!   passing erased actions around without transferring ownership.
//! - [`ActionView`]: the non-owning handle. It borrows a value and a
//!   strategy that live elsewhere and erases their types without any
//!   allocation. The borrow is tracked in its lifetime parameter, so a view
//!   can never outlive its referents.
//! - [`Actions`]: an ordered collection of owned actions with a driver,
//!   [`Actions::invoke_all`], that invokes them in insertion order.
//!
//! ## Owning vs. Non-owning
//!
//! [`Action`] copies its inputs into the erased cell. Use it whenever the
//! actions must outlive the scope that created them, such as storing them
//! in an [`Actions`] collection that is returned from a function.
//!
//! [`ActionView`] instead aliases caller-owned storage. Use it for
//! transient dispatch over values you already hold, when the extra
//! allocation and the `Clone` requirement of the owning handle are
//! unwanted:
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use stratagem::prelude::*;
//!
//! let out = Rc::new(RefCell::new(String::new()));
//! let recorder = Recorder::new("circle", out.clone());
//!
//! let radius = 3.5;
//! let view = ActionView::new(&radius, &recorder);
//! view.invoke();
//!
//! assert_eq!(*out.borrow(), "circle(3.5)\n");
//! ```
//!
//! Because the view borrows its referents, using it after they are gone is
//! a compile error rather than undefined behavior.
//!
//! ## Inspecting Erased Actions
//!
//! Erasure is not a one-way street. Every owned or borrowed action exposes
//! the [`TypeId`]s and type names of its stored value and strategy, and can
//! be downcast back to the concrete pair when you know (or want to test
//! for) the actual types. See [`Action::downcast_value`] and
//! [`Action::downcast_strategy`].
//!
//! ## `no_std` Support
//!
//! The crate is `no_std` compatible and only requires `alloc`.
//!
//! [`Strategy<V>`]: crate::Strategy
//! [`TypeId`]: core::any::TypeId

extern crate alloc;

pub mod action;
pub mod actions;
pub mod prelude;
pub mod strategies;

pub use stratagem_internals::strategy::Strategy;

pub use crate::{
    action::{Action, ActionRef, ActionView},
    actions::Actions,
};
