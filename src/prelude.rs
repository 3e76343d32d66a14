//! Commonly used items for convenient importing.
//!
//! The prelude re-exports the most frequently used types and traits from
//! the stratagem library, so that a single use statement covers typical
//! usage.
//!
//! # Usage
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use stratagem::prelude::*;
//!
//! let out = Rc::new(RefCell::new(String::new()));
//!
//! let mut actions = Actions::new();
//! actions.push(Action::new(3.14, Recorder::new("circle", out.clone())));
//! actions.invoke_all();
//!
//! assert_eq!(*out.borrow(), "circle(3.14)\n");
//! ```
//!
//! # What's Included
//!
//! - **[`Action`]**, **[`ActionRef`]**, **[`ActionView`]**: the owning,
//!   borrowed, and non-owning erased handles
//! - **[`Actions`]**: the ordered collection with its driver
//! - **[`Strategy`]**: the capability trait for custom strategies
//! - **[`Recorder`]** and **[`Sink`]**: the built-in recording strategy and
//!   its output capability

pub use crate::{
    Action, ActionRef, ActionView, Actions, Strategy,
    strategies::{Recorder, Sink},
};
