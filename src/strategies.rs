//! Built-in strategies and the sink capability.
//!
//! This module provides ready-made strategies for the common case of
//! rendering values into an output buffer, along with the [`Sink`] trait
//! they write through. Custom strategies implement [`Strategy`] directly or
//! use plain closures; nothing here is privileged.
//!
//! [`Strategy`]: crate::Strategy

use alloc::{format, rc::Rc, string::String};
use core::{cell::RefCell, fmt};

use stratagem_internals::strategy::Strategy;

/// Trait for destinations that strategies can append text to.
///
/// Sinks take `&self`, so a single sink can be shared between many
/// strategies. The provided implementations cover the usual single-threaded
/// sharing setup: an interior-mutable buffer, optionally behind an [`Rc`]
/// handle.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
///
/// use stratagem::strategies::Sink;
///
/// let out = RefCell::new(String::new());
/// out.record("hello ");
/// out.record("world");
/// assert_eq!(*out.borrow(), "hello world");
/// ```
pub trait Sink {
    /// Appends the given text to the sink.
    fn record(&self, text: &str);
}

impl Sink for RefCell<String> {
    fn record(&self, text: &str) {
        self.borrow_mut().push_str(text);
    }
}

impl<S: Sink + ?Sized> Sink for Rc<S> {
    fn record(&self, text: &str) {
        (**self).record(text);
    }
}

/// Strategy that renders a labeled line for any displayable value.
///
/// For a value `v` and label `label`, each invocation appends
/// `label(v)\n` to the sink, with `v` rendered through its [`Display`]
/// implementation.
///
/// Cloning a [`Recorder`] clones its sink handle. For an [`Rc`]-backed
/// sink this means both copies keep writing to the same buffer, which is
/// the usual arrangement when many actions share one output.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use stratagem::{Action, strategies::Recorder};
///
/// let out = Rc::new(RefCell::new(String::new()));
/// let action = Action::new(3.14, Recorder::new("circle", out.clone()));
///
/// action.invoke();
/// assert_eq!(*out.borrow(), "circle(3.14)\n");
/// ```
///
/// [`Display`]: core::fmt::Display
/// [`Rc`]: alloc::rc::Rc
#[derive(Clone)]
pub struct Recorder<Si> {
    label: String,
    sink: Si,
}

impl<Si: Sink> Recorder<Si> {
    /// Creates a new [`Recorder`] writing lines tagged with `label` into
    /// `sink`.
    #[must_use]
    pub fn new(label: impl Into<String>, sink: Si) -> Self {
        Self {
            label: label.into(),
            sink,
        }
    }

    /// Returns the label this recorder tags its lines with.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<V, Si> Strategy<V> for Recorder<Si>
where
    V: fmt::Display + 'static,
    Si: Sink + 'static,
{
    fn apply(&self, value: &V) {
        self.sink.record(&format!("{}({value})\n", self.label));
    }
}
