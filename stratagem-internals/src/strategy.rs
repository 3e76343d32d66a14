//! The capability contract between values and strategies.
//!
//! A strategy is an independently-supplied implementation of a single
//! operation over a value, decoupled from the value's type. The erased
//! handles in this crate pair one value with one strategy and dispatch
//! [`Strategy::apply`] through a vtable entry bound to the concrete pair.

/// Trait for types that can act on a value of type `V`.
///
/// A strategy receives the value by shared reference and performs a side
/// effect, typically formatting the value and appending the result to some
/// output sink. Strategies may be stateless, or may hold a handle to an
/// external resource (such as a shared sink); that resource's lifetime is
/// the strategy's own concern.
///
/// Any closure of the form `Fn(&V)` is a strategy via the blanket impl, so
/// ad-hoc strategies need no named type:
///
/// ```
/// use stratagem_internals::strategy::Strategy;
///
/// struct Circle {
///     radius: f64,
/// }
///
/// let print_radius = |c: &Circle| {
///     assert_eq!(c.radius, 2.3);
/// };
/// print_radius.apply(&Circle { radius: 2.3 });
/// ```
///
/// Stateful strategies implement the trait directly:
///
/// ```
/// use core::cell::RefCell;
///
/// use stratagem_internals::strategy::Strategy;
///
/// struct CountCalls {
///     calls: RefCell<u32>,
/// }
///
/// impl Strategy<i32> for CountCalls {
///     fn apply(&self, _value: &i32) {
///         *self.calls.borrow_mut() += 1;
///     }
/// }
///
/// let counter = CountCalls {
///     calls: RefCell::new(0),
/// };
/// counter.apply(&7);
/// counter.apply(&7);
/// assert_eq!(*counter.calls.borrow(), 2);
/// ```
pub trait Strategy<V>: 'static {
    /// Applies the strategy to the value.
    ///
    /// Must not alter the identity of either side: repeated invocations on
    /// the same pair observe the same value and the same strategy state
    /// (modulo interior mutability the strategy itself opts into).
    fn apply(&self, value: &V);
}

impl<V, F> Strategy<V> for F
where
    F: Fn(&V) + 'static,
{
    fn apply(&self, value: &V) {
        self(value)
    }
}
