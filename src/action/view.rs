use stratagem_internals::{RawActionView, strategy::Strategy};

/// A non-owning, type-erased pairing of a value with a strategy.
///
/// An [`ActionView`] aliases a value and a strategy that live elsewhere,
/// erasing their types without allocating or copying anything. It is the
/// right tool for transient dispatch over data the caller already owns,
/// where the owning [`Action`] would force a `Clone` bound and a heap
/// allocation.
///
/// The lifetime parameter ties the view to both referents. A view can
/// therefore never observe a value or strategy after it has been dropped
/// or moved; such code is rejected at compile time:
///
/// ```compile_fail,E0597
/// use stratagem::ActionView;
///
/// let strategy = |_: &f64| {};
/// let view = {
///     let radius = 3.5;
///     ActionView::new(&radius, &strategy)
///     // `radius` is dropped here while still borrowed
/// };
/// view.invoke();
/// ```
///
/// Copying the view is a shallow pointer copy. All copies refer to the
/// same underlying value and strategy.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use stratagem::{ActionView, strategies::Recorder};
///
/// let out = Rc::new(RefCell::new(String::new()));
/// let recorder = Recorder::new("square", out.clone());
///
/// let side = 1.2;
/// let view = ActionView::new(&side, &recorder);
/// view.invoke();
///
/// assert_eq!(*out.borrow(), "square(1.2)\n");
/// ```
///
/// Because views are `Copy` and borrow their referents, a whole batch of
/// them can be built over locals and dispatched uniformly:
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use stratagem::{ActionView, strategies::Recorder};
///
/// let out = Rc::new(RefCell::new(String::new()));
/// let recorder = Recorder::new("circle", out.clone());
///
/// let small = 1.0;
/// let large = 9.0;
/// let views = vec![
///     ActionView::new(&small, &recorder),
///     ActionView::new(&large, &recorder),
/// ];
/// for view in views {
///     view.invoke();
/// }
///
/// assert_eq!(*out.borrow(), "circle(1)\ncircle(9)\n");
/// ```
///
/// [`Action`]: crate::Action
#[derive(Clone, Copy)]
pub struct ActionView<'a> {
    raw: RawActionView<'a>,
}

impl<'a> ActionView<'a> {
    /// Creates a new [`ActionView`] borrowing the given value and strategy.
    ///
    /// No allocation takes place. Unlike [`Action::new`], neither referent
    /// needs to implement [`Clone`], because the view never copies them.
    ///
    /// [`Action::new`]: crate::Action::new
    #[must_use]
    pub fn new<V, S>(value: &'a V, strategy: &'a S) -> Self
    where
        V: 'static,
        S: Strategy<V>,
    {
        Self {
            raw: RawActionView::new(value, strategy),
        }
    }

    /// Runs the borrowed strategy against the borrowed value.
    pub fn invoke(self) {
        self.raw.apply();
    }
}

impl core::fmt::Debug for ActionView<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionView").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, string::String};
    use core::cell::RefCell;

    use super::*;
    use crate::strategies::Recorder;

    #[test]
    fn test_view_send_sync() {
        static_assertions::assert_not_impl_any!(ActionView<'static>: Send, Sync);
    }

    #[test]
    fn test_view_copy_clone() {
        static_assertions::assert_impl_all!(ActionView<'static>: Copy, Clone);
    }

    #[test]
    fn test_view_does_not_consume_referents() {
        let out = Rc::new(RefCell::new(String::new()));
        let recorder = Recorder::new("circle", out.clone());
        let radius = 4.1;

        {
            let view = ActionView::new(&radius, &recorder);
            view.invoke();
        }

        // Referents remain fully usable after the view is gone
        let view = ActionView::new(&radius, &recorder);
        view.invoke();

        assert_eq!(*out.borrow(), "circle(4.1)\ncircle(4.1)\n");
    }

    #[test]
    fn test_view_with_closure_strategy() {
        let hits = Rc::new(RefCell::new(0_u32));
        let hits_in_strategy = hits.clone();
        let strategy = move |_: &u8| {
            *hits_in_strategy.borrow_mut() += 1;
        };
        let value = 0_u8;

        let view = ActionView::new(&value, &strategy);
        view.invoke();
        view.invoke();

        assert_eq!(*hits.borrow(), 2);
    }
}
