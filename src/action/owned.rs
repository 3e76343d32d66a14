use core::any::TypeId;

use stratagem_internals::{RawAction, RawActionRef, strategy::Strategy};

use crate::action::ActionRef;

/// An owning, type-erased pairing of a value with a strategy.
///
/// An [`Action`] stores a value of some concrete type `V` together with a
/// strategy of some concrete type `S` in a single allocation, then forgets
/// both types. The stored strategy can be run against the stored value with
/// [`invoke`], and the concrete types can be recovered with the downcast
/// methods when needed.
///
/// The handle has value semantics: it owns its contents, [`Clone`] produces
/// a fully independent deep copy of both the value and the strategy, and
/// dropping the handle drops its contents. Assigning one action over
/// another therefore behaves like replacing one value with another, with
/// the replacement fully constructed before the old contents are released.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use stratagem::{Action, strategies::Recorder};
///
/// let out = Rc::new(RefCell::new(String::new()));
/// let action = Action::new(2.3, Recorder::new("circle", out.clone()));
///
/// action.invoke();
/// assert_eq!(*out.borrow(), "circle(2.3)\n");
/// ```
///
/// [`invoke`]: Action::invoke
pub struct Action {
    raw: RawAction,
}

impl Action {
    /// Allocates a new [`Action`] owning the given value and strategy.
    ///
    /// Both arguments are moved into the erased cell. The `Clone` bounds
    /// exist because deep copying is part of the erased interface: every
    /// action supports [`Clone`], so its contents must too.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagem::Action;
    ///
    /// // Closures taking a shared reference are strategies automatically
    /// let action = Action::new(21, |n: &i32| assert_eq!(n * 2, 42));
    /// action.invoke();
    /// ```
    #[must_use]
    pub fn new<V, S>(value: V, strategy: S) -> Self
    where
        V: Clone + 'static,
        S: Strategy<V> + Clone,
    {
        Self::from_raw(RawAction::new(value, strategy))
    }

    /// Creates a new [`Action`] from a raw action.
    #[must_use]
    pub(crate) fn from_raw(raw: RawAction) -> Self {
        Self { raw }
    }

    /// Consumes the [`Action`] and returns the inner [`RawAction`].
    #[must_use]
    pub(crate) fn into_raw(self) -> RawAction {
        self.raw
    }

    /// Creates a lifetime-bound [`RawActionRef`] to the inner [`RawAction`].
    #[must_use]
    pub(crate) fn as_raw_ref(&self) -> RawActionRef<'_> {
        self.raw.as_ref()
    }

    /// Runs the stored strategy against the stored value.
    ///
    /// Invoking an action does not consume it and leaves its contents
    /// unchanged, so the same action can be invoked any number of times.
    pub fn invoke(&self) {
        self.as_raw_ref().apply();
    }

    /// Returns a borrowed handle to this action.
    ///
    /// The returned [`ActionRef`] is [`Copy`], which makes it convenient to
    /// pass erased actions to helper functions without giving up ownership.
    #[must_use]
    pub fn as_ref(&self) -> ActionRef<'_> {
        ActionRef::from_raw(self.as_raw_ref())
    }

    /// Returns the [`TypeId`] of the stored value.
    #[must_use]
    pub fn value_type_id(&self) -> TypeId {
        self.as_raw_ref().value_type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[must_use]
    pub fn value_type_name(&self) -> &'static str {
        self.as_raw_ref().value_type_name()
    }

    /// Returns the [`TypeId`] of the stored strategy.
    #[must_use]
    pub fn strategy_type_id(&self) -> TypeId {
        self.as_raw_ref().strategy_type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored strategy.
    #[must_use]
    pub fn strategy_type_name(&self) -> &'static str {
        self.as_raw_ref().strategy_type_name()
    }

    /// Attempts to downcast the stored value to a reference of type `V`.
    ///
    /// Returns `Some(&V)` if the action stores a value of type `V` paired
    /// with a strategy of type `S`, otherwise returns `None`.
    ///
    /// Both type parameters are required because the location of the value
    /// inside the erased cell depends on the full concrete pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use stratagem::{Action, strategies::Recorder};
    ///
    /// type StringRecorder = Recorder<Rc<RefCell<String>>>;
    ///
    /// let out = Rc::new(RefCell::new(String::new()));
    /// let action = Action::new(2.5, Recorder::new("circle", out));
    ///
    /// assert_eq!(action.downcast_value::<f64, StringRecorder>(), Some(&2.5));
    /// assert_eq!(action.downcast_value::<i32, StringRecorder>(), None);
    /// ```
    #[must_use]
    pub fn downcast_value<V, S>(&self) -> Option<&V>
    where
        V: 'static,
        S: 'static,
    {
        self.as_ref().downcast_value::<V, S>()
    }

    /// Attempts to downcast the stored strategy to a reference of type `S`.
    ///
    /// Returns `Some(&S)` if the action stores a value of type `V` paired
    /// with a strategy of type `S`, otherwise returns `None`.
    ///
    /// Both type parameters are required because the location of the
    /// strategy inside the erased cell depends on the full concrete pair.
    #[must_use]
    pub fn downcast_strategy<V, S>(&self) -> Option<&S>
    where
        V: 'static,
        S: 'static,
    {
        self.as_ref().downcast_strategy::<V, S>()
    }

    /// Downcasts the stored value to a reference of type `V` without
    /// checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The action actually stores a value of type `V` paired with a
    ///    strategy of type `S` (can be verified by calling
    ///    [`value_type_id()`] and [`strategy_type_id()`] first)
    ///
    /// [`value_type_id()`]: Action::value_type_id
    /// [`strategy_type_id()`]: Action::strategy_type_id
    #[must_use]
    pub unsafe fn downcast_value_unchecked<V, S>(&self) -> &V
    where
        V: 'static,
        S: 'static,
    {
        let raw = self.as_raw_ref();

        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { raw.value_downcast_unchecked::<V, S>() }
    }

    /// Downcasts the stored strategy to a reference of type `S` without
    /// checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The action actually stores a value of type `V` paired with a
    ///    strategy of type `S` (can be verified by calling
    ///    [`value_type_id()`] and [`strategy_type_id()`] first)
    ///
    /// [`value_type_id()`]: Action::value_type_id
    /// [`strategy_type_id()`]: Action::strategy_type_id
    #[must_use]
    pub unsafe fn downcast_strategy_unchecked<V, S>(&self) -> &S
    where
        V: 'static,
        S: 'static,
    {
        let raw = self.as_raw_ref();

        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { raw.strategy_downcast_unchecked::<V, S>() }
    }
}

impl Clone for Action {
    /// Deep-copies the stored value and strategy into a new, fully
    /// independent [`Action`].
    ///
    /// Invoking the clone is behaviorally identical to invoking the
    /// original at the time of the copy. Later changes to either action's
    /// contents do not affect the other. Note that a strategy holding a
    /// shared handle (such as an [`Rc`] sink) clones the handle, so both
    /// copies keep writing to the same shared resource.
    ///
    /// [`Rc`]: alloc::rc::Rc
    fn clone(&self) -> Self {
        Self::from_raw(self.as_raw_ref().clone_action())
    }
}

impl core::fmt::Debug for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Action")
            .field("value_type", &self.value_type_name())
            .field("strategy_type", &self.strategy_type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        rc::Rc,
        string::{String, ToString},
    };
    use core::cell::RefCell;

    use super::*;
    use crate::strategies::Recorder;

    type StringRecorder = Recorder<Rc<RefCell<String>>>;

    fn new_sink() -> Rc<RefCell<String>> {
        Rc::new(RefCell::new(String::new()))
    }

    #[test]
    fn test_action_send_sync() {
        static_assertions::assert_not_impl_any!(Action: Send, Sync);
    }

    #[test]
    fn test_action_copy() {
        static_assertions::assert_not_impl_any!(Action: Copy);
        static_assertions::assert_impl_all!(Action: Clone);
    }

    #[test]
    fn test_invoke_repeatable() {
        let out = new_sink();
        let action = Action::new(1.0, Recorder::new("circle", out.clone()));

        action.invoke();
        action.invoke();

        assert_eq!(*out.borrow(), "circle(1)\ncircle(1)\n");
    }

    #[test]
    fn test_invoke_matches_direct_strategy_call() {
        use stratagem_internals::strategy::Strategy as _;

        let direct_out = new_sink();
        let erased_out = new_sink();

        Recorder::new("circle", direct_out.clone()).apply(&2.3_f64);
        Action::new(2.3_f64, Recorder::new("circle", erased_out.clone())).invoke();

        assert_eq!(*direct_out.borrow(), *erased_out.borrow());
        assert_eq!(*erased_out.borrow(), "circle(2.3)\n");
    }

    #[test]
    fn test_move_preserves_behavior() {
        let out = new_sink();
        let original = Action::new(1.2, Recorder::new("square", out.clone()));

        let moved = original;
        moved.invoke();

        assert_eq!(*out.borrow(), "square(1.2)\n");
    }

    #[test]
    fn test_introspection() {
        let out = new_sink();
        let action = Action::new(2.0_f64, Recorder::new("circle", out));

        assert_eq!(action.value_type_id(), TypeId::of::<f64>());
        assert_eq!(action.strategy_type_id(), TypeId::of::<StringRecorder>());
        assert!(action.value_type_name().contains("f64"));
        assert!(action.strategy_type_name().contains("Recorder"));
    }

    #[test]
    fn test_downcast_value() {
        let out = new_sink();
        let action = Action::new(2.5_f64, Recorder::new("circle", out));

        assert_eq!(action.downcast_value::<f64, StringRecorder>(), Some(&2.5));

        // A mismatch on either side of the pair must fail the downcast
        assert_eq!(action.downcast_value::<i32, StringRecorder>(), None);
        assert!(action.downcast_value::<f64, fn(&f64)>().is_none());
    }

    #[test]
    fn test_downcast_strategy() {
        let out = new_sink();
        let action = Action::new(2.0_f64, Recorder::new("circle", out));

        let recorder = action.downcast_strategy::<f64, StringRecorder>();
        assert_eq!(recorder.map(|r| r.label()), Some("circle"));

        assert!(action.downcast_strategy::<f64, fn(&f64)>().is_none());
    }

    #[test]
    fn test_clone_is_deep() {
        // Two clones with separate sinks would defeat the purpose of the
        // test, so track independence through the stored value instead
        let out = new_sink();
        let original = Action::new("a".to_string(), Recorder::new("label", out.clone()));
        let copy = original.clone();
        drop(original);

        // The copy owns its own value and strategy
        copy.invoke();
        assert_eq!(*out.borrow(), "label(a)\n");
        assert_eq!(
            copy.downcast_value::<String, StringRecorder>(),
            Some(&"a".to_string())
        );
    }

    #[test]
    fn test_copy_assignment_semantics() {
        let out = new_sink();
        let source = Action::new(1.5, Recorder::new("circle", out.clone()));
        let mut target = Action::new(9.9, Recorder::new("square", out.clone()));
        target.invoke();

        target = source.clone();
        target.invoke();
        source.invoke();

        assert_eq!(*out.borrow(), "square(9.9)\ncircle(1.5)\ncircle(1.5)\n");
    }

    #[test]
    fn test_debug_output() {
        let out = new_sink();
        let action = Action::new(1_u8, Recorder::new("x", out));
        let rendered = alloc::format!("{action:?}");

        assert!(rendered.contains("Action"));
        assert!(rendered.contains("u8"));
        assert!(rendered.contains("Recorder"));
    }
}
