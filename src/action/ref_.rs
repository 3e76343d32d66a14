use core::any::TypeId;

use stratagem_internals::RawActionRef;

/// A borrowed handle to an [`Action`].
///
/// An [`ActionRef`] grants the same read-only access to the erased pair as
/// the [`Action`] it borrows from: it can invoke the strategy, inspect the
/// stored types, and downcast. Unlike the owning handle it is [`Copy`], so
/// it can be passed around freely without transferring ownership.
///
/// # Examples
///
/// ```
/// use stratagem::{Action, ActionRef};
///
/// fn invoke_twice(action: ActionRef<'_>) {
///     action.invoke();
///     action.invoke();
/// }
///
/// let action = Action::new(3, |_: &i32| {});
/// invoke_twice(action.as_ref());
/// ```
///
/// [`Action`]: crate::Action
#[derive(Clone, Copy)]
pub struct ActionRef<'a> {
    raw: RawActionRef<'a>,
}

impl<'a> ActionRef<'a> {
    /// Creates a new [`ActionRef`] from a raw action reference.
    #[must_use]
    pub(crate) fn from_raw(raw: RawActionRef<'a>) -> Self {
        Self { raw }
    }

    /// Returns the inner [`RawActionRef`].
    #[must_use]
    pub(crate) fn as_raw_ref(self) -> RawActionRef<'a> {
        self.raw
    }

    /// Runs the stored strategy against the stored value.
    pub fn invoke(self) {
        self.as_raw_ref().apply();
    }

    /// Returns the [`TypeId`] of the stored value.
    #[must_use]
    pub fn value_type_id(self) -> TypeId {
        self.as_raw_ref().value_type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[must_use]
    pub fn value_type_name(self) -> &'static str {
        self.as_raw_ref().value_type_name()
    }

    /// Returns the [`TypeId`] of the stored strategy.
    #[must_use]
    pub fn strategy_type_id(self) -> TypeId {
        self.as_raw_ref().strategy_type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored strategy.
    #[must_use]
    pub fn strategy_type_name(self) -> &'static str {
        self.as_raw_ref().strategy_type_name()
    }

    /// Attempts to downcast the stored value to a reference of type `V`.
    ///
    /// Returns `Some(&V)` if the borrowed action stores a value of type `V`
    /// paired with a strategy of type `S`, otherwise returns `None`. The
    /// returned reference borrows from the underlying [`Action`], not from
    /// this handle, so it stays valid for the full lifetime `'a`.
    ///
    /// [`Action`]: crate::Action
    #[must_use]
    pub fn downcast_value<V, S>(self) -> Option<&'a V>
    where
        V: 'static,
        S: 'static,
    {
        let raw = self.as_raw_ref();
        if raw.value_type_id() != TypeId::of::<V>()
            || raw.strategy_type_id() != TypeId::of::<S>()
        {
            return None;
        }

        // SAFETY:
        // 1. We just checked that both type ids match
        Some(unsafe { raw.value_downcast_unchecked::<V, S>() })
    }

    /// Attempts to downcast the stored strategy to a reference of type `S`.
    ///
    /// Returns `Some(&S)` if the borrowed action stores a value of type `V`
    /// paired with a strategy of type `S`, otherwise returns `None`.
    #[must_use]
    pub fn downcast_strategy<V, S>(self) -> Option<&'a S>
    where
        V: 'static,
        S: 'static,
    {
        let raw = self.as_raw_ref();
        if raw.value_type_id() != TypeId::of::<V>()
            || raw.strategy_type_id() != TypeId::of::<S>()
        {
            return None;
        }

        // SAFETY:
        // 1. We just checked that both type ids match
        Some(unsafe { raw.strategy_downcast_unchecked::<V, S>() })
    }
}

impl core::fmt::Debug for ActionRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionRef")
            .field("value_type", &self.value_type_name())
            .field("strategy_type", &self.strategy_type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    #[test]
    fn test_action_ref_send_sync() {
        static_assertions::assert_not_impl_any!(ActionRef<'static>: Send, Sync);
    }

    #[test]
    fn test_action_ref_copy_clone() {
        static_assertions::assert_impl_all!(ActionRef<'static>: Copy, Clone);
    }

    #[test]
    fn test_downcast_requires_both_types_to_match() {
        let action = Action::new(5_i32, NoteStrategy);
        let action_ref = action.as_ref();

        assert_eq!(action_ref.downcast_value::<i32, NoteStrategy>(), Some(&5));
        assert!(action_ref.downcast_value::<u32, NoteStrategy>().is_none());
        assert!(action_ref.downcast_value::<i32, fn(&i32)>().is_none());
    }

    #[test]
    fn test_downcast_outlives_the_ref() {
        let action = Action::new(5_i32, NoteStrategy);
        let value = {
            let action_ref = action.as_ref();
            action_ref.downcast_value::<i32, NoteStrategy>()
        };

        // The reference borrows from the action, not the copied handle
        assert_eq!(value, Some(&5));
    }

    #[derive(Clone)]
    struct NoteStrategy;

    impl stratagem_internals::strategy::Strategy<i32> for NoteStrategy {
        fn apply(&self, _value: &i32) {}
    }
}
