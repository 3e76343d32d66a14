//! This module encapsulates the fields of the [`ActionData`]. Since this is
//! the only place they are visible, this means that the types of the
//! [`ActionVtable`] are guaranteed to always be in sync with the types of
//! the actual value and strategy. This follows from the fact that they are
//! in sync when created and that the API offers no way to change the
//! [`ActionVtable`], the value type, or the strategy type after creation.

use crate::{
    action::{raw::RawActionRef, vtable::ActionVtable},
    strategy::Strategy,
};

/// Type-erased cell pairing one value with one strategy, dispatched through
/// a vtable.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased
/// contexts, allowing access to the vtable field even when the concrete
/// value type `V` and strategy type `S` are unknown.
#[repr(C)]
pub(super) struct ActionData<V: 'static, S: 'static> {
    /// The vtable of this action
    vtable: &'static ActionVtable,
    /// The stored value
    value: V,
    /// The stored strategy
    strategy: S,
}

impl<V: 'static, S: 'static> ActionData<V, S> {
    /// Creates a new [`ActionData`] holding the given value and strategy.
    ///
    /// This method creates the vtable for type-erased dispatch and pairs it
    /// with the data. The `Clone` bounds exist because cloning is part of
    /// the erased interface: every action can be deep-copied through its
    /// vtable.
    #[inline]
    pub(super) fn new(value: V, strategy: S) -> Self
    where
        V: Clone,
        S: Strategy<V> + Clone,
    {
        Self {
            vtable: ActionVtable::new::<V, S>(),
            value,
            strategy,
        }
    }

    /// Returns a reference to the stored value.
    #[inline]
    pub(super) fn value(&self) -> &V {
        &self.value
    }

    /// Returns a reference to the stored strategy.
    #[inline]
    pub(super) fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<'a> RawActionRef<'a> {
    /// Returns a reference to the [`ActionVtable`] of the [`ActionData`]
    /// instance.
    #[inline]
    pub(super) fn vtable(self) -> &'static ActionVtable {
        let ptr = self.as_ptr();
        // SAFETY: We don't know the actual inner value and strategy types,
        // but we do know that the pointer points to an instance of
        // `ActionData<V, S>` for some specific pair. Since `ActionData` is
        // `#[repr(C)]`, that means that it's safe to create pointers to the
        // fields before the actual value.
        //
        // We need to take care to avoid creating an actual reference to
        // the `ActionData` itself though, as that would still be undefined
        // behavior since we don't have the right type.
        let vtable_ptr: *const &'static ActionVtable = unsafe { &raw const (*ptr).vtable };

        // SAFETY: Dereferencing the pointer and getting out the `&'static
        // ActionVtable` is valid for the same reasons
        unsafe { *vtable_ptr }
    }

    /// Accesses the stored value of the [`ActionData`] instance as a
    /// reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the types `V` and `S` match the actual
    /// value and strategy types stored in the [`ActionData`].
    #[inline]
    pub unsafe fn value_downcast_unchecked<V: 'static, S: 'static>(self) -> &'a V {
        // SAFETY: The inner function requires that `V` and `S` match the
        // types stored, but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<V, S>() };
        this.value()
    }

    /// Accesses the stored strategy of the [`ActionData`] instance as a
    /// reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the types `V` and `S` match the actual
    /// value and strategy types stored in the [`ActionData`].
    #[inline]
    pub unsafe fn strategy_downcast_unchecked<V: 'static, S: 'static>(self) -> &'a S {
        // SAFETY: The inner function requires that `V` and `S` match the
        // types stored, but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<V, S>() };
        this.strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_field_offsets() {
        use core::mem::{offset_of, size_of};

        #[repr(align(32))]
        struct LargeAlignment {
            _value: u8,
        }

        assert_eq!(offset_of!(ActionData<u8, u8>, vtable), 0);
        assert_eq!(offset_of!(ActionData<u32, [u64; 4]>, vtable), 0);
        assert_eq!(offset_of!(ActionData<LargeAlignment, u8>, vtable), 0);

        assert!(offset_of!(ActionData<u8, u8>, value) >= size_of::<&'static ActionVtable>());
        assert!(offset_of!(ActionData<u32, [u64; 4]>, value) >= size_of::<&'static ActionVtable>());
        assert!(
            offset_of!(ActionData<LargeAlignment, u8>, value)
                >= size_of::<&'static ActionVtable>()
        );
    }
}
