//! Vtable for type-erased action operations.
//!
//! This module contains the [`ActionVtable`] which enables applying a
//! strategy to a value, cloning the pair, and dropping it when the concrete
//! value type `V` and strategy type `S` have been erased. The vtable stores
//! function pointers that dispatch to the correct typed implementations.
//!
//! This module encapsulates the fields of [`ActionVtable`] so they cannot
//! be accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameters must match the actual value
//! and strategy stored in the [`ActionData`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`ActionVtable::new`], which pairs the function pointers
//! with specific types `V` and `S` at compile time.

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{
    action::{
        data::ActionData,
        raw::{RawAction, RawActionRef},
    },
    strategy::Strategy,
    util::Erased,
};

/// Vtable for type-erased action operations.
///
/// Contains function pointers for performing operations on a value/strategy
/// pair without knowing their concrete types at compile time.
///
/// # Safety Invariant
///
/// The fields `drop`, `apply`, and `clone` are guaranteed to point to the
/// functions defined below instantiated with the value type `V` and
/// strategy type `S` that were used to create this [`ActionVtable`].
pub(crate) struct ActionVtable {
    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`ActionVtable`].
    value_type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`ActionVtable`].
    value_type_name: fn() -> &'static str,
    /// Gets the [`TypeId`] of the strategy type that was used to create
    /// this [`ActionVtable`].
    strategy_type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the strategy type that was used
    /// to create this [`ActionVtable`].
    strategy_type_name: fn() -> &'static str,
    /// Drops the [`Box<ActionData<V, S>>`] instance pointed to by this
    /// pointer.
    drop: unsafe fn(NonNull<ActionData<Erased, Erased>>),
    /// Applies the stored strategy to the stored value.
    apply: unsafe fn(RawActionRef<'_>),
    /// Deep-copies the stored pair into a new independent [`RawAction`].
    clone: unsafe fn(RawActionRef<'_>) -> RawAction,
}

impl ActionVtable {
    /// Creates a new [`ActionVtable`] for the value type `V` and the
    /// strategy type `S`.
    pub(super) const fn new<V, S>() -> &'static Self
    where
        V: Clone + 'static,
        S: Strategy<V> + Clone,
    {
        const {
            &Self {
                value_type_id: TypeId::of::<V>,
                value_type_name: core::any::type_name::<V>,
                strategy_type_id: TypeId::of::<S>,
                strategy_type_name: core::any::type_name::<S>,
                drop: drop::<V, S>,
                apply: apply::<V, S>,
                clone: clone::<V, S>,
            }
        }
    }

    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`ActionVtable`].
    #[inline]
    pub(super) fn value_type_id(&self) -> TypeId {
        (self.value_type_id)()
    }

    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`ActionVtable`].
    #[inline]
    pub(super) fn value_type_name(&self) -> &'static str {
        (self.value_type_name)()
    }

    /// Gets the [`TypeId`] of the strategy type that was used to create
    /// this [`ActionVtable`].
    #[inline]
    pub(super) fn strategy_type_id(&self) -> TypeId {
        (self.strategy_type_id)()
    }

    /// Gets the [`core::any::type_name`] of the strategy type that was used
    /// to create this [`ActionVtable`].
    #[inline]
    pub(super) fn strategy_type_name(&self) -> &'static str {
        (self.strategy_type_name)()
    }

    /// Drops the `Box<ActionData<V, S>>` instance pointed to by this
    /// pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from [`Box<ActionData<V, S>>`] via
    ///    [`Box::into_raw`]
    /// 2. This [`ActionVtable`] must be a vtable for the value and strategy
    ///    types stored in the [`ActionData`].
    /// 3. This method drops the [`Box<ActionData<V, S>>`], so the caller
    ///    must ensure that the pointer has not previously been dropped,
    ///    that it is able to transfer ownership of the pointer, and that it
    ///    will not use the pointer after calling this method.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<ActionData<Erased, Erased>>) {
        // SAFETY: We know that `self.drop` points to the function
        // `drop::<V, S>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }

    /// Applies the stored strategy to the stored value using the
    /// [`Strategy::apply`] implementation of the strategy type used when
    /// creating this [`ActionVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ActionVtable`] must be a vtable for the value and strategy
    ///    types stored in the [`RawActionRef`].
    #[inline]
    pub(super) unsafe fn apply(&self, ptr: RawActionRef<'_>) {
        // SAFETY: We know that the `self.apply` field points to the
        // function `apply::<V, S>` below. That function's safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe {
            (self.apply)(ptr);
        }
    }

    /// Deep-copies the pair behind the [`RawActionRef`] into a new
    /// independent [`RawAction`] using the `Clone` implementations of the
    /// types used when creating this [`ActionVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ActionVtable`] must be a vtable for the value and strategy
    ///    types stored in the [`RawActionRef`].
    #[inline]
    pub(super) unsafe fn clone(&self, ptr: RawActionRef<'_>) -> RawAction {
        // SAFETY: We know that the `self.clone` field points to the
        // function `clone::<V, S>` below. That function's safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.clone)(ptr) }
    }
}

/// Drops the [`Box<ActionData<V, S>>`] instance pointed to by this pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`Box<ActionData<V, S>>`] via [`Box::into_raw`]
/// 2. The types `V` and `S` match the actual value and strategy types
///    stored in the [`ActionData`]
/// 3. This method drops the [`Box<ActionData<V, S>>`], so the caller must
///    ensure that the pointer has not previously been dropped, that it is
///    able to transfer ownership of the pointer, and that it will not use
///    the pointer after calling this method.
unsafe fn drop<V: 'static, S: 'static>(ptr: NonNull<ActionData<Erased, Erased>>) {
    let ptr: NonNull<ActionData<V, S>> = ptr.cast();
    let ptr = ptr.as_ptr();
    // SAFETY: Our pointer has the correct type as guaranteed by the caller,
    // and it came from a call to `Box::into_raw` as also guaranteed by our
    // caller.
    let boxed = unsafe { Box::from_raw(ptr) };
    core::mem::drop(boxed);
}

/// Applies the stored strategy to the stored value.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The types `V` and `S` match the actual value and strategy types
///    stored in the [`ActionData`]
unsafe fn apply<V: 'static, S: Strategy<V>>(ptr: RawActionRef<'_>) {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &V = unsafe { ptr.value_downcast_unchecked::<V, S>() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let strategy: &S = unsafe { ptr.strategy_downcast_unchecked::<V, S>() };
    strategy.apply(value);
}

/// Deep-copies the stored pair into a new independent [`RawAction`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The types `V` and `S` match the actual value and strategy types
///    stored in the [`ActionData`]
unsafe fn clone<V, S>(ptr: RawActionRef<'_>) -> RawAction
where
    V: Clone + 'static,
    S: Strategy<V> + Clone,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &V = unsafe { ptr.value_downcast_unchecked::<V, S>() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let strategy: &S = unsafe { ptr.strategy_downcast_unchecked::<V, S>() };
    RawAction::new(value.clone(), strategy.clone())
}
