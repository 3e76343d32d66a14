//! Type-erased action pointer types.
//!
//! This module encapsulates the `ptr` field of [`RawAction`] and
//! [`RawActionRef`], ensuring it is only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the pointer
//! always comes from `Box<ActionData<V, S>>`**.
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawAction::new`] (which
//! creates it from `Box::into_raw`), and cannot be modified afterward (no
//! `pub` or `pub(crate)` fields), the pointer provenance remains valid
//! throughout the value's lifetime.
//!
//! The [`RawAction::drop`] implementation relies on this invariant to
//! safely reconstruct the `Box` and deallocate the memory.
//!
//! # Type Erasure
//!
//! The concrete type parameters `V` and `S` are erased by casting to
//! `ActionData<Erased, Erased>`. The vtable stored within the `ActionData`
//! provides the runtime type information needed to safely downcast, apply
//! the strategy, and clone the pair.

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{action::data::ActionData, strategy::Strategy, util::Erased};

/// A pointer to an [`ActionData`] that is guaranteed to point to an
/// initialized instance of an [`ActionData<V, S>`] for some specific pair,
/// though we do not know which actual pair it is.
///
/// However, the pointer is allowed to transition into a non-initialized
/// state inside the [`RawAction::drop`] method.
///
/// The pointer is guaranteed to have been created using [`Box::into_raw`].
///
/// We cannot use a [`Box<ActionData<V, S>>`] directly, because that does
/// not allow us to type-erase the pair.
#[repr(transparent)]
pub struct RawAction {
    /// Pointer to the inner action data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<ActionData<V, S>>`
    ///    for some pair using `Box::into_raw`.
    /// 2. The pointer will point to the same `ActionData<V, S>` for the
    ///    entire lifetime of this object.
    /// 3. The pointee is properly initialized for the entire lifetime of
    ///    this object, except during the execution of the `Drop`
    ///    implementation.
    ptr: NonNull<ActionData<Erased, Erased>>,
}

impl RawAction {
    /// Creates a new [`RawAction`] owning the specified value and strategy.
    ///
    /// The returned action embeds both by value; applying it dispatches the
    /// strategy against the value through the vtable created here.
    #[inline]
    pub fn new<V, S>(value: V, strategy: S) -> Self
    where
        V: Clone + 'static,
        S: Strategy<V> + Clone,
    {
        let ptr = Box::new(ActionData::new(value, strategy));
        let ptr: *mut ActionData<V, S> = Box::into_raw(ptr);
        let ptr: *mut ActionData<Erased, Erased> = ptr.cast::<ActionData<Erased, Erased>>();

        // SAFETY: `Box::into_raw` returns a non-null pointer
        let ptr: NonNull<ActionData<Erased, Erased>> = unsafe { NonNull::new_unchecked(ptr) };

        Self { ptr }
    }

    /// Returns a reference to the [`ActionData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawActionRef<'_> {
        RawActionRef {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }
}

impl core::ops::Drop for RawAction {
    #[inline]
    fn drop(&mut self) {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The pointer comes from `Box::into_raw` (guaranteed by
        //    `RawAction::new`)
        // 2. The vtable returned by `self.as_ref().vtable()` is guaranteed
        //    to match the data in the `ActionData`.
        // 3. The pointer is initialized and has not been previously freed
        //    as guaranteed by the invariants on this type. We are correctly
        //    transferring ownership here and the pointer is not used
        //    afterwards, as we are in the drop function.
        unsafe {
            vtable.drop(self.ptr);
        }
    }
}

/// A lifetime-bound pointer to an [`ActionData`] that is guaranteed to
/// point to an initialized instance of an [`ActionData<V, S>`] for some
/// specific pair, though we do not know which actual pair it is.
///
/// We cannot use a [`&'a ActionData<V, S>`] directly, because that would
/// require us to know the actual types, which we do not.
///
/// [`&'a ActionData<V, S>`]: ActionData
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct RawActionRef<'a> {
    /// Pointer to the inner action data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<ActionData<V, S>>`
    ///    for some pair using `Box::into_raw`.
    /// 2. The pointer will point to the same `ActionData<V, S>` for the
    ///    entire lifetime of this object.
    ptr: NonNull<ActionData<Erased, Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a ActionData<Erased, Erased>`
    _marker: core::marker::PhantomData<&'a ActionData<Erased, Erased>>,
}

impl<'a> RawActionRef<'a> {
    /// Casts the [`RawActionRef`] to an [`ActionData<V, S>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The types `V` and `S` match the actual value and strategy types
    ///    stored in the [`ActionData`].
    #[inline]
    pub(super) unsafe fn cast_inner<V: 'static, S: 'static>(self) -> &'a ActionData<V, S> {
        // Debug assertions to catch type mismatches in case of bugs
        debug_assert_eq!(self.vtable().value_type_id(), TypeId::of::<V>());
        debug_assert_eq!(self.vtable().strategy_type_id(), TypeId::of::<S>());

        let this = self.ptr.cast::<ActionData<V, S>>();
        // SAFETY: Converting the NonNull pointer to a reference is sound
        // because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawActionRef's type invariants)
        // - The pointee is properly initialized (RawActionRef's doc comment
        //   guarantees it points to an initialized ActionData<V, S> for
        //   some pair)
        // - The types `V` and `S` match the actual stored types (guaranteed
        //   by caller)
        // - Shared access is allowed
        // - The reference lifetime 'a is valid (tied to RawActionRef<'a>'s
        //   lifetime)
        unsafe { this.as_ref() }
    }

    /// Returns a raw pointer to the [`ActionData`] instance.
    #[inline]
    pub(super) fn as_ptr(self) -> *const ActionData<Erased, Erased> {
        self.ptr.as_ptr()
    }

    /// Returns the [`TypeId`] of the stored value.
    #[inline]
    pub fn value_type_id(self) -> TypeId {
        self.vtable().value_type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[inline]
    pub fn value_type_name(self) -> &'static str {
        self.vtable().value_type_name()
    }

    /// Returns the [`TypeId`] of the stored strategy.
    #[inline]
    pub fn strategy_type_id(self) -> TypeId {
        self.vtable().strategy_type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored strategy.
    #[inline]
    pub fn strategy_type_name(self) -> &'static str {
        self.vtable().strategy_type_name()
    }

    /// Applies the stored strategy to the stored value by using the
    /// [`Strategy::apply`] implementation of the strategy type used to
    /// create the [`ActionData`].
    #[inline]
    pub fn apply(self) {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match
        //    the data in the `ActionData`.
        unsafe {
            vtable.apply(self);
        }
    }

    /// Deep-copies the stored pair into a new independent [`RawAction`] by
    /// using the `Clone` implementations of the types used to create the
    /// [`ActionData`].
    ///
    /// Applying the returned action is behaviorally identical to applying
    /// the original at the time of the copy.
    #[inline]
    pub fn clone_action(self) -> RawAction {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match
        //    the data in the `ActionData`.
        unsafe { vtable.clone(self) }
    }
}
