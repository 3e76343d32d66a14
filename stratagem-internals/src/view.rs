//! Non-owning type-erased view over a value/strategy pair.
//!
//! This module encapsulates the fields of [`RawActionView`], ensuring they
//! are only visible within this module. This visibility restriction
//! guarantees the safety invariant: **the two pointers and the captured
//! dispatch function always originate from the same
//! [`RawActionView::new`] call and therefore agree on the referent types**.
//!
//! Unlike [`RawAction`], no allocation takes place here. The view merely
//! remembers where the referents live and how to dispatch on them, so
//! constructing one is two pointer stores and a function pointer store.
//!
//! [`RawAction`]: crate::RawAction

use core::{marker::PhantomData, ptr::NonNull};

use crate::strategy::Strategy;

/// A borrowed, type-erased pairing of a value with a strategy.
///
/// The view does not own its referents. It stores erased pointers to a
/// value and a strategy that live elsewhere, together with a dispatch
/// function instantiated for their concrete types. The lifetime parameter
/// ties the view to both borrows, so the compiler rejects any attempt to
/// use the view after either referent has been dropped or moved.
///
/// Copying the view is a shallow pointer copy. Both copies refer to the
/// same underlying value and strategy.
#[derive(Clone, Copy)]
pub struct RawActionView<'a> {
    /// Erased pointer to the borrowed value
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. The pointer was created from a `&'a V` where `V` is the value
    ///    type that `apply` was instantiated with.
    /// 2. The pointee outlives `'a`.
    value: NonNull<()>,

    /// Erased pointer to the borrowed strategy
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. The pointer was created from a `&'a S` where `S` is the strategy
    ///    type that `apply` was instantiated with.
    /// 2. The pointee outlives `'a`.
    strategy: NonNull<()>,

    /// Dispatch function instantiated for the concrete referent types
    ///
    /// # Safety
    ///
    /// The following safety invariant is guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. This always points to `apply_view::<V, S>` where `V` and `S` are
    ///    the concrete types behind the `value` and `strategy` pointers.
    apply: unsafe fn(NonNull<()>, NonNull<()>),

    /// Marker to tell the compiler that we should
    /// behave the same as a pair of `&'a` references
    _marker: PhantomData<&'a ()>,
}

impl<'a> RawActionView<'a> {
    /// Creates a new [`RawActionView`] borrowing the specified value and
    /// strategy.
    ///
    /// The view captures a dispatch function for the concrete types here,
    /// which is what allows [`RawActionView::apply`] to be safe despite the
    /// pointers being erased.
    #[inline]
    pub fn new<V, S>(value: &'a V, strategy: &'a S) -> Self
    where
        V: 'static,
        S: Strategy<V>,
    {
        Self {
            value: NonNull::from(value).cast::<()>(),
            strategy: NonNull::from(strategy).cast::<()>(),
            apply: apply_view::<V, S>,
            _marker: PhantomData,
        }
    }

    /// Applies the borrowed strategy to the borrowed value by using the
    /// [`Strategy::apply`] implementation of the strategy type used to
    /// create this view.
    #[inline]
    pub fn apply(self) {
        // SAFETY: The `apply` field is `apply_view::<V, S>` for the exact
        // types the two pointers were created from, as guaranteed by
        // `RawActionView::new` being the only constructor. That function's
        // safety requirements are upheld:
        // 1. Guaranteed by the invariants on the `value` field
        // 2. Guaranteed by the invariants on the `strategy` field
        unsafe {
            (self.apply)(self.value, self.strategy);
        }
    }
}

/// Applies the borrowed strategy to the borrowed value.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `value` points to a live instance of `V` for the duration of the call
/// 2. `strategy` points to a live instance of `S` for the duration of the
///    call
unsafe fn apply_view<V: 'static, S: Strategy<V>>(value: NonNull<()>, strategy: NonNull<()>) {
    let value = value.cast::<V>();
    let strategy = strategy.cast::<S>();
    // SAFETY: The pointer points to a live `V` as guaranteed by the caller,
    // and shared access is allowed.
    let value: &V = unsafe { value.as_ref() };
    // SAFETY: The pointer points to a live `S` as guaranteed by the caller,
    // and shared access is allowed.
    let strategy: &S = unsafe { strategy.as_ref() };
    strategy.apply(value);
}
