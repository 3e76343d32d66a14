#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`stratagem`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased data structures and unsafe
//! operations that power the [`stratagem`] strategy-erasure library. It
//! provides the foundation for zero-cost type erasure through vtable-based
//! dispatch.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`stratagem`] crate,
//! not this one.
//!
//! # Architecture
//!
//! - **[`action`]**: Type-erased storage for a value paired with a strategy
//!   - [`RawAction`]: Owned action with [`Box`]-based allocation
//!   - [`RawActionRef`]: Borrowed reference to an action
//!   - [`ActionData`]: `#[repr(C)]` cell enabling field access on erased types
//!   - [`ActionVtable`]: Function pointers for type-erased dispatch
//!
//! - **[`view`]**: Non-owning erasure over caller-owned storage
//!   - [`RawActionView`]: Two erased pointers plus a dispatch function bound
//!     at construction, lifetime-bound to the referents
//!
//! - **[`strategy`]**: The capability contract
//!   - [`Strategy`]: Defines how a strategy acts on a value
//!
//! # Safety Strategy
//!
//! Type erasure requires careful handling to maintain Rust's type safety
//! guarantees. When we erase a type like `ActionData<Circle, Recorder>` to
//! `ActionData<Erased, Erased>`, we must ensure that the vtable function
//! pointers still match the actual concrete pair stored in memory.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: Safety-critical types keep fields
//!   module-private, making invariants locally verifiable within a single
//!   file
//! - **`#[repr(C)]` layout**: Enables safe field projection on type-erased
//!   pointers without constructing invalid references
//! - **Documented vtable contracts**: Each vtable entry specifies exactly
//!   when it can be safely called
//! - **Lifetime binding**: [`RawActionView`] carries the borrow of its
//!   referents, so dispatch through it can never read freed memory
//!
//! [`stratagem`]: https://docs.rs/stratagem/latest/stratagem/
//! [`ActionData`]: action::data::ActionData
//! [`ActionVtable`]: action::vtable::ActionVtable
//! [`Strategy`]: strategy::Strategy
//! [`Box`]: alloc::boxed::Box

extern crate alloc;

mod action;
pub mod strategy;
mod util;
mod view;

pub use action::{RawAction, RawActionRef};
pub use view::RawActionView;
