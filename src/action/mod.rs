//! Owning and borrowed handles for type-erased actions.

mod owned;
mod ref_;
mod view;

pub use self::{owned::Action, ref_::ActionRef, view::ActionView};
