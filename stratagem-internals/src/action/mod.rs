//! Module containing the main erased action data structure

mod data;
mod raw;
mod vtable;

pub use self::raw::{RawAction, RawActionRef};
