//! An ordered collection of owned actions and its iterators.

mod iter;
mod owned;

pub use self::{
    iter::{ActionsIntoIter, ActionsIter},
    owned::Actions,
};
