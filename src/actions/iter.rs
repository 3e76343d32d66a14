use core::iter::FusedIterator;

use stratagem_internals::RawAction;

use crate::action::{Action, ActionRef};

/// An iterator over references to the actions in a collection.
///
/// This iterator yields [`ActionRef`] items and is created by calling
/// [`Actions::iter`].
///
/// [`Actions::iter`]: crate::actions::Actions::iter
///
/// # Examples
///
/// ```
/// use stratagem::{Action, Actions, actions::ActionsIter};
///
/// let mut actions = Actions::new();
/// actions.push(Action::new(1, |_: &i32| {}));
/// actions.push(Action::new(2, |_: &i32| {}));
///
/// let iterator: ActionsIter<'_> = actions.iter();
/// assert_eq!(iterator.len(), 2);
/// ```
#[must_use]
pub struct ActionsIter<'a> {
    iter: core::slice::Iter<'a, RawAction>,
}

impl<'a> ActionsIter<'a> {
    /// Creates a new [`ActionsIter`] from an iterator of raw actions
    pub(crate) fn from_raw(iter: core::slice::Iter<'a, RawAction>) -> Self {
        Self { iter }
    }
}

impl<'a> Iterator for ActionsIter<'a> {
    type Item = ActionRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let action = self.iter.next()?.as_ref();
        Some(ActionRef::from_raw(action))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for ActionsIter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let action = self.iter.next_back()?.as_ref();
        Some(ActionRef::from_raw(action))
    }
}

impl<'a> ExactSizeIterator for ActionsIter<'a> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> FusedIterator for ActionsIter<'a> {}

/// An iterator that consumes an [`Actions`] collection and yields owned
/// actions.
///
/// This iterator yields [`Action`] items and is created by calling
/// [`Actions::into_iter`].
///
/// [`Actions`]: crate::actions::Actions
/// [`Actions::into_iter`]: crate::actions::Actions#impl-IntoIterator-for-Actions
///
/// # Examples
///
/// ```
/// use stratagem::{Action, Actions, actions::ActionsIntoIter};
///
/// let mut actions = Actions::new();
/// actions.push(Action::new(1, |_: &i32| {}));
///
/// let iterator: ActionsIntoIter = actions.into_iter();
/// assert_eq!(iterator.len(), 1);
/// ```
#[must_use]
pub struct ActionsIntoIter {
    iter: alloc::vec::IntoIter<RawAction>,
}

impl ActionsIntoIter {
    /// Creates a new [`ActionsIntoIter`] from an iterator of raw actions
    pub(crate) fn from_raw(iter: alloc::vec::IntoIter<RawAction>) -> Self {
        Self { iter }
    }
}

impl Iterator for ActionsIntoIter {
    type Item = Action;

    fn next(&mut self) -> Option<Self::Item> {
        let action = self.iter.next()?;
        Some(Action::from_raw(action))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for ActionsIntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        let action = self.iter.next_back()?;
        Some(Action::from_raw(action))
    }
}

impl ExactSizeIterator for ActionsIntoIter {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl FusedIterator for ActionsIntoIter {}
