use alloc::vec::Vec;

use stratagem_internals::RawAction;

use crate::{
    action::{Action, ActionRef},
    actions::{ActionsIntoIter, ActionsIter},
};

/// An ordered collection of owned, type-erased actions.
///
/// You can think of an [`Actions`] as a wrapper around a `Vec<Action>`.
/// Actions of entirely unrelated concrete types live side by side in the
/// collection, and the driver method [`invoke_all`] dispatches each one
/// through its own strategy.
///
/// Insertion order is invocation order: [`invoke_all`] and the iterators
/// visit actions front to back, in the order they were pushed.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use stratagem::prelude::*;
///
/// let out = Rc::new(RefCell::new(String::new()));
///
/// let mut actions = Actions::new();
/// actions.push(Action::new(2.3, Recorder::new("circle", out.clone())));
/// actions.push(Action::new(1.2, Recorder::new("square", out.clone())));
/// actions.invoke_all();
///
/// assert_eq!(*out.borrow(), "circle(2.3)\nsquare(1.2)\n");
/// ```
///
/// [`invoke_all`]: Actions::invoke_all
pub struct Actions {
    raw: Vec<RawAction>,
}

impl Actions {
    /// Creates a new, empty action collection.
    ///
    /// The collection will not allocate until actions are added to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagem::Actions;
    ///
    /// let actions = Actions::new();
    /// assert!(actions.is_empty());
    /// assert_eq!(actions.len(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_raw(Vec::new())
    }

    /// Creates a new [`Actions`] from a vector of raw actions
    #[must_use]
    pub(crate) fn from_raw(raw: Vec<RawAction>) -> Self {
        Self { raw }
    }

    /// Provides ownership of the inner raw actions vector
    #[must_use]
    pub(crate) fn into_raw(self) -> Vec<RawAction> {
        self.raw
    }

    /// Provides access to the inner raw actions vector
    #[must_use]
    pub(crate) fn as_raw(&self) -> &Vec<RawAction> {
        &self.raw
    }

    /// Appends an action to the end of the collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagem::{Action, Actions};
    ///
    /// let mut actions = Actions::new();
    /// actions.push(Action::new(7, |_: &i32| {}));
    /// assert_eq!(actions.len(), 1);
    /// ```
    pub fn push(&mut self, action: Action) {
        self.raw.push(action.into_raw());
    }

    /// Removes and returns the last action from the collection.
    ///
    /// Returns [`None`] if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::any::TypeId;
    ///
    /// use stratagem::{Action, Actions};
    ///
    /// let mut actions = Actions::new();
    /// actions.push(Action::new(7_i32, |_: &i32| {}));
    /// actions.push(Action::new("last", |_: &&str| {}));
    ///
    /// let last = actions.pop().unwrap();
    /// assert_eq!(last.value_type_id(), TypeId::of::<&str>());
    /// assert_eq!(actions.len(), 1);
    /// ```
    pub fn pop(&mut self) -> Option<Action> {
        let action = self.raw.pop()?;
        Some(Action::from_raw(action))
    }

    /// Returns the number of actions in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_raw().len()
    }

    /// Returns `true` if the collection contains no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_raw().is_empty()
    }

    /// Returns a reference to the action at the given index.
    ///
    /// Returns [`None`] if the index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::any::TypeId;
    ///
    /// use stratagem::{Action, Actions};
    ///
    /// let mut actions = Actions::new();
    /// actions.push(Action::new(7_i32, |_: &i32| {}));
    ///
    /// let first = actions.get(0).unwrap();
    /// assert_eq!(first.value_type_id(), TypeId::of::<i32>());
    ///
    /// assert!(actions.get(10).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ActionRef<'_>> {
        let raw = self.as_raw().get(index)?.as_ref();
        Some(ActionRef::from_raw(raw))
    }

    /// Returns an iterator over references to the actions in the
    /// collection.
    ///
    /// The iterator yields [`ActionRef`] items, which provide non-owning
    /// access to the actions. For owning iteration, use [`into_iter()`]
    /// instead.
    ///
    /// [`into_iter()`]: Self#impl-IntoIterator-for-Actions
    pub fn iter(&self) -> ActionsIter<'_> {
        ActionsIter::from_raw(self.as_raw().iter())
    }

    /// Invokes every action in the collection, in insertion order.
    ///
    /// Each action dispatches its own strategy against its own value. The
    /// actions are not consumed, so the whole collection can be driven
    /// again.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use stratagem::prelude::*;
    ///
    /// let out = Rc::new(RefCell::new(String::new()));
    ///
    /// let mut actions = Actions::new();
    /// actions.push(Action::new(2.3, Recorder::new("circle", out.clone())));
    /// actions.push(Action::new(1.2, Recorder::new("square", out.clone())));
    /// actions.push(Action::new(4.1, Recorder::new("circle", out.clone())));
    /// actions.invoke_all();
    ///
    /// assert_eq!(*out.borrow(), "circle(2.3)\nsquare(1.2)\ncircle(4.1)\n");
    /// ```
    pub fn invoke_all(&self) {
        for action in self.iter() {
            action.invoke();
        }
    }
}

impl Clone for Actions {
    /// Deep-copies every action in the collection.
    ///
    /// The clone is fully independent of the original; see
    /// [`Clone for Action`](Action#impl-Clone-for-Action) for the
    /// semantics of each entry's copy.
    fn clone(&self) -> Self {
        let raw = self
            .as_raw()
            .iter()
            .map(|action| action.as_ref().clone_action())
            .collect();
        Self::from_raw(raw)
    }
}

impl Default for Actions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Actions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl IntoIterator for Actions {
    type IntoIter = ActionsIntoIter;
    type Item = Action;

    fn into_iter(self) -> Self::IntoIter {
        ActionsIntoIter::from_raw(self.into_raw().into_iter())
    }
}

impl<'a> IntoIterator for &'a Actions {
    type IntoIter = ActionsIter<'a>;
    type Item = ActionRef<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Action> for Actions {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        for action in iter {
            self.push(action);
        }
    }
}

impl FromIterator<Action> for Actions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut actions = Actions::new();
        actions.extend(iter);
        actions
    }
}

impl From<Vec<Action>> for Actions {
    fn from(actions: Vec<Action>) -> Self {
        actions.into_iter().collect()
    }
}

impl<const N: usize> From<[Action; N]> for Actions {
    fn from(actions: [Action; N]) -> Self {
        actions.into_iter().collect()
    }
}
