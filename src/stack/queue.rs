//! LIFO pending-action queue.
//!
//! Sub-actions are pushed on top and resolved top first. When a step pushes
//! several follow-ups at once, the last one pushed is answered first.

use serde::{Deserialize, Serialize};

use crate::core::NextAction;

/// The pending-action stack (index 0 = bottom, last = top).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionQueue {
    entries: Vec<NextAction>,
}

impl ActionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a pending action on top.
    pub fn push(&mut self, action: NextAction) {
        self.entries.push(action);
    }

    /// Push several actions in order; the last ends up on top.
    pub fn push_all(&mut self, actions: impl IntoIterator<Item = NextAction>) {
        self.entries.extend(actions);
    }

    /// Remove and return the top action.
    pub fn pop(&mut self) -> Option<NextAction> {
        self.entries.pop()
    }

    /// Peek at the top without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<NextAction> {
        self.entries.last().copied()
    }

    /// Replace the top action, or push if empty.
    pub fn replace_top(&mut self, action: NextAction) {
        match self.entries.last_mut() {
            Some(top) => *top = action,
            None => self.entries.push(action),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &NextAction> {
        self.entries.iter().rev()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
