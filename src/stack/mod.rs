//! Pending-action resolution.
//!
//! Chained sub-actions (three resource gains from a forest activation, the
//! egg discards owed for a placed bird, a board trade) are not resolved by
//! recursion. They are queued on an explicit LIFO [`ActionQueue`] and
//! answered one step at a time, so every intermediate choice is visible to
//! the agent.
//!
//! ```
//! use wingspan_env::core::NextAction;
//! use wingspan_env::stack::ActionQueue;
//!
//! let mut queue = ActionQueue::new();
//! queue.push_all([NextAction::GetEgg, NextAction::GetEgg]);
//! queue.push(NextAction::DiscardResource);
//!
//! assert_eq!(queue.pop(), Some(NextAction::DiscardResource));
//! assert_eq!(queue.peek(), Some(NextAction::GetEgg));
//! ```

mod queue;

pub use queue::ActionQueue;
