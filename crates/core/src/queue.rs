//! Action queue module - serializes player input against animated turns
//!
//! Actions wait in a FIFO until the current-action slot is free and no turn is
//! halfway through its animation. The game state executes the slot once per
//! tick and then asks for the next action.

use std::collections::VecDeque;

use crate::types::{Action, QUARTER_TURN_DEG};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
    current: Option<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `action` and try to move the front into the current slot.
    pub fn enqueue(&mut self, action: Action, turn_angle: u32) {
        self.pending.push_back(action);
        self.dequeue(turn_angle);
    }

    /// Move the front action into the current slot.
    ///
    /// Does nothing when the queue is empty, when a turn is strictly between
    /// 0° and 90°, or when the slot still holds an action that has not run.
    pub fn dequeue(&mut self, turn_angle: u32) -> bool {
        if self.current.is_some() || (turn_angle > 0 && turn_angle < QUARTER_TURN_DEG) {
            return false;
        }
        match self.pending.pop_front() {
            Some(action) => {
                self.current = Some(action);
                true
            }
            None => false,
        }
    }

    /// Action to execute on the next tick.
    pub fn current(&self) -> Option<Action> {
        self.current
    }

    /// Free the current slot once its action is done.
    pub fn finish(&mut self) -> Option<Action> {
        self.current.take()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Action> {
        self.pending.iter()
    }

    /// Pending actions, excluding the current one.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.current.is_none()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.current = None;
    }
}
