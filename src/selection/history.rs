//! Bounded window of recently emitted commands

use std::collections::VecDeque;

use crate::core::types::CommandId;

#[derive(Debug, Clone)]
pub struct CommandHistory {
    recent: VecDeque<CommandId>,
    capacity: usize,
}

impl CommandHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a history from commands in emission order (oldest first).
    pub fn from_commands(commands: &[CommandId], capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        for &cmd in commands {
            history.push(cmd);
        }
        history
    }

    pub fn push(&mut self, id: CommandId) {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(id);
    }

    pub fn last(&self) -> Option<CommandId> {
        self.recent.back().copied()
    }

    /// Newest first
    pub fn iter_recent(&self) -> impl Iterator<Item = CommandId> + '_ {
        self.recent.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}
