//! Sliding-window conversation log

use std::collections::VecDeque;

use crate::config::DEFAULT_MAX_CONTEXT_MESSAGES;
use crate::types::{ChatMessage, ConversationTurn, MessageRole};

/// Ordered user/assistant turns, bounded to the newest `capacity` entries
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_MESSAGES)
    }
}

impl ConversationMemory {
    /// A window of `capacity` turns; zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, dropping the oldest ones past capacity
    ///
    /// Only user and assistant turns are kept; other roles are ignored.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        if !matches!(role, MessageRole::User | MessageRole::Assistant) {
            return;
        }
        self.turns.push_back(ConversationTurn::new(role, content));
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Current window, oldest first
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    /// Current window as request messages
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.turns.iter().cloned().map(ChatMessage::from).collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
