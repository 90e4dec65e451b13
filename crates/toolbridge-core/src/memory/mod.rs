//! Conversation memory

mod conversation;

pub use conversation::ConversationMemory;
