//! Tool-host connection lifecycle

mod manager;

pub use manager::{ConnectionManager, ConnectionSummary};
