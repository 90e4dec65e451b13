//! Query orchestration
//!
//! ```text
//!   query ──► memory ──► provider ──► tool calls? ──no──► answer
//!                                        │
//!                                       yes
//!                                        ▼
//!                        connection.invoke (in order)
//!                                        │
//!                                        ▼
//!                         follow-up provider call ──► answer
//! ```

mod bridge;
mod error;

pub use bridge::{BridgeClient, NO_RESPONSE};
pub use error::{ClientError, ClientResult};
