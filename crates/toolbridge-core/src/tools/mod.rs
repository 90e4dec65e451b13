//! Tool management
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ConnectionManager                          │
//! │    - tools/list on connect ──► registry     │
//! │    - tools/call per LLM request             │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ MCP (stdio or streamable HTTP)
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  Tool-host process (e.g. a weather server)  │
//! └─────────────────────────────────────────────┘
//! ```

mod registry;

pub use registry::CapabilityRegistry;
