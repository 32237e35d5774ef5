//! # Natural Language Chat over SQL Databases
//!
//! This crate provides the core of a database chat assistant: connection
//! descriptors and a connector producing live handles over SQLite or MySQL,
//! a single-slot temp store for uploaded database files, a conversation
//! transcript, a keyword-based query router, and an agent that delegates
//! question answering to a configurable AI provider.

pub mod agent;
pub mod descriptor;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod route;
pub mod session;
pub mod temp;
pub mod transcript;

pub use agent::SqlAgent;
pub use descriptor::ConnectionDescriptor;
pub use errors::{AgentError, ConnectError};
pub use providers::db::{connect, DatabaseHandle};
pub use route::{classify, RouteKind};
pub use session::Session;
pub use temp::TempSlot;
pub use transcript::{ChatMessage, Role, Transcript};
