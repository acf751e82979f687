//! Service Layer
//!
//! The two halves of the system: codebase grounding (indexer, search,
//! context, chat) and task orchestration.

pub mod chat;
pub mod context;
pub mod indexer;
pub mod orchestrator;
pub mod search;
