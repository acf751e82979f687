//! Integration Tests Module
//!
//! End-to-end coverage across the crate: orchestrated task execution with
//! the built-in tool set, project indexing, and grounded search/chat.

// Orchestrator state machine and built-in tool pipeline tests
mod orchestration_test;

// File indexing and catalog tests
mod indexing_test;

// Code search and chat grounding tests
mod grounding_test;
