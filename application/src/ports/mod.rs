//! Port definitions (interfaces for external adapters)

pub mod backend;
pub mod conversation_logger;
pub mod progress;
pub mod result_store;
