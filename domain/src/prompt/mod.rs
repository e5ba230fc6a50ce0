//! Prompt domain
//!
//! Templates for the task prompt of each round, the per-agent system
//! instruction, and the final synthesis request.

mod template;

pub use template::PromptTemplate;
