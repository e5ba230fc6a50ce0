//! Core domain concepts shared across all subdomains.
//!
//! - [`topic::Topic`] - a validated debate topic
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - text helpers for previews

pub mod error;
pub mod string;
pub mod topic;
