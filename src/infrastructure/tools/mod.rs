//! # Tools Module
//!
//! Process execution for resolved actions: captured shell commands, detached
//! launches, and the system "open" fallback.

pub mod executor;
pub mod opener;
