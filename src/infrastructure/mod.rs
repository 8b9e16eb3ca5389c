//! # Infrastructure Layer
//!
//! Handles interactions with the operating system and the model service.
//! Implements the traits defined in the Domain layer (e.g., LlmProvider, AppRegistry, Opener).

pub mod llm;
pub mod logging;
pub mod registry;
pub mod tools;
