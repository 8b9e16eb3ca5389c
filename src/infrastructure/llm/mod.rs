//! # LLM Module
//!
//! The model that translates free text into intents.

pub mod client;

pub use client::Client;
