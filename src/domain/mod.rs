//! # Domain Layer
//!
//! Core definitions, types, and traits that define the request pipeline.
//! Independent of the OS and model backends, serving as the contract for other layers.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;
