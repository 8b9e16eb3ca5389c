//! # Interface Layer
//!
//! The interactive front end that feeds user requests into the pipeline.

pub mod repl;
