//! # Application Layer
//!
//! The request pipeline: intent parsing, program resolution, action dispatch, and the
//! engine that ties them to the executor.

pub mod dispatcher;
pub mod engine;
pub mod parsing;
pub mod resolver;
