//! Core trait abstractions.

pub mod extractor;
pub mod resolver;
