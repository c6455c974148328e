//! Source parsers.
//!
//! - `java`: Java test sources (tree-sitter), lowered into the core's syntax tree

pub mod java;
