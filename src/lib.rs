//! testprops - extract module configuration properties from Java unit tests
//!
//! testprops reads checkstyle-style unit tests without compiling or running
//! them and reports, for each module under test, the configuration properties
//! (`addAttribute(name, value)`) asserted by `@Test` methods that end in a
//! verification call.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (parse, walk, process, aggregate)

pub mod cli;
pub mod config;
pub mod core;
