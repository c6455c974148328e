//! Building blocks of the unit-test processor.
//!
//! - `literalizer`: expression → literal string
//! - `declaration`: variable declaration → configuration binding / file handle
//! - `call_site`: method call → property setting / verification
//! - `method_scope`: state of the active test method

pub mod call_site;
pub mod declaration;
pub mod literalizer;
pub mod method_scope;

pub use call_site::{CallSite, classify_call, extract_property};
pub use declaration::{Declaration, classify_declaration};
pub use literalizer::Literalizer;
pub use method_scope::MethodScope;
