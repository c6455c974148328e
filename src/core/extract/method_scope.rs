//! Per-method extraction state.

use std::collections::{HashMap, HashSet};

use crate::core::aggregate::{ModuleProperties, Property};
use crate::core::syntax::NodeId;

/// State collected while inside one test method.
///
/// Only one method is active at a time; methods nested inside the active one
/// (anonymous or local classes) contribute to it.
#[derive(Debug, Default)]
pub struct MethodScope {
    active: Option<NodeId>,
    /// Variable name → module identifier.
    bindings: HashMap<String, String>,
    /// `final File` locals.
    file_handles: HashSet<String>,
    properties: ModuleProperties,
    verified: bool,
}

impl MethodScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `method` is the method that activated this scope.
    pub fn is_active_method(&self, method: NodeId) -> bool {
        self.active == Some(method)
    }

    /// Activate the scope for `method`. The first method entered wins.
    pub fn enter(&mut self, method: NodeId) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(method);
        true
    }

    /// Bind `variable` to `module`, replacing any previous binding.
    pub fn bind(&mut self, variable: impl Into<String>, module: impl Into<String>) {
        self.bindings.insert(variable.into(), module.into());
    }

    pub fn module_of(&self, variable: &str) -> Option<&str> {
        self.bindings.get(variable).map(String::as_str)
    }

    pub fn is_bound(&self, variable: &str) -> bool {
        self.bindings.contains_key(variable)
    }

    pub fn add_file_handle(&mut self, variable: impl Into<String>) {
        self.file_handles.insert(variable.into());
    }

    pub fn file_handles(&self) -> &HashSet<String> {
        &self.file_handles
    }

    pub fn add_property(&mut self, module: &str, property: Property) {
        self.properties
            .entry(module.to_owned())
            .or_default()
            .insert(property);
    }

    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Close the active method and reset all state.
    ///
    /// Returns the collected properties only if a verification was seen.
    pub fn finish(&mut self) -> Option<ModuleProperties> {
        let finished = std::mem::take(self);
        finished.verified.then_some(finished.properties)
    }
}
