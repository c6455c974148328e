//! Run-wide accumulation of module properties.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// A configuration property asserted by a test: `addAttribute(name, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Distinct properties of one module, in discovery order.
pub type PropertySet = IndexSet<Property>;

/// Module identifier → properties, in discovery order.
pub type ModuleProperties = IndexMap<String, PropertySet>;

/// Process-wide store of everything extracted during one scan.
///
/// Only [`ModuleAccumulation::merge`] adds to it and only
/// [`ModuleAccumulation::drain`] reads it, so results cannot leak from one
/// run into the next without an explicit drain.
#[derive(Debug, Default)]
pub struct ModuleAccumulation {
    modules: ModuleProperties,
}

impl ModuleAccumulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union a finished method's properties into the accumulation.
    pub fn merge(&mut self, method_properties: ModuleProperties) {
        for (module, properties) in method_properties {
            self.modules.entry(module).or_default().extend(properties);
        }
    }

    /// Return everything accumulated since the last drain and clear the store.
    pub fn drain(&mut self) -> ModuleProperties {
        std::mem::take(&mut self.modules)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
