//! The recognized test idiom, in one place.
//!
//! Every name the extraction core matches against lives here: annotation
//! names, handle type names, factory and verification method patterns,
//! accessor names and the resource directories used by path builders.

use std::sync::LazyLock;

use regex::Regex;

/// Annotations marking a test method (short or fully qualified).
pub const TEST_ANNOTATIONS: &[&str] = &["Test", "org.junit.Test", "org.junit.jupiter.api.Test"];

/// Declared types recognized as configuration handles.
pub const CONFIGURATION_TYPES: &[&str] = &["DefaultConfiguration", "Configuration"];

/// Declared types recognized as file-path handles (only when `final`).
pub const FILE_HANDLE_TYPES: &[&str] = &["File"];

/// Accessor called on a file handle to obtain its path.
pub const FILE_PATH_ACCESSOR: &str = "getPath";

/// Method that sets a property on a configuration handle.
pub const ADD_ATTRIBUTE_METHOD: &str = "addAttribute";

/// Zero-argument accessors that turn an enum constant into its name.
pub const ENUM_NAME_ACCESSORS: &[&str] = &["toString", "getName", "name"];

/// Module identifier of configurations created with `createRootConfig`.
pub const ROOT_MODULE: &str = "Checker";

/// Module identifier of configurations created with `createTreeWalkerConfig`.
pub const TREE_WALKER_MODULE: &str = "TreeWalker";

/// Resource directory for compilable test inputs.
pub const RESOURCES_DIR: &str = "src/test/resources/";

/// Resource directory for inputs that are not expected to compile.
pub const NONCOMPILABLE_RESOURCES_DIR: &str = "src/test/resources-noncompilable/";

static CREATE_METHOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:create(?:Root|Module|TreeWalker)Config|getModuleConfig)$").unwrap());

static VERIFY_METHOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^verify(?:Warns|Suppressed)?$").unwrap());

/// Helper methods that build a path to a test resource from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathBuilder {
    GetPath,
    GetUriString,
    GetResourcePath,
    GetNonCompilablePath,
}

impl PathBuilder {
    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "getPath" => Some(Self::GetPath),
            "getUriString" => Some(Self::GetUriString),
            "getResourcePath" => Some(Self::GetResourcePath),
            "getNonCompilablePath" => Some(Self::GetNonCompilablePath),
            _ => None,
        }
    }

    /// Resource directory the built path points into.
    pub fn resource_dir(self) -> &'static str {
        match self {
            Self::GetPath | Self::GetUriString | Self::GetResourcePath => RESOURCES_DIR,
            Self::GetNonCompilablePath => NONCOMPILABLE_RESOURCES_DIR,
        }
    }
}

/// Which module a configuration factory call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMethodTarget {
    /// `createRootConfig`: the top-level checker.
    Root,
    /// `createTreeWalkerConfig`: the tree-walking aggregator.
    TreeWalker,
    /// `createModuleConfig(X)` / `getModuleConfig(X)`: named by the argument.
    FromArgument,
}

/// Classify a factory method name, or `None` if it is not a recognized factory.
pub fn create_method_target(name: &str) -> Option<CreateMethodTarget> {
    if !CREATE_METHOD_REGEX.is_match(name) {
        return None;
    }
    let target = if name.contains("Root") {
        CreateMethodTarget::Root
    } else if name.contains("TreeWalker") {
        CreateMethodTarget::TreeWalker
    } else {
        CreateMethodTarget::FromArgument
    };
    Some(target)
}

pub fn is_verify_method(name: &str) -> bool {
    VERIFY_METHOD_REGEX.is_match(name)
}

pub fn is_test_annotation(name: &str) -> bool {
    TEST_ANNOTATIONS.contains(&name)
}

pub fn is_configuration_type(name: &str) -> bool {
    CONFIGURATION_TYPES.contains(&name)
}

pub fn is_file_handle_type(name: &str) -> bool {
    FILE_HANDLE_TYPES.contains(&name)
}

pub fn is_enum_name_accessor(name: &str) -> bool {
    ENUM_NAME_ACCESSORS.contains(&name)
}
