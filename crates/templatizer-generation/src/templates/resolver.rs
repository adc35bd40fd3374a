//! Naming-convention transforms used by token derivations
//!
//! `UpperCase` and `LowerCase` are ASCII-only: characters outside the ASCII
//! range are copied unchanged, so output never depends on the host locale.
//! The word-splitting transforms delegate to `heck`.

use serde::{Deserialize, Serialize};

/// Separator used by [`namespace_include`]
pub const INCLUDE_SEPARATOR: &str = "/";

/// Separator used by [`namespace_open`]
pub const SCOPE_SEPARATOR: &str = "::";

/// Represents a case transformation for a base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTransform {
    /// Value unchanged
    #[default]
    Verbatim,
    /// ASCII UPPERCASE (e.g., WIDGET)
    UpperCase,
    /// ASCII lowercase (e.g., widget)
    LowerCase,
    /// PascalCase (e.g., MyWidget)
    PascalCase,
    /// camelCase (e.g., myWidget)
    CamelCase,
    /// snake_case (e.g., my_widget)
    SnakeCase,
    /// kebab-case (e.g., my-widget)
    KebabCase,
}

impl CaseTransform {
    /// Apply case transformation to a string
    pub fn apply(&self, input: &str) -> String {
        use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};

        match self {
            CaseTransform::Verbatim => input.to_string(),
            CaseTransform::UpperCase => input.to_ascii_uppercase(),
            CaseTransform::LowerCase => input.to_ascii_lowercase(),
            CaseTransform::PascalCase => input.to_pascal_case(),
            CaseTransform::CamelCase => input.to_lower_camel_case(),
            CaseTransform::SnakeCase => input.to_snake_case(),
            CaseTransform::KebabCase => input.to_kebab_case(),
        }
    }
}

/// Render a namespace path as an include path: `foundation/framework/`
///
/// Segments are ASCII-lowercased. An empty path renders as an empty string.
pub fn namespace_include<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| format!("{}{}", segment.as_ref().to_ascii_lowercase(), INCLUDE_SEPARATOR))
        .collect()
}

/// Render a namespace path as scope-opening prefix: `foundation::framework::`
///
/// An empty path renders as an empty string.
pub fn namespace_open<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| format!("{}{}", segment.as_ref(), SCOPE_SEPARATOR))
        .collect()
}

/// Split a `::`-separated namespace string into segments, dropping empty ones
pub fn split_namespace(path: &str) -> Vec<String> {
    path.split(SCOPE_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
