//! Token catalog and marker substitution
//!
//! Provides the token vocabulary, naming-convention transforms, the
//! substitution pass and template set loading.

pub mod catalog;
pub mod engine;
pub mod loader;
pub mod resolver;

// Re-export public API
pub use catalog::{
    is_token_name, resolve_catalog, validate_token_name, Derivation, ResolvedCatalog,
    TokenCatalog, TokenDefinition,
};
pub use engine::{
    render, scan_markers, substitute, substitute_all, Scanner, Segment, TemplateEngine,
    MARKER_DELIMITER,
};
pub use loader::{is_descriptor, TemplateLoader, DESCRIPTOR_EXTENSION};
pub use resolver::{namespace_include, namespace_open, split_namespace, CaseTransform};
