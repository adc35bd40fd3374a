#![warn(missing_docs)]

//! Template-driven file generation for templatizer
//!
//! Resolves a catalog of `%TOKEN%` markers from a handful of base inputs and
//! substitutes them into opaque template text, copying every other byte
//! verbatim. Template sets bundle several templates and commands behind a
//! JSON descriptor; planning a set renders everything up front and leaves
//! execution to the caller.

pub mod error;
pub mod generation_manager;
pub mod models;
pub mod templates;

// Re-export public API
pub use error::{GenerationError, Result};
pub use generation_manager::{plan_set, plan_set_with, GenerationManager, TemplateRegistry};
pub use models::{
    Action, BaseInputs, GenerationPlan, PlannedAction, RenderResult, TemplateDescriptor,
    TemplateSet,
};
pub use templates::{
    render, resolve_catalog, scan_markers, substitute, substitute_all, CaseTransform,
    Derivation, ResolvedCatalog, TemplateEngine, TemplateLoader, TokenCatalog,
    MARKER_DELIMITER,
};
