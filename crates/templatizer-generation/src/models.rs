//! Core data models for template generation

use std::{
    collections::BTreeMap,
    path::PathBuf,
};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GenerationError, Result},
    templates::{
        catalog::{Derivation, TokenCatalog},
        resolver::split_namespace,
    },
};

/// Caller-supplied values every token derives from
///
/// Immutable for the duration of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseInputs {
    /// Base identifier, conventionally PascalCase (e.g. `Widget`)
    pub name: String,
    /// Nested scope, outermost first
    #[serde(default)]
    pub namespace_path: Vec<String>,
    /// Year stamp, rendered as plain text
    #[serde(default)]
    pub year: String,
    /// Month stamp, rendered as plain text
    #[serde(default)]
    pub month: String,
    /// Date stamp for `DATE`
    #[serde(default)]
    pub date: Option<String>,
    /// Directory of the template set, for `TPLDIR`
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
    /// Free-form named values for argument-derived tokens
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}

impl BaseInputs {
    /// Create inputs with the given name and no stamps
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create inputs stamped with the current local year, month and date
    pub fn now(name: impl Into<String>) -> Self {
        Self::new(name).stamped_at(Local::now())
    }

    /// Stamp year (`2031`), month (`June`) and date (`14/06/31`) from a timestamp
    pub fn stamped_at(mut self, at: DateTime<Local>) -> Self {
        self.year = at.format("%Y").to_string();
        self.month = at.format("%B").to_string();
        self.date = Some(at.format("%d/%m/%y").to_string());
        self
    }

    /// Set the namespace path from segments
    pub fn with_namespace<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace_path = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Set the namespace path from a `::`-separated string
    pub fn with_namespace_str(mut self, path: &str) -> Self {
        self.namespace_path = split_namespace(path);
        self
    }

    /// Set the year stamp
    pub fn with_year(mut self, year: impl ToString) -> Self {
        self.year = year.to_string();
        self
    }

    /// Set the month stamp
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = month.into();
        self
    }

    /// Set the date stamp
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the template set directory
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Add a named argument
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Check the inputs every catalog depends on
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(GenerationError::invalid_input("name", "must not be empty"));
        }
        if let Some(index) = self.namespace_path.iter().position(|s| s.is_empty()) {
            return Err(GenerationError::invalid_input(
                "namespace_path",
                format!("segment {} is empty", index),
            ));
        }
        Ok(())
    }
}

/// Result of rendering one template text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Rendered content
    pub content: String,
    /// Tokens that were substituted, in first-seen order
    pub placeholders_used: Vec<String>,
    /// Marker-shaped names not present in the catalog, left verbatim
    pub unknown_markers: Vec<String>,
}

/// One step of a template set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Render `source` (relative to the set directory) into `target`
    Render {
        /// Template file, relative to the descriptor
        source: String,
        /// Output path; may contain markers
        target: String,
    },
    /// Run a shell command; may contain markers
    Command(String),
}

/// JSON descriptor of a template set (`*.templatizer`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Unique name used to select the set
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Additional derived tokens
    #[serde(default)]
    pub tokens: BTreeMap<String, Derivation>,
    /// Additional literal tokens
    #[serde(default)]
    pub constants: BTreeMap<String, String>,
    /// Argument keys that must be supplied
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Steps, in execution order
    pub actions: Vec<Action>,
}

impl TemplateDescriptor {
    /// Default vocabulary extended with this descriptor's tokens and constants
    ///
    /// A token or constant that collides with another name fails with
    /// [`GenerationError::DuplicateToken`].
    pub fn catalog(&self) -> Result<TokenCatalog> {
        self.catalog_over(TokenCatalog::new())
    }

    /// Layer this descriptor's tokens and constants over `base`
    ///
    /// Names in `base` outside the default vocabulary (site-wide constants)
    /// are replaced by the descriptor's own declarations. Redeclaring a
    /// default token, or declaring a name as both token and constant, fails
    /// with [`GenerationError::DuplicateToken`].
    pub fn catalog_over(&self, mut base: TokenCatalog) -> Result<TokenCatalog> {
        let defaults = TokenCatalog::new();
        let constants = self
            .constants
            .iter()
            .map(|(name, value)| (name, Derivation::Constant(value.clone())));
        let tokens = self
            .tokens
            .iter()
            .map(|(name, derivation)| (name, derivation.clone()));

        for (name, derivation) in tokens.chain(constants) {
            if defaults.contains(name)
                || (self.tokens.contains_key(name) && self.constants.contains_key(name))
            {
                return Err(GenerationError::DuplicateToken(name.clone()));
            }
            base.set(name.clone(), derivation)?;
        }
        Ok(base)
    }

    /// Check that every declared argument is supplied
    pub fn check_arguments(&self, inputs: &BaseInputs) -> Result<()> {
        match self
            .arguments
            .iter()
            .find(|key| !inputs.arguments.contains_key(key.as_str()))
        {
            Some(missing) => Err(GenerationError::invalid_input(
                missing.as_str(),
                "argument required",
            )),
            None => Ok(()),
        }
    }
}

/// A loaded descriptor together with the directory it lives in
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSet {
    /// Parsed descriptor
    pub descriptor: TemplateDescriptor,
    /// Directory that `Render` sources are relative to
    pub directory: PathBuf,
}

impl TemplateSet {
    /// Name of the set
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// A fully rendered step, ready for the caller to execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedAction {
    /// Write `content` to `path`
    WriteFile {
        /// Rendered output path
        path: PathBuf,
        /// Rendered file content
        content: String,
    },
    /// Run `command` through the platform shell
    RunCommand {
        /// Rendered command line
        command: String,
    },
}

/// Output of planning one template set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPlan {
    /// Name of the planned set
    pub template: String,
    /// Steps, in declaration order
    pub actions: Vec<PlannedAction>,
    /// Unknown markers seen across all rendered texts
    pub unknown_markers: Vec<String>,
}
