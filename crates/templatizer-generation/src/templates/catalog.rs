//! Token catalog: the vocabulary of markers and how each one resolves
//!
//! A [`TokenCatalog`] maps token names to [`Derivation`]s. Resolving it against
//! [`BaseInputs`] produces a [`ResolvedCatalog`], the only thing the
//! substitution engine ever looks at.

use std::collections::{hash_map, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{GenerationError, Result},
    models::BaseInputs,
    templates::resolver::{namespace_include, namespace_open, CaseTransform},
};

/// How a token's value is computed from [`BaseInputs`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// `name` with a case transform applied
    Name(CaseTransform),
    /// `namespace_path` as `seg1/seg2/`, lowercased
    NamespaceInclude,
    /// `namespace_path` as `seg1::seg2::`
    NamespaceOpen,
    /// `year` as text
    Year,
    /// `month` as text
    Month,
    /// `date` as text, empty when absent
    Date,
    /// `template_dir` as text, empty when absent
    TemplateDir,
    /// A caller-supplied argument with a case transform applied
    Argument {
        /// Key in [`BaseInputs::arguments`]
        key: String,
        /// Transform applied to the argument value
        #[serde(default)]
        transform: CaseTransform,
    },
    /// Fixed text
    Constant(String),
}

impl Derivation {
    /// Compute the value for the given inputs
    pub fn derive(&self, inputs: &BaseInputs) -> Result<String> {
        let value = match self {
            Derivation::Name(transform) => transform.apply(&inputs.name),
            Derivation::NamespaceInclude => namespace_include(&inputs.namespace_path),
            Derivation::NamespaceOpen => namespace_open(&inputs.namespace_path),
            Derivation::Year => inputs.year.clone(),
            Derivation::Month => inputs.month.clone(),
            Derivation::Date => inputs.date.clone().unwrap_or_default(),
            Derivation::TemplateDir => inputs
                .template_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            Derivation::Argument { key, transform } => {
                let value = inputs.arguments.get(key).ok_or_else(|| {
                    GenerationError::invalid_input(key.as_str(), "argument required")
                })?;
                transform.apply(value)
            }
            Derivation::Constant(text) => text.clone(),
        };
        Ok(value)
    }
}

/// A named token and its derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDefinition {
    /// Token name as it appears between delimiters
    pub name: String,
    /// How the value is computed
    pub derivation: Derivation,
}

/// Check whether `name` is a well-formed token name
///
/// Token names are non-empty, consist of ASCII uppercase letters and hyphens,
/// and neither start nor end with a hyphen.
pub fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'-')
}

/// Validate a token name, returning [`GenerationError::InvalidToken`] if malformed
pub fn validate_token_name(name: &str) -> Result<()> {
    if is_token_name(name) {
        Ok(())
    } else {
        Err(GenerationError::InvalidToken(name.to_string()))
    }
}

/// Ordered set of token definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCatalog {
    tokens: Vec<TokenDefinition>,
}

impl TokenCatalog {
    /// Create a catalog with the default vocabulary
    pub fn new() -> Self {
        let tokens = [
            ("NAME", Derivation::Name(CaseTransform::Verbatim)),
            ("NAME-UPCASE", Derivation::Name(CaseTransform::UpperCase)),
            ("NAME-LOWCASE", Derivation::Name(CaseTransform::LowerCase)),
            ("NAMESPACE-INC", Derivation::NamespaceInclude),
            ("NAMESPACE-OPEN", Derivation::NamespaceOpen),
            ("YEAR", Derivation::Year),
            ("MONTH", Derivation::Month),
            ("DATE", Derivation::Date),
            ("TPLDIR", Derivation::TemplateDir),
        ]
        .into_iter()
        .map(|(name, derivation)| TokenDefinition {
            name: name.to_string(),
            derivation,
        })
        .collect();

        Self { tokens }
    }

    /// Create a catalog with no tokens
    pub fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Register a new token
    ///
    /// Fails if the name is malformed or already registered.
    pub fn register(&mut self, name: impl Into<String>, derivation: Derivation) -> Result<()> {
        let name = name.into();
        validate_token_name(&name)?;
        if self.contains(&name) {
            return Err(GenerationError::DuplicateToken(name));
        }
        self.tokens.push(TokenDefinition { name, derivation });
        Ok(())
    }

    /// Register or replace a token
    pub fn set(&mut self, name: impl Into<String>, derivation: Derivation) -> Result<()> {
        let name = name.into();
        validate_token_name(&name)?;
        match self.tokens.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.derivation = derivation,
            None => self.tokens.push(TokenDefinition { name, derivation }),
        }
        Ok(())
    }

    /// Register several tokens, stopping at the first failure
    pub fn extend<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Derivation)>,
        S: Into<String>,
    {
        for (name, derivation) in tokens {
            self.register(name, derivation)?;
        }
        Ok(())
    }

    /// Look up a token's derivation
    pub fn get(&self, name: &str) -> Option<&Derivation> {
        self.tokens
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.derivation)
    }

    /// Check if a token is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Token names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.name.as_str())
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> &[TokenDefinition] {
        &self.tokens
    }

    /// Number of registered tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are registered
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resolve every token eagerly against `inputs`
    ///
    /// Inputs are validated first; any failing derivation aborts the whole
    /// resolution so no partial catalog is ever returned.
    pub fn resolve(&self, inputs: &BaseInputs) -> Result<ResolvedCatalog> {
        inputs.validate()?;

        let mut values = HashMap::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let value = token.derivation.derive(inputs)?;
            values.insert(token.name.clone(), value);
        }

        debug!(tokens = values.len(), name = %inputs.name, "resolved token catalog");
        Ok(ResolvedCatalog { values })
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the default vocabulary against `inputs`
pub fn resolve_catalog(inputs: &BaseInputs) -> Result<ResolvedCatalog> {
    TokenCatalog::new().resolve(inputs)
}

/// Token name to resolved value, fixed for one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCatalog {
    values: HashMap<String, String>,
}

impl ResolvedCatalog {
    /// Resolved value of a token
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether the token resolved in this catalog
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of resolved tokens
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolved token names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over `(name, value)` pairs in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ResolvedCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
