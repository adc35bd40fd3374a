// Inspect the token vocabulary

use std::{fs, path::PathBuf};

use templatizer_generation::{scan_markers, Derivation};

use super::{Command, CommandContext};
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;
use crate::router::StampArgs;

/// One token as shown by `templatizer tokens`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub name: String,
    /// Derivation in descriptor (JSON) notation
    pub derivation: String,
    /// Resolved value, when a base name was given
    pub value: Option<String>,
}

/// A marker found in a template file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMarker {
    pub name: String,
    pub known: bool,
}

/// List tokens, or the markers one template uses
pub struct TokensCommand {
    context: CommandContext,
    name: Option<String>,
    stamps: StampArgs,
    scan: Option<PathBuf>,
}

impl TokensCommand {
    pub fn new(context: CommandContext, name: Option<String>, stamps: StampArgs) -> Self {
        Self {
            context,
            name,
            stamps,
            scan: None,
        }
    }

    /// Scan this template instead of listing the vocabulary
    pub fn with_scan(mut self, scan: Option<PathBuf>) -> Self {
        self.scan = scan;
        self
    }

    /// Every token in catalog order, resolved when a name is set
    pub fn rows(&self) -> CliResult<Vec<TokenRow>> {
        let catalog = self.context.config.base_catalog()?;
        let resolved = match &self.name {
            Some(name) => Some(catalog.resolve(&self.context.base_inputs(name, &self.stamps))?),
            None => None,
        };

        catalog
            .definitions()
            .iter()
            .map(|definition| {
                Ok(TokenRow {
                    name: definition.name.clone(),
                    derivation: describe(&definition.derivation)?,
                    value: resolved
                        .as_ref()
                        .and_then(|r| r.get(&definition.name))
                        .map(str::to_string),
                })
            })
            .collect()
    }

    /// Markers used by `path`, in first-seen order, flagged known or unknown
    pub fn scanned(&self, path: &PathBuf) -> CliResult<Vec<ScannedMarker>> {
        let catalog = self.context.config.base_catalog()?;
        let text = fs::read_to_string(path)?;
        Ok(scan_markers(&text)
            .into_iter()
            .map(|name| ScannedMarker {
                known: catalog.contains(&name),
                name,
            })
            .collect())
    }
}

fn describe(derivation: &Derivation) -> CliResult<String> {
    serde_json::to_string(derivation).map_err(|e| CliError::Internal(e.to_string()))
}

impl Command for TokensCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();

        if let Some(path) = &self.scan {
            println!("{}", style.section(&format!("Markers in {}", path.display())));
            for marker in self.scanned(path)? {
                let line = style.list_item(&style.code(&marker.name));
                if marker.known {
                    println!("{}", line);
                } else {
                    println!("{}  {}", line, style.warning("unknown"));
                }
            }
            return Ok(());
        }

        println!("{}", style.section("Tokens"));
        for row in self.rows()? {
            let detail = match &row.value {
                Some(value) => format!("{:?}", value),
                None => row.derivation.clone(),
            };
            println!("{}", style.key_value(&row.name, &detail));
        }
        Ok(())
    }
}
