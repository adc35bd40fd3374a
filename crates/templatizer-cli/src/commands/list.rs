// List template sets on the search path

use std::path::PathBuf;

use templatizer_generation::TemplateSet;

use super::{Command, CommandContext};
use crate::error::CliResult;
use crate::output::OutputStyle;

/// List template sets
pub struct ListCommand {
    context: CommandContext,
    template_paths: Vec<PathBuf>,
}

impl ListCommand {
    pub fn new(context: CommandContext, template_paths: Vec<PathBuf>) -> Self {
        Self {
            context,
            template_paths,
        }
    }

    /// Every set on the search path, sorted by name
    pub fn sets(&self) -> CliResult<Vec<TemplateSet>> {
        let registry = self.context.registry(&self.template_paths)?;
        Ok(registry.iter().cloned().collect())
    }
}

impl Command for ListCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let sets = self.sets()?;

        if sets.is_empty() {
            println!(
                "{}",
                style.info("No template sets found. Add directories with --templates or template_paths in the config file.")
            );
            return Ok(());
        }

        println!("{}", style.section("Template sets"));
        for set in &sets {
            let description = set.descriptor.description.as_deref().unwrap_or("");
            println!(
                "{}",
                style.list_item(&format!("{}  {}", style.code(set.name()), description))
            );
            if !self.context.quiet {
                println!("      {}", set.directory.display());
            }
        }
        Ok(())
    }
}
