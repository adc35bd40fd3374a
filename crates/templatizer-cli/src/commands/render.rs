// Substitute markers in a single template file

use std::{fs, io::Write, path::PathBuf};

use templatizer_generation::{RenderResult, TemplateEngine};
use tracing::warn;

use super::{Command, CommandContext};
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::router::StampArgs;

/// Render one template file to stdout or to a file
pub struct RenderCommand {
    context: CommandContext,
    template: PathBuf,
    name: String,
    stamps: StampArgs,
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub fn new(
        context: CommandContext,
        template: PathBuf,
        name: String,
        stamps: StampArgs,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            context,
            template,
            name,
            stamps,
            output,
        }
    }

    /// Resolve the catalog and substitute the template
    ///
    /// `TPLDIR` is the directory containing the template file.
    pub fn render_template(&self) -> CliResult<RenderResult> {
        let mut inputs = self.context.base_inputs(&self.name, &self.stamps);
        if let Some(dir) = self.template.parent().filter(|d| !d.as_os_str().is_empty()) {
            inputs = inputs.with_template_dir(dir);
        }

        // Inputs are validated before the template is read
        let catalog = self.context.config.base_catalog()?.resolve(&inputs)?;
        let source = fs::read_to_string(&self.template)?;

        Ok(TemplateEngine::new(catalog).render(&source))
    }
}

impl Command for RenderCommand {
    fn execute(&self) -> CliResult<()> {
        let result = self.render_template()?;
        for marker in &result.unknown_markers {
            warn!(marker = %marker, template = %self.template.display(), "unknown marker left in place");
        }

        match &self.output {
            Some(path) => {
                fs::write(path, &result.content)?;
                if !self.context.quiet {
                    let style = OutputStyle::default();
                    println!(
                        "{}",
                        style.success(&format!("Rendered {}", style.code(&path.display().to_string())))
                    );
                }
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.content.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
