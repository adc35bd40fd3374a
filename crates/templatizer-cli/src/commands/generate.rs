// Plan and execute a template set

use std::path::{Path, PathBuf};

use templatizer_generation::{
    plan_set_with, templates::is_descriptor, GenerationPlan, PlannedAction, TemplateLoader,
    TemplateSet,
};
use tracing::warn;

use super::{Command, CommandContext};
use crate::error::CliResult;
use crate::executor::{ActionOutcome, ExecutionReport, PlanExecutor};
use crate::output::OutputStyle;
use crate::router::StampArgs;

/// Generate files from a template set
pub struct GenerateCommand {
    context: CommandContext,
    set: String,
    name: String,
    stamps: StampArgs,
    template_paths: Vec<PathBuf>,
    target_dir: PathBuf,
    dry_run: bool,
}

impl GenerateCommand {
    pub fn new(context: CommandContext, set: String, name: String, stamps: StampArgs) -> Self {
        Self {
            context,
            set,
            name,
            stamps,
            template_paths: Vec::new(),
            target_dir: PathBuf::from("."),
            dry_run: false,
        }
    }

    /// Search these directories before the configured ones
    pub fn with_template_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.template_paths = paths;
        self
    }

    /// Generate into `dir`
    pub fn with_target_dir(mut self, dir: PathBuf) -> Self {
        self.target_dir = dir;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Find the set: a descriptor path is loaded directly, anything else is
    /// looked up by name on the search path
    pub fn load_set(&self) -> CliResult<TemplateSet> {
        let path = Path::new(&self.set);
        if is_descriptor(path) && path.is_file() {
            return Ok(TemplateLoader::load_from_file(path)?);
        }
        let registry = self.context.registry(&self.template_paths)?;
        Ok(registry.find(&self.set)?.clone())
    }

    /// Render the whole set without touching the target directory
    pub fn plan(&self) -> CliResult<GenerationPlan> {
        let set = self.load_set()?;
        let inputs = self.context.base_inputs(&self.name, &self.stamps);
        let base = self.context.config.base_catalog()?;
        let plan = plan_set_with(&set, &inputs, &base)?;

        for marker in &plan.unknown_markers {
            warn!(marker = %marker, template = %plan.template, "unknown marker left in place");
        }
        Ok(plan)
    }

    /// Plan and execute
    pub fn run(&self) -> CliResult<ExecutionReport> {
        let plan = self.plan()?;
        PlanExecutor::new(&self.target_dir)
            .with_dry_run(self.dry_run)
            .execute(&plan)
    }

    fn print_plan(&self, style: &OutputStyle, report: &ExecutionReport) {
        for outcome in &report.outcomes {
            if let ActionOutcome::Planned(action) = outcome {
                match action {
                    PlannedAction::WriteFile { path, content } => {
                        println!("{}", style.section(&path.display().to_string()));
                        print!("{}", content);
                        if !content.ends_with('\n') {
                            println!();
                        }
                    }
                    PlannedAction::RunCommand { command } => {
                        println!("{}", style.section("command"));
                        println!("$ {}", style.code(command));
                    }
                }
            }
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self) -> CliResult<()> {
        let report = self.run()?;
        let style = OutputStyle::default();

        if report.dry_run {
            self.print_plan(&style, &report);
            return Ok(());
        }

        if !self.context.quiet {
            println!(
                "{}",
                style.success(&format!(
                    "Generated '{}': {} written, {} skipped, {} commands",
                    self.set,
                    report.files_written(),
                    report.files_skipped(),
                    report.commands_run()
                ))
            );
        }
        Ok(())
    }
}
