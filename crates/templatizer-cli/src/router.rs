// Command routing and dispatch

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::*;
use crate::error::CliResult;

/// Templatizer - generate files from `%TOKEN%` templates
#[derive(Parser, Debug)]
#[command(name = "templatizer")]
#[command(bin_name = "templatizer")]
#[command(about = "Generate files from templates with %TOKEN% markers")]
#[command(
    long_about = "Templatizer: a template-driven file generator.\n\nTemplates are plain text with %TOKEN% markers such as %NAME%, %NAME-UPCASE% or %NAMESPACE-OPEN%. Every marker is replaced by a value derived from a base name, a namespace path and date stamps; everything else is copied byte for byte.\n\nQuick Start:\n  • templatizer list                          Show the available template sets\n  • templatizer generate test --name Widget   Generate files from a set\n  • templatizer render file.hpp --name Widget Substitute one file to stdout\n  • templatizer tokens --name Widget          Show every token and its value"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: <config dir>/templatizer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Substitute markers in a single template file
    #[command(about = "Substitute markers in one template file")]
    Render {
        /// Template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Base name, e.g. Widget
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        stamps: StampArgs,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate files from a template set
    #[command(about = "Plan and execute a template set in the current directory")]
    Generate {
        /// Template set name, or a path to a .templatizer descriptor
        #[arg(value_name = "SET")]
        set: String,

        /// Base name, e.g. Widget
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        stamps: StampArgs,

        /// Extra directories searched for template sets
        #[arg(short = 't', long = "templates", value_name = "DIR")]
        template_paths: Vec<PathBuf>,

        /// Directory to generate into (default: current directory)
        #[arg(short = 'C', long, value_name = "DIR")]
        directory: Option<PathBuf>,

        /// Print the plan without writing files or running commands
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the token vocabulary
    #[command(about = "List tokens, with resolved values when a name is given")]
    Tokens {
        /// Base name to resolve values for
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        stamps: StampArgs,

        /// List the markers used by this template file instead
        #[arg(long, value_name = "TEMPLATE")]
        scan: Option<PathBuf>,
    },

    /// List template sets
    #[command(about = "List template sets found in the configured paths")]
    List {
        /// Extra directories searched for template sets
        #[arg(short = 't', long = "templates", value_name = "DIR")]
        template_paths: Vec<PathBuf>,
    },

    /// Show version information
    #[command(about = "Show version information")]
    Version,
}

/// Base inputs besides the name
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StampArgs {
    /// Namespace path, `::`-separated (e.g. foundation::framework)
    #[arg(long, value_name = "PATH")]
    pub namespace: Option<String>,

    /// Year stamp (default: current year)
    #[arg(long)]
    pub year: Option<String>,

    /// Month stamp (default: current month name)
    #[arg(long)]
    pub month: Option<String>,

    /// Date stamp (default: today as dd/mm/yy)
    #[arg(long)]
    pub date: Option<String>,

    /// Template argument, repeatable
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub arguments: Vec<(String, String)>,
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        Some(_) => Err(format!("missing key in `{}`", s)),
        None => Err(format!("expected KEY=VALUE, got `{}`", s)),
    }
}

/// Route and execute commands
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli)
    }

    /// Execute a parsed command line
    pub fn execute(cli: &Cli) -> CliResult<()> {
        if let Commands::Version = cli.command {
            return VersionCommand::new().execute();
        }

        let context = CommandContext::load(cli.config.as_deref(), cli.quiet)?;

        match &cli.command {
            Commands::Render {
                template,
                name,
                stamps,
                output,
            } => RenderCommand::new(
                context,
                template.clone(),
                name.clone(),
                stamps.clone(),
                output.clone(),
            )
            .execute(),
            Commands::Generate {
                set,
                name,
                stamps,
                template_paths,
                directory,
                dry_run,
            } => {
                let target_dir = match directory {
                    Some(dir) => dir.clone(),
                    None => std::env::current_dir()?,
                };
                GenerateCommand::new(context, set.clone(), name.clone(), stamps.clone())
                    .with_template_paths(template_paths.clone())
                    .with_target_dir(target_dir)
                    .with_dry_run(*dry_run)
                    .execute()
            }
            Commands::Tokens { name, stamps, scan } => {
                TokensCommand::new(context, name.clone(), stamps.clone())
                    .with_scan(scan.clone())
                    .execute()
            }
            Commands::List { template_paths } => {
                ListCommand::new(context, template_paths.clone()).execute()
            }
            Commands::Version => VersionCommand::new().execute(),
        }
    }
}
