// Templatizer CLI Library

pub mod commands;
pub mod error;
pub mod executor;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use executor::{ActionOutcome, ExecutionReport, PlanExecutor};
pub use logging::{init_logging, VerbosityLevel};
pub use router::{Cli, CommandRouter, Commands, StampArgs};
