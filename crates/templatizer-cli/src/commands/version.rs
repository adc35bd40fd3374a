// Display version information

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Display version information
pub struct VersionCommand;

impl VersionCommand {
    pub fn new() -> Self {
        Self
    }

    /// Get version information
    pub fn version_info() -> String {
        format!(
            "Templatizer v{}\n\nBuild Information:\n  Profile: {}\n  Marker delimiter: {}",
            env!("CARGO_PKG_VERSION"),
            if cfg!(debug_assertions) { "debug" } else { "release" },
            templatizer_generation::MARKER_DELIMITER
        )
    }
}

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for VersionCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        println!("{}", style.header(&Self::version_info()));
        Ok(())
    }
}
