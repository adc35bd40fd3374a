//! Error handling tests
//!
//! Tests for CLI error types and user-friendly messages.

use templatizer_cli::error::CliError;
use templatizer_config::ConfigError;
use templatizer_generation::GenerationError;

#[test]
fn test_template_not_found_is_lifted_from_generation() {
    let error: CliError = GenerationError::TemplateNotFound("test".to_string()).into();
    assert!(matches!(error, CliError::TemplateNotFound(ref name) if name == "test"));

    let msg = error.user_message();
    assert!(msg.contains("'test'"));
    assert!(msg.contains("templatizer list"));
}

#[test]
fn test_invalid_input_user_message_names_field() {
    let error: CliError = GenerationError::invalid_input("license", "argument required").into();
    let msg = error.user_message();
    assert_eq!(msg, "Invalid input for 'license': argument required");
}

#[test]
fn test_config_error_user_message() {
    let error: CliError = ConfigError::Validation("bad constant".to_string()).into();
    let msg = error.user_message();
    assert!(msg.contains("Configuration error"));
    assert!(msg.contains("bad constant"));
    assert!(msg.contains("TEMPLATIZER_"));
}

#[test]
fn test_io_error_user_message() {
    let error: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.hpp").into();
    let msg = error.user_message();
    assert!(msg.contains("File operation failed"));
    assert!(msg.contains("missing.hpp"));
}

#[test]
fn test_command_failed_user_message() {
    let error = CliError::CommandFailed {
        command: "make widget".to_string(),
        status: "exit status: 2".to_string(),
    };
    assert_eq!(
        error.user_message(),
        "Command 'make widget' failed with exit status: 2"
    );
}

#[test]
fn test_technical_details_are_debug_output() {
    let error = CliError::Internal("boom".to_string());
    assert!(error.technical_details().contains("Internal"));
}
