//! CLI integration tests
//!
//! The CLI only supports -h/--help and -V/--version flags.
//! The poll target and rate come from environment variables.

use clap::Parser;
use ratepoll::cli::Cli;

#[test]
fn test_version_available() {
    let result = Cli::try_parse_from(["ratepoll", "--version"]);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_help_available() {
    let result = Cli::try_parse_from(["ratepoll", "--help"]);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_help_lists_environment_variables() {
    let err = Cli::try_parse_from(["ratepoll", "--help"]).unwrap_err();
    let help = err.to_string();
    assert!(help.contains("URL"));
    assert!(help.contains("RPS"));
    assert!(help.contains("48081"));
}

#[test]
fn test_no_args_starts_poller() {
    let cli = Cli::try_parse_from(["ratepoll"]);
    assert!(cli.is_ok());
}

#[test]
fn test_unknown_arg_rejected() {
    let result = Cli::try_parse_from(["ratepoll", "--url", "http://example.com"]);
    assert!(result.is_err());
}
