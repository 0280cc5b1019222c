//! CLI module for ratepoll
//!
//! Only `-h/--help` and `-V/--version` are accepted; everything else is
//! configured through environment variables.

use clap::Parser;

/// ratepoll - Rate-limited HTTP health poller
#[derive(Parser, Debug)]
#[command(name = "ratepoll")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    URL          Target URL to poll (default: http://localhost:8080)
    RPS          Requests per second, float or integer (default: 1)
    LOG_LEVEL    Log level (default: info, RUST_LOG takes precedence)

A liveness listener answering 404 runs on port 48081.
"#)]
pub struct Cli;
