//! Command line front end for KeyMint
//!
//! Loads configuration and the RSA key pair, builds a token service and
//! prints the result of one command as JSON on stdout. Logs and error
//! reports go to stderr.

pub mod app;
pub mod args;
pub mod commands;
pub mod logging;

pub use app::{build_service, error_response, run};
pub use args::{Cli, Command, IssueArgs};
