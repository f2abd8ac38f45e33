//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

/// Email used when none is given on the command line
pub const DEFAULT_EMAIL: &str = "default@mail.ru";

/// Issue and inspect RS256 access/refresh tokens
#[derive(Debug, Parser)]
#[command(name = "keymint", version, about)]
pub struct Cli {
    /// Configuration file (TOML); must exist when given
    #[arg(long, short = 'c', global = true, env = "KEYMINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Private key PEM file, overrides `keys.private_key_path`
    #[arg(long, global = true)]
    pub private_key: Option<PathBuf>,

    /// Public key PEM file, overrides `keys.public_key_path`
    #[arg(long, global = true)]
    pub public_key: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Issue an access/refresh token pair (default)
    Issue(IssueArgs),

    /// Verify a token and print its claims
    Decode {
        token: String,

        /// Reject refresh tokens
        #[arg(long)]
        access_only: bool,
    },

    /// Exchange a refresh token for a new access token
    Refresh { token: String },

    /// Print the seconds left before a token expires
    Ttl { token: String },
}

impl Default for Command {
    fn default() -> Self {
        Command::Issue(IssueArgs::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct IssueArgs {
    /// User id; a random UUID when omitted
    #[arg(long = "user-id", short = 'i', visible_alias = "user_id")]
    pub user_id: Option<Uuid>,

    /// Display email
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Roles, in order
    #[arg(long = "roles", short = 'r', visible_alias = "role", num_args = 0..)]
    pub roles: Vec<String>,
}

impl IssueArgs {
    /// Subject to issue for, generating one when none was given
    pub fn subject(&self) -> String {
        self.user_id.unwrap_or_else(Uuid::new_v4).to_string()
    }

    /// Email to issue for, falling back to [`DEFAULT_EMAIL`] when absent or empty
    pub fn email(&self) -> &str {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(DEFAULT_EMAIL)
    }
}
