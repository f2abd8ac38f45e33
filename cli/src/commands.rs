//! Command execution against a token service

use km_core::{Clock, TokenError, TokenService};
use serde_json::{json, Value};
use tracing::info;

use crate::args::Command;

/// Runs one command and returns the JSON document to print
pub fn execute<C: Clock>(service: &TokenService<C>, command: Command) -> Result<Value, TokenError> {
    match command {
        Command::Issue(args) => {
            let subject = args.subject();
            let pair = service.issue_pair(&subject, args.email(), &args.roles)?;
            info!(sub = %subject, roles = args.roles.len(), "Issued token pair");

            Ok(json!(pair))
        }
        Command::Decode { token, access_only } => {
            let claims = if access_only {
                service.decode_access(&token)?
            } else {
                service.decode(&token)?
            };

            Ok(json!(claims))
        }
        Command::Refresh { token } => {
            let access_token = service.refresh(&token)?;

            Ok(json!({ "access_token": access_token }))
        }
        Command::Ttl { token } => {
            let remaining = service.time_remaining(&token)?;

            Ok(json!({ "expires_in": remaining.num_seconds() }))
        }
    }
}
