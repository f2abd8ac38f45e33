use std::process::ExitCode;

use clap::Parser;
use km_cli::{error_response, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let response = error_response(&err);
            match serde_json::to_string_pretty(&response) {
                Ok(report) => eprintln!("{}", report),
                Err(_) => eprintln!("{:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
