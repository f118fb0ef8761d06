use clap::Parser;
use litnet_cli::{CliArgs, LitnetCli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = LitnetCli::from_args("litnet", &args).and_then(|cli| cli.run(args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
