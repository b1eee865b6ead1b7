use ipfilter::lambda::Runtime;
use ipfilter::Client;
use log::{error, info};
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Lambda Function Entry Point
-------------------------------------------------------------------------------------------------*/

// Build for the `provided.al2023` runtime and package the binary as `bootstrap`.

fn main() -> ExitCode {
    stderrlog::new()
        .module("ipfilter")
        .module(module_path!())
        .verbosity(log::LevelFilter::Info)
        .init()
        .unwrap_or_else(|error| eprintln!("Unable to initialize logging: {error}"));

    let client = Client::new();
    info!("Serving {} `{}` policies", client.source(), client.service_key());

    match Runtime::from_env().and_then(|runtime| runtime.run(&client)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
