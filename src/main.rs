mod cli;

use clap::Parser;
use ipfilter::{ClientBuilder, Result, Source};
use log::{error, info};
use std::process::ExitCode;
use std::time::Instant;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();
    cli::log::init(&args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> Result<()> {
    let start_time = Instant::now();
    info!("IP Filter Tool - Version: {}", env!("CARGO_PKG_VERSION"));

    let source = Source::from(args.source);
    let mut builder = ClientBuilder::from_env(ClientBuilder::for_source(source));
    if let Some(service) = &args.service {
        builder.service_key(service);
    }
    let client = builder.build();

    let generated = client.generate(args.minify)?;

    if args.summary {
        eprintln!("{}", cli::output::summary_table(&client, &generated.summary));
    }

    cli::output::write_policy(&generated.document, &args.output)?;
    cli::log::policy_written(&generated, &args.output, start_time.elapsed());

    Ok(())
}
