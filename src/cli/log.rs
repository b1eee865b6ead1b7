use clap_verbosity_flag::{InfoLevel, Verbosity};
use ipfilter::GeneratedPolicy;
use log::info;
use std::path::Path;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/// Log to stderr at the requested verbosity; only this crate's records are shown.
pub fn init(verbosity: &Verbosity<InfoLevel>) {
    stderrlog::new()
        .module("ipfilter")
        .verbosity(verbosity.log_level_filter())
        .init()
        .unwrap_or_else(|error| eprintln!("Unable to initialize logging: {error}"));
}

/*--------------------------------------------------------------------------------------
  Policy Written
--------------------------------------------------------------------------------------*/

pub fn policy_written(generated: &GeneratedPolicy, output: &Path, elapsed: Duration) {
    let prefix_count = generated.summary.ipv4;
    let byte_count = generated.document.len();

    if output.as_os_str() == "-" {
        info!("Policy with {prefix_count} IPv4 prefix(es) written to stdout ({byte_count} bytes)");
    } else {
        info!("Policy with {prefix_count} IPv4 prefix(es) written to {output:?} ({byte_count} bytes)");
    }
    info!("Time taken: {elapsed:?}");
}
