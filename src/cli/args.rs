use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use ipfilter::Source;
use std::convert::Infallible;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Generate an AWS deny policy from a provider's published IP ranges.", long_about = None)]
pub struct Args {
    /// Source provider publishing the IP ranges
    #[arg(long, value_enum, default_value_t = SourceProvider::Github)]
    pub source: SourceProvider,

    /// Metadata key listing the service's IP ranges [default: the source's service key]
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Output file for the generated policy; `-` or an empty path writes to stdout
    #[arg(short = 'o', long, default_value = "policy.json", value_parser = parse_output)]
    pub output: PathBuf,

    /// Minify the output JSON policy
    #[arg(short = 'm', long)]
    pub minify: bool,

    /// Print a summary of the extracted prefixes to stderr
    #[arg(long)]
    pub summary: bool,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

fn parse_output(output: &str) -> Result<PathBuf, Infallible> {
    if output.is_empty() {
        Ok(PathBuf::from("-"))
    } else {
        Ok(PathBuf::from(output))
    }
}

/*--------------------------------------------------------------------------------------
  Source Provider
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SourceProvider {
    /// GitHub meta API (https://api.github.com/meta)
    Github,
}

impl From<SourceProvider> for Source {
    fn from(provider: SourceProvider) -> Self {
        match provider {
            SourceProvider::Github => Source::GitHub,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
