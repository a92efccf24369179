use std::path::PathBuf;

use clap::Parser;

use crate::error::{CliError, CliResult};
use crate::merge::MergeConfig;

/// k-way external merge and redundancy elimination for sorted LEB36 profile
/// streams.
#[derive(Parser, Debug)]
#[command(name = "redund", about = "Merge and deduplicate sorted LEB36 profile files")]
pub struct Cli {
    /// Directory of `*.leb36.renumbered` inputs, or a single such file
    input: PathBuf,

    /// Output data file (single-file mode) or output basename (segmented mode)
    output: PathBuf,

    /// Skip rotation search; compare forward vs. reverse-complement only
    #[arg(short = 'i', long = "identical-only")]
    identical_only: bool,

    /// Disable output segment rolling; write one data/index file pair
    #[arg(short = 'n', long = "single-file")]
    single_file: bool,

    /// Print progress diagnostics to stderr (also enabled by DEBUG=1)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    /// Builds the merge driver's runtime configuration from parsed arguments.
    /// The positional arguments are required by `clap`, so `BadArguments`
    /// here covers the remaining case: an output path with no determinable
    /// basename in segmented mode (checked by the driver itself when it
    /// opens the output).
    pub fn into_config(self) -> CliResult<MergeConfig> {
        if self.input.as_os_str().is_empty() || self.output.as_os_str().is_empty() {
            return Err(CliError::BadArguments);
        }
        Ok(MergeConfig {
            input: self.input,
            output: self.output,
            identical_only: self.identical_only,
            single_file: self.single_file,
            verbose: self.verbose,
        })
    }
}
