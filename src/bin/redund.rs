use std::process;

use clap::Parser;

use redund_core::cli::Cli;
use redund_core::merge;

fn main() {
    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("redund: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = merge::run(&config) {
        eprintln!("redund: {e}");
        process::exit(1);
    }
}
