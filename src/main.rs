//! Loopcheck CLI entry point.

use clap::Parser;
use loopcheck::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    loopcheck::init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check(args) => match cli::run_check(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Commands::Serve(args) => match cli::run_serve(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
    };

    std::process::exit(exit_code);
}
