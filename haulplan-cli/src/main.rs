//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use haulplan_cli::CliError;

fn main() {
    haulplan_cli::init_logging();
    match haulplan_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("haulplan: {err}");
            std::process::exit(1);
        }
    }
}
