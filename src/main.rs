use std::process;

use clap::Parser;

fn main() {
    let cli = rabin_cipher::cli::Cli::parse();
    if let Err(e) = rabin_cipher::cli::run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
