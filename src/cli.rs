// Command-line front-end
// Stands in for the original graphical collaborator: parses parameters,
// drives the file operations and presents validation reports

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use num_bigint::BigInt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::rabin::{validate_parameters, RabinParams};
use crate::util::{self, block_width, FileSummary};

#[derive(Debug, Parser)]
#[command(
    name = "rabin_cipher",
    version,
    about = "Rabin public-key byte-block cipher for files"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt a plaintext file into fixed-width ciphertext blocks
    Encrypt {
        #[command(flatten)]
        params: ParamArgs,
        /// Plaintext input file
        input: PathBuf,
        /// Ciphertext output file
        output: PathBuf,
    },
    /// Decrypt a ciphertext file produced with the same parameters
    Decrypt {
        #[command(flatten)]
        params: ParamArgs,
        /// Ciphertext input file
        input: PathBuf,
        /// Plaintext output file
        output: PathBuf,
    },
    /// Check a parameter set and report every violated rule
    Validate {
        #[command(flatten)]
        params: ParamArgs,
    },
}

/// The cipher parameters, shared by every subcommand.
#[derive(Debug, Args)]
pub struct ParamArgs {
    /// First prime, congruent to 3 mod 4
    #[arg(short, long, value_parser = parse_bigint)]
    pub p: BigInt,

    /// Second prime, congruent to 3 mod 4 and distinct from p
    #[arg(short, long, value_parser = parse_bigint)]
    pub q: BigInt,

    /// Linear offset of the encryption polynomial, in [0, p*q)
    #[arg(short, long, value_parser = parse_bigint)]
    pub b: BigInt,
}

fn parse_bigint(s: &str) -> Result<BigInt, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{}' is not a decimal integer", s))
}

/// Runs the parsed command line to completion.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Command::Encrypt {
            params,
            input,
            output,
        } => {
            let params = build_params(params)?;
            let summary = util::encrypt_file(&input, &output, &params)
                .with_context(|| format!("encrypting {}", input.display()))?;
            print_summary("Encrypted", &summary, &output);
        }
        Command::Decrypt {
            params,
            input,
            output,
        } => {
            let params = build_params(params)?;
            let summary = util::decrypt_file(&input, &output, &params)
                .with_context(|| format!("decrypting {}", input.display()))?;
            print_summary("Decrypted", &summary, &output);
        }
        Command::Validate { params } => {
            let report = validate_parameters(&params.p, &params.q, &params.b);
            if report.is_empty() {
                let n = &params.p * &params.q;
                println!("Parameters are valid.");
                println!("  modulus n   = {}", n);
                println!("  block width = {} byte(s)", block_width(&n));
            } else {
                eprintln!("Parameters are invalid:");
                for violation in report.violations() {
                    eprintln!("  - {}", violation);
                }
                anyhow::bail!("{} rule(s) violated", report.violations().len());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_params(args: ParamArgs) -> anyhow::Result<RabinParams> {
    let params = RabinParams::new(args.p, args.q, args.b)?;
    debug!(p = %params.p, q = %params.q, b = %params.b, n = %params.modulus(), "parameters accepted");
    Ok(params)
}

fn print_summary(verb: &str, summary: &FileSummary, output: &std::path::Path) {
    println!(
        "{} {} block(s) ({} in, {} out, block width {} byte(s)) -> {}",
        verb,
        summary.blocks,
        util::file_ops::format_file_size(summary.input_bytes),
        util::file_ops::format_file_size(summary.output_bytes),
        summary.block_width,
        output.display()
    );
}
