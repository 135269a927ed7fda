use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use hex2bin_core::{ByteCounts, ConvertOptions, FINAL_SIZE, convert_with_progress};

#[derive(Debug, Parser)]
#[command(
    name = "hex2bin",
    version,
    about = "Convert a hex byte listing into a zero-padded flash image"
)]
struct Cli {
    /// Input text file of whitespace-separated two-digit hex bytes
    input: Option<PathBuf>,

    /// Output binary image (must not already exist)
    output: Option<PathBuf>,

    /// Size in bytes the image is zero-padded to
    #[arg(long, value_name = "BYTES", default_value_t = FINAL_SIZE)]
    flash_size: u64,

    /// Print the conversion report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let Some(input) = cli.input.clone() else {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    };

    match run(&cli, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, input: PathBuf) -> anyhow::Result<()> {
    let output = cli
        .output
        .as_deref()
        .context("missing output path (usage: hex2bin <input_hex_path> <output_bin_path>)")?;

    let opts = ConvertOptions {
        final_size: cli.flash_size,
    };
    log::debug!(
        "converting {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        opts.final_size
    );

    let json = cli.json;
    let report = convert_with_progress(&input, output, opts, |counts: &ByteCounts| {
        if json {
            log::info!(
                "input tokens: {}, output bytes: {}",
                counts.input_tokens,
                counts.output_bytes
            );
        } else {
            println!("{counts}");
        }
    })?;

    if cli.json {
        println!("{}", report.to_pretty_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}
