//! Command-line interface for the Z80 Binary to BTX Converter
//!
//! Usage: bin2btx [options] <input> [<output-stem>]
//!
//! Converts a Z80 binary file to a Mupid teleprogram file named
//! `<output-stem>.btx` (default stem: the input filename). Exit codes:
//! 1 = usage/help, 2 = bad argument, 4 = file I/O failure.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;

// Import the library crate modules
use bin_to_btx_converter::config::{Config, VERSION};
use bin_to_btx_converter::convert_binary::ConvertBinary;
use bin_to_btx_converter::error::ConvertError;
use bin_to_btx_converter::load_address::Bank;

#[derive(Parser)]
#[command(
    name = "bin2btx",
    version = VERSION,
    about = "Z80 binary to Mupid Teleprogram (BTX) format converter"
)]
struct Cli {
    /// Input Z80 binary file
    input: String,

    /// Output filename without extension (default: the input filename)
    output_stem: Option<String>,

    /// Load address in hex, e.g. 8100 or 0x8100
    #[arg(short, long, value_name = "ADDR", default_value = "8100", value_parser = parse_load_addr)]
    load_addr: u16,

    /// Load into bank 2 or 3
    #[arg(short, long, value_name = "BANK", default_value = "2", value_parser = parse_bank)]
    bank: Bank,

    /// Draw a progress bar on this terminal row (1-24) and send the payload
    /// as 40 blocks
    #[arg(short, long, value_name = "ROW", value_parser = clap::value_parser!(u8).range(1..=24))]
    progress: Option<u8>,

    /// Raw screen file copied verbatim ahead of the encoded program
    #[arg(short, long, value_name = "FILE")]
    screen: Option<PathBuf>,

    /// Print conversion details
    #[arg(short, long)]
    verbose: bool,
}

fn parse_load_addr(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16)
        .map_err(|_| format!("'{}' is not a 16-bit hex load address", s))
}

fn parse_bank(s: &str) -> Result<Bank, String> {
    let number: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a bank number", s))?;
    Bank::from_number(number)
}

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // No input at all shows usage, like an explicit -h
            let code = match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::MissingRequiredArgument => 1,
                _ => 2,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    let stem = args.output_stem.as_deref().unwrap_or(&args.input);
    let output_path = format!("{}.btx", stem);

    let config = Config {
        load_addr: args.load_addr,
        bank: args.bank,
        progress_row: args.progress,
        preload_screen: args.screen,
        verbose: args.verbose,
    };

    if args.verbose {
        println!("bin2btx v{}", VERSION);
        println!("Input:  {}", args.input);
        println!("Output: {}", output_path);
        println!(
            "Load:   {:#06X} into bank {}",
            config.load_addr,
            config.bank.number()
        );
        if let Some(row) = config.progress_row {
            println!("Progress bar on row {}", row);
        }
    }

    let converter = ConvertBinary::new(config);
    match converter.convert(&args.input, &output_path) {
        Ok(stats) => {
            if args.verbose {
                println!(
                    "Converted {} bytes into {} block(s): {}",
                    stats.payload_bytes, stats.block_count, output_path
                );
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            let code = match e {
                ConvertError::Argument(_) => 2,
                ConvertError::Io(_) => 4,
            };
            process::exit(code);
        }
    }
}
