//! OxiBlock CLI - block-sorting transforms from the command line
//!
//! A Pure Rust utility that chains BWT, MTF, Huffman and RLE over whole files.

mod commands;
mod container;
mod utils;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use oxiblock_codec::Pipeline;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxiblock")]
#[command(
    author,
    version,
    about = "Block-sorting transform toolkit - Pure Rust BWT, MTF, Huffman and RLE"
)]
#[command(long_about = "
OxiBlock chains reversible byte transforms over whole files.
Transforms: bwt, mtf, huffman, rle

Examples:
  oxiblock compress book.txt
  oxiblock compress book.txt -c bwt,rle -o book.rle.oxb
  oxiblock expand book.txt.oxb
  oxiblock test book.txt
  oxiblock test book.txt -c bwt,mtf,huffman -c rle --json
  oxiblock info book.txt.oxb
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file through a transform chain
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (defaults to INPUT.oxb)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated transform chain
        #[arg(short, long = "chain", default_value = "bwt,mtf,huffman")]
        chain: Pipeline,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Expand a compressed file
    #[command(alias = "x")]
    Expand {
        /// File to expand
        input: PathBuf,

        /// Output file (defaults to INPUT without .oxb, or INPUT.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Round-trip a file through one or more chains and report sizes
    #[command(alias = "t")]
    Test {
        /// File to test with
        input: PathBuf,

        /// Transform chain to test (repeatable; defaults to bwt,mtf,huffman and bwt,rle)
        #[arg(short, long = "chain")]
        chain: Vec<Pipeline>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show the header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,
    },
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = TermLogger::init(
        log_level(cli.verbose, cli.quiet),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            chain,
            progress,
        } => commands::cmd_compress(&input, output, &chain, progress && !cli.quiet),
        Commands::Expand { input, output } => commands::cmd_expand(&input, output),
        Commands::Test { input, chain, json } => {
            let chains = if chain.is_empty() {
                vec![Pipeline::bwt_mtf_huffman(), Pipeline::bwt_rle()]
            } else {
                chain
            };
            match commands::cmd_test(&input, &chains, json) {
                Ok(true) => Ok(()),
                Ok(false) => std::process::exit(1),
                Err(e) => Err(e),
            }
        }
        Commands::Info { file } => commands::cmd_info(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
