//! OxiLZSS CLI
//!
//! Compress and decompress files with the classic 4 KiB-window LZSS, raw or
//! wrapped in a complzss container.

mod commands;
mod utils;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_completions, cmd_compress, cmd_decompress, cmd_info};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxilzss")]
#[command(author, version, about = "Pure Rust LZSS compressor")]
#[command(long_about = "
OxiLZSS compresses data with classic LZSS: a 4096-byte window, matches of
3 to 18 bytes and a dictionary pre-filled with spaces. Output is compatible
with the complzss payloads found in kernelcaches and bootloaders.

Examples:
  oxilzss compress input.txt              # writes input.txt.lzss
  oxilzss compress --container kernel     # writes kernel.lzss with a header
  oxilzss decompress input.txt.lzss       # writes input.txt
  oxilzss compress -o out.lzss input.txt
  oxilzss info kernelcache --json
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the stream in a complzss header
        #[arg(long)]
        container: bool,

        /// Checksum value to record in the complzss header
        #[arg(long, default_value_t = 0)]
        checksum: u32,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress files, raw or complzss
    #[command(alias = "d")]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Show container header and stream statistics
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, takes precedence over -v.
    let _ = env_logger::builder()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            container,
            checksum,
            force,
        } => {
            let options = commands::CompressOptions {
                output,
                container,
                checksum,
                force,
            };
            cmd_compress(&files, &options)
        }
        Commands::Decompress {
            files,
            output,
            force,
        } => cmd_decompress(&files, output.as_deref(), force),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Completions { shell } => cmd_completions(shell, &mut Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
