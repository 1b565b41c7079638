use crate::commands::{Command, DecodeOptions};
use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use peel_core::StrategyKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "peel")]
#[command(about = "Decode tar, gzip-compressed tar, gzip or raw input by trying each in turn")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        help = "Tracing filter directives (overrides --level and RUST_LOG)"
    )]
    pub log_filter: Option<String>,
}

impl Cli {
    /// The log format after applying the `--json` shorthand.
    pub fn effective_log_format(&self) -> TracingFormat {
        if self.json {
            TracingFormat::Json
        } else {
            self.log_format
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Decode an input and write the payload")]
    Decode {
        #[arg(help = "Input file, or - for stdin", default_value = "-")]
        input: PathBuf,
        #[arg(short = 'o', long, help = "Output file (default: stdout)")]
        output: Option<PathBuf>,
        #[arg(
            long,
            help = "Comma-separated strategy chain, tried in order (e.g. gzip+tar,tar,identity)",
            value_delimiter = ','
        )]
        chain: Vec<StrategyKind>,
        #[arg(long, env = "PEEL_CONFIG", help = "Decoder configuration file (TOML)")]
        config: Option<PathBuf>,
        #[arg(long, help = "Reject inputs larger than this many bytes")]
        max_input_bytes: Option<u64>,
    },
    #[command(about = "List the built-in decoding strategies")]
    Strategies,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Decode {
                input,
                output,
                chain,
                config,
                max_input_bytes,
            } => Command::Decode(DecodeOptions {
                input: (input.as_os_str() != "-").then_some(input),
                output,
                chain,
                config,
                max_input_bytes,
            }),
            Commands::Strategies => Command::Strategies,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
