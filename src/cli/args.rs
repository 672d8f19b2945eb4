use crate::services::config::DEFAULT_CHANNEL_CAPACITY;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fan_in")]
#[command(about = "Run fan-out/fan-in episodes: many producers, one collector")]
#[command(version)]
pub struct Cli {
    /// Channel capacity (producers wait while the channel is full)
    #[arg(short, long, global = true, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub capacity: usize,

    /// How received messages are displayed
    #[arg(short, long, global = true, value_enum, default_value = "console")]
    pub format: OutputFormat,

    /// Abort the episode when producers have not finished within this many milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log filter directive (overrides RUST_LOG), e.g. "fan_in=debug"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Numeric progress reporting: each producer counts from 1 to COUNT
    Numbers {
        /// Producer labels (one producer per label)
        #[arg(short, long = "label", default_values = ["Goroutine 1", "Goroutine 2"])]
        labels: Vec<String>,

        /// Messages per producer
        #[arg(short = 'n', long, default_value = "5")]
        count: u64,

        /// Delay between messages of one producer
        #[arg(short, long, default_value = "0")]
        interval_ms: u64,
    },

    /// String analysis: reverse each word and check for palindromes
    Strings {
        /// Words to analyse (one producer per word)
        #[arg(default_values = ["racecar", "hello"])]
        words: Vec<String>,
    },

    /// Solve the number theory exercises concurrently
    Euler,

    /// Encode/decode people as JSON
    Json {
        /// Person JSON documents to decode (defaults to encoding John Doe)
        inputs: Vec<String>,
    },

    /// Read files and write one file concurrently (a missing file is reported as a failure)
    Files {
        /// Files to read (one producer per file)
        #[arg(short, long = "read", default_values = ["example.txt"])]
        reads: Vec<PathBuf>,

        /// File to write
        #[arg(short, long, default_value = "output.txt")]
        write: PathBuf,

        /// Content written to the output file
        #[arg(long, default_value = "This is a test content")]
        content: String,
    },

    /// Print the current time (RFC 1123) and parse "YYYY-MM-DD HH:MM:SS" strings
    Time {
        /// Time strings to parse (one producer per string)
        #[arg(default_values = ["2024-06-06 12:00:00"])]
        inputs: Vec<String>,
    },

    /// Run the numbers episode followed by the strings episode
    Demo {
        /// Delay between messages of one numeric producer
        #[arg(short, long, default_value = "0")]
        interval_ms: u64,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable lines on stdout
    Console,
    /// One JSON object per line on stdout
    Json,
    /// Structured log events
    Log,
}
