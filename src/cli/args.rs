use crate::models::LayoutKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "latlon-columns")]
#[command(about = "Convert CSV coordinates between one combined column and separate latitude/longitude columns")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: latlon-columns.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show file information, detected coordinate columns and a preview
    Inspect {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Number of preview rows [default: from settings]")]
        preview: Option<usize>,

        #[arg(long, help = "Print machine-readable JSON instead of text")]
        json: bool,
    },

    /// Convert the coordinate layout of a CSV file
    Convert {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(long, default_value = "one", help = "Current layout: 'one' or 'two'")]
        from: LayoutKind,

        #[arg(long, default_value = "two", help = "Target layout: 'one' or 'two'")]
        to: LayoutKind,

        #[arg(short, long, help = "Combined coordinate column (one-column source)")]
        column: Option<String>,

        #[arg(long, help = "Latitude column (two-column source) [default: detected]")]
        lat: Option<String>,

        #[arg(long, help = "Longitude column (two-column source) [default: detected]")]
        lon: Option<String>,

        #[arg(
            short,
            long,
            conflicts_with = "output_dir",
            help = "Output file path [default: {name}_2col.csv or {name}_1col.csv next to the input]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Directory for the output file, keeping the suggested name")]
        output_dir: Option<PathBuf>,

        #[arg(short, long, help = "Number of preview rows [default: from settings]")]
        preview: Option<usize>,

        #[arg(long, help = "Print machine-readable JSON instead of text")]
        json: bool,

        #[arg(long, help = "Convert and preview without writing a file")]
        dry_run: bool,
    },
}
