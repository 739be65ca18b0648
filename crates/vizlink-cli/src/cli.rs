//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// vizlink: coordinated multi-chart exploration of JSON records
#[derive(Parser)]
#[command(name = "vizlink")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./vizlink.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Where the dataset comes from: a JSON file or a built-in sample.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct DataSource {
    /// Path to a JSON data file
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Built-in sample dataset (see `vizlink samples`)
    #[arg(short, long)]
    pub sample: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show field classifications and default chart fields
    Inspect {
        #[command(flatten)]
        source: DataSource,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply filters and selection clicks, then report what survives
    Filter {
        #[command(flatten)]
        source: DataSource,

        /// Keep records whose field is one of the values (FIELD=V1,V2)
        #[arg(long, value_name = "FIELD=V1,V2")]
        include: Vec<String>,

        /// Keep records whose numeric field is within bounds (FIELD=MIN..MAX)
        #[arg(long, value_name = "FIELD=MIN..MAX")]
        range: Vec<String>,

        /// Click an entity, in order
        #[arg(long, value_name = "NAME")]
        select: Vec<String>,

        /// Treat clicks as modifier-clicks (add to the selection)
        #[arg(long)]
        multi: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print each chart's model for the default field selections
    Charts {
        #[command(flatten)]
        source: DataSource,

        /// Click an entity before building charts, in order
        #[arg(long, value_name = "NAME")]
        select: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List built-in sample datasets
    Samples,
}
