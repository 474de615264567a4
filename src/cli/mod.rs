//! CLI interface for sonaplot

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plots you can hear: sonify data series
#[derive(Parser)]
#[command(name = "sonaplot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON array (one line) or matrix (rows are time, columns are lines) to audio
    Render {
        /// JSON data file
        data: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// sequential or overlay
        #[arg(short, long)]
        mode: Option<String>,

        /// Write the track to a WAV file instead of playing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tone length per value in milliseconds
        #[arg(short, long)]
        duration: Option<u32>,

        /// Comma separated line names
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// Narration language (en, ja)
        #[arg(short, long)]
        language: Option<String>,

        /// Skip the spoken value range
        #[arg(long)]
        no_description: bool,
    },

    /// Explore a JSON series in an interactive terminal plot
    Explore {
        /// JSON data file: `[y...]` or `{"y": [...], "x": [...], "label": [...]}`
        data: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Spoken plot title
        #[arg(short, long)]
        title: Option<String>,

        /// Give the second label group its own y-axis
        #[arg(long)]
        multiple_axes: bool,

        /// Narration language (en, ja)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List available audio output devices
    Devices,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "sonaplot.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
