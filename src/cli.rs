use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::dates::DateGrouping;
use crate::width::Layout;

#[derive(Parser, Debug)]
#[clap(
    name = "serial-timeline",
    version,
    about = "Compute timeline segment widths for a serialized story.",
    long_about = None
)]
pub struct Cli {
    /// Layout to report widths for
    #[clap(short, long, value_enum, default_value_t = Layout::Volume)]
    pub layout: Layout,

    /// Only report the entity with this 0-based index
    #[clap(short, long)]
    pub index: Option<usize>,

    /// Size chapters by page count instead of fitting them into volumes
    #[clap(short, long)]
    pub unbounded: bool,

    /// Print chapter dates grouped by month or year instead of widths
    /// (defaults to the configured grouping)
    #[clap(long, value_enum, num_args = 0..=1, value_name = "GROUPING")]
    pub dates: Option<Option<DateGrouping>>,

    /// Validate the dataset and report problems
    #[clap(long)]
    pub check: bool,

    /// List titles in the titles directory
    #[clap(long)]
    pub list: bool,

    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug output
    #[clap(long)]
    pub debug: bool,

    /// Dataset JSON file or title key
    #[clap(name = "DATASET")]
    pub dataset: Option<String>,
}
