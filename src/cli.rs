use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::output::OutputMode;

#[derive(Parser, Debug)]
#[command(
    name = "multidiff",
    version,
    about = "Compare many file pairs on a diff server and show the results"
)]
pub struct Cli {
    /// Base URL of the diff server [default: http://localhost:3000]
    #[arg(long)]
    pub server: Option<String>,

    /// Output format [default: side-by-side]
    #[arg(long, value_enum)]
    pub output: Option<OutputMode>,

    /// Column width for side-by-side output [default: 50]
    #[arg(long)]
    pub width: Option<usize>,

    /// A pair of files to compare (repeatable)
    #[arg(
        long = "pair",
        num_args = 2,
        value_names = ["FILE1", "FILE2"],
        action = ArgAction::Append
    )]
    pub pairs: Vec<String>,

    /// JSON file containing an array of {file1, file2, index?} objects
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Don't fetch file contents for differing pairs
    #[arg(long)]
    pub no_fetch: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
