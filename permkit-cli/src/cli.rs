//! Contains structures and functionality for the binary
use std::path::PathBuf;

use permkit::permutation::{Permutation, Style};

/// Possible settings for the output format.
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human readable text
    #[default]
    Text,
    /// One JSON document per command
    Json,
}

/// Possible notations for printing permutations.
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) enum Notation {
    /// One-line notation
    #[default]
    Oneline,
    /// Cycle notation
    Cycle,
    /// One-line notation followed by cycle notation
    Both,
}

impl From<Notation> for Style {
    fn from(val: Notation) -> Self {
        match val {
            Notation::Oneline => Style::OneLine,
            Notation::Cycle => Style::Cycle,
            Notation::Both => Style::Both,
        }
    }
}

/// Possible settings for the reporting option.
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) enum Reporting {
    /// Disable reporting.
    #[default]
    None,
    /// Print the total running time.
    Short,
    /// Print the total running time and a tree of the timed phases.
    Time,
}

/// Verbosity of the log output of `pk`
#[derive(clap::Args, Debug)]
pub(crate) struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = clap::builder::ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Reduce log verbosity to show only errors (equivalent to --log error)
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
    /// Set log verbosity (default is "warn")
    #[arg(long = "log", value_parser=clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"]), group = "verbosity")]
    log_level: Option<String>,
}

impl LoggingArgs {
    /// Log level requested on the command line, if any.
    ///
    /// `-v` selects `info`, `-vv` selects `debug` and more select `trace`.
    fn level_filter(&self) -> Option<log::LevelFilter> {
        if let Some(level) = &self.log_level {
            return level.parse().ok();
        }

        match (self.quiet, self.verbose) {
            (true, _) => Some(log::LevelFilter::Error),
            (false, 0) => None,
            (false, 1) => Some(log::LevelFilter::Info),
            (false, 2) => Some(log::LevelFilter::Debug),
            (false, _) => Some(log::LevelFilter::Trace),
        }
    }

    /// Install the logger of `pk`, which writes to stderr.
    ///
    /// Only warnings and errors are shown by default. `PK_LOG` takes
    /// `env_logger` filter directives, e.g. `PK_LOG=permkit::class=debug`,
    /// and a level given on the command line overrides it.
    pub(crate) fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Warn);
        builder.parse_env("PK_LOG");

        if let Some(level) = self.level_filter() {
            builder.filter_level(level);
        }
        builder.init();
    }
}

/// Cli arguments describing a class by its basis
#[derive(Debug, clap::Args)]
pub(crate) struct BasisArgs {
    /// Basis elements of the class, separated by commas, e.g. "123,2413"
    #[arg(short, long, value_delimiter = ',')]
    pub(crate) basis: Vec<Permutation>,
    /// Largest length to generate
    #[arg(short = 'n', long = "max-length", env = "PK_MAX_LENGTH", default_value_t = 8)]
    pub(crate) max_length: usize,
}

/// Cli arguments for sampling a random permutation
#[derive(Debug, clap::Args)]
pub(crate) struct RandomArgs {
    /// Length of the permutation
    pub(crate) length: usize,
    /// Patterns the permutation has to avoid, separated by commas
    #[arg(short, long, value_delimiter = ',')]
    pub(crate) avoid: Vec<Permutation>,
    /// Only accept simple permutations
    #[arg(long)]
    pub(crate) simple: bool,
    /// Only accept involutions
    #[arg(long)]
    pub(crate) involution: bool,
    /// Seed of the random number generator
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Give up after this many rejected samples
    #[arg(long = "max-attempts", default_value_t = 1_000_000)]
    pub(crate) max_attempts: u64,
}

/// Available subcommands
#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// Print a permutation, optionally with a plot and statistics
    Show {
        /// The permutation in one-line notation, e.g. "3142" or "3 1 4 2"
        permutation: Permutation,
        /// Notation used for printing
        #[arg(short, long, value_enum, default_value_t)]
        style: Notation,
        /// Print the plot of the permutation
        #[arg(long)]
        plot: bool,
        /// Minimal cell width of the plot
        #[arg(long, default_value_t = 2)]
        width: usize,
        /// Print a table of statistics
        #[arg(long)]
        stats: bool,
    },
    /// Decide whether a permutation contains a pattern
    Contains {
        /// The permutation to search in
        text: Permutation,
        /// The pattern to search for
        pattern: Permutation,
        /// Also print the number of occurrences
        #[arg(short, long)]
        count: bool,
    },
    /// Count the permutations of each length in a class
    Enumerate {
        /// Description of the class
        #[command(flatten)]
        class: BasisArgs,
    },
    /// Compute the basis of a class from its elements
    Basis {
        /// Description of the class
        #[command(flatten)]
        class: BasisArgs,
        /// File with all elements of a class up to some length, one permutation per line
        #[arg(short = 'f', long = "from-file", conflicts_with = "basis")]
        from_file: Option<PathBuf>,
    },
    /// Sample a uniformly random permutation
    Random(RandomArgs),
    /// Print a TikZ picture of a permutation
    Tikz {
        /// The permutation to draw
        permutation: Permutation,
    },
}

/// permkit CLI
#[derive(clap::Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct CliApp {
    /// The command to run
    #[command(subcommand)]
    pub(crate) command: Command,
    /// Format of the printed results
    #[arg(long, value_enum, default_value_t, global = true)]
    pub(crate) format: Format,
    /// Control amount of reporting printed by the program
    #[arg(long = "report", value_enum, default_value_t, global = true)]
    pub(crate) reporting: Reporting,
    /// Arguments related to logging
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}
