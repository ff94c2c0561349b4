use clap::Parser;

/// Statistics on the formal objections made in the ballots of the W3C Advisory Committee.
///
/// The pages are read from a cache directory that must be populated beforehand.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A configuration file in JSON. See the manual of `objection_tally` for the options.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default tmp/w3c-fo-stats) The directory containing the downloaded pages: the ballot index,
    /// the roster and the result pages. Setting this option overrides the directory of the --config option.
    #[clap(long, value_parser)]
    pub cache_dir: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the tallies will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the tallies in JSON format. If provided, fostats will
    /// check that the tallies match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default 40) The number of supporters a ballot needs to appear in the most supported work.
    #[clap(long, value_parser)]
    pub min_supporters: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
