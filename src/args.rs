use clap::Parser;

/// This is a first-past-the-post election simulator.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the simulation settings, in JSON.
    /// Options passed on the command line override the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, fptpsim will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, default data/first_names.txt) The list of first names, one per line.
    #[clap(long, value_parser)]
    pub first_names: Option<String>,

    /// (file path, default data/last_names.txt) The list of last names, one per line.
    #[clap(long, value_parser)]
    pub last_names: Option<String>,

    /// (file path, default data/party_names.txt) The list of party names, one per line.
    /// Names are used in order.
    #[clap(long, value_parser)]
    pub party_names: Option<String>,

    /// (default 1000) The number of voters to generate.
    #[clap(long, value_parser)]
    pub voters: Option<usize>,

    /// (default 5) The number of parties to generate.
    #[clap(long, value_parser)]
    pub parties: Option<usize>,

    /// (integer, optional) The seed of the random generator. Runs with the same seed
    /// and the same inputs produce the same election.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// If passed as an argument, prints a chart of the votes of each party.
    #[clap(long, takes_value = false)]
    pub chart: bool,

    /// If passed as an argument, reads commands from the terminal after the election.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
