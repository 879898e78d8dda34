use log::{debug, info, warn};

use fptp_voting::*;
use snafu::{prelude::*, Snafu};

use rand::rngs::StdRng;
use rand::SeedableRng;

use text_diff::print_diff;

use crate::args::Args;
use crate::sim::config_reader::*;
use crate::sim::io_names::read_name_list;
use crate::sim::population::{generate_parties, generate_voters};
use crate::sim::report::*;

pub mod config_reader;
pub mod io_names;
pub mod population;
pub mod report;
pub mod terminal;

#[derive(Debug, Snafu)]
pub enum SimError {
    #[snafu(display("Error opening name list {path}"))]
    OpeningNames {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The name list {name} is empty"))]
    EmptyNames { name: String },
    #[snafu(display("{requested} parties requested but only {available} party names available"))]
    NotEnoughPartyNames { requested: usize, available: usize },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected an integer in the JSON configuration"))]
    ParsingJsonNumber {},
    #[snafu(display("Could not find the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("Error writing summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error with the terminal"))]
    Terminal { source: std::io::Error },
    #[snafu(display("Election error: {source}"))]
    Voting { source: ElectionErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SimResult<T> = Result<T, SimError>;

/// Builds the election described by the settings: the parties first, then the voters.
pub fn build_election(settings: &Settings, rng: &mut StdRng) -> SimResult<Election> {
    let mut election = Election::new();

    if let Some(parties) = &settings.explicit_parties {
        info!("Using {} parties from the configuration", parties.len());
        for (name, ideology) in parties.iter() {
            election
                .add_party(name, *ideology)
                .context(VotingSnafu {})?;
        }
    } else {
        let party_names = read_name_list(&settings.party_names_path)?;
        generate_parties(&mut election, &party_names, settings.parties, rng)?;
    }

    let first_names = read_name_list(&settings.first_names_path)?;
    let last_names = read_name_list(&settings.last_names_path)?;
    generate_voters(
        &mut election,
        &first_names,
        &last_names,
        settings.voters,
        rng,
    )?;

    info!(
        "Population: {} voters, {} parties",
        election.voters().len(),
        election.parties().len()
    );
    Ok(election)
}

/// Builds and tallies the election.
pub fn run_election(settings: &Settings) -> SimResult<(Election, TallyResult)> {
    let mut rng = match settings.seed {
        Some(seed) => {
            info!("Using random seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut election = build_election(settings, &mut rng)?;
    let result = election.tally().context(VotingSnafu {})?;
    debug!("run_election: result {:?}", result);
    Ok((election, result))
}

/// Runs one simulation end to end: population, tally, report, summary.
pub fn run_simulation(args: &Args) -> SimResult<TallyResult> {
    let settings = Settings::from_args(args)?;
    info!("settings: {:?}", settings);

    let (_, result) = run_election(&settings)?;

    let winner = match result.winner_tally() {
        Some(w) => w,
        None => whatever!("The winner {} is missing from the tally", result.winner),
    };
    println!("{}", winner_line(winner));
    if settings.chart {
        for line in render_chart(&result) {
            println!("{}", line);
        }
    }

    let result_js = build_summary_js(&settings, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    if let Some(out) = &settings.out {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference {
        check_summary(summary_p, &pretty_js_stats)?;
    }

    Ok(result)
}

/// Compares a computed summary with the summary stored at the given path.
pub fn check_summary(summary_path: &str, pretty_js_stats: &str) -> SimResult<()> {
    let summary_ref = read_summary(summary_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary {}", summary_path);
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    let data_dir = format!("{}/data", env!("CARGO_MANIFEST_DIR"));
    Settings {
        election_name: "test".to_string(),
        first_names_path: format!("{}/first_names.txt", data_dir),
        last_names_path: format!("{}/last_names.txt", data_dir),
        party_names_path: format!("{}/party_names.txt", data_dir),
        voters: 200,
        parties: 4,
        seed: Some(7),
        explicit_parties: None,
        out: None,
        reference: None,
        chart: false,
    }
}
