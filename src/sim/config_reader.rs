use log::debug;

use std::fs;
use std::path::Path;

use fptp_voting::IdeologyVector;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::args::Args;
use crate::sim::*;

pub const DEFAULT_FIRST_NAMES: &str = "data/first_names.txt";
pub const DEFAULT_LAST_NAMES: &str = "data/last_names.txt";
pub const DEFAULT_PARTY_NAMES: &str = "data/party_names.txt";
pub const DEFAULT_VOTERS: usize = 1000;
pub const DEFAULT_PARTIES: usize = 5;
pub const DEFAULT_ELECTION_NAME: &str = "Simulated election";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "electionName")]
    pub election_name: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSources {
    #[serde(rename = "firstNamesPath")]
    pub first_names_path: Option<String>,
    #[serde(rename = "lastNamesPath")]
    pub last_names_path: Option<String>,
    #[serde(rename = "partyNamesPath")]
    pub party_names_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationSettings {
    pub voters: Option<usize>,
    pub parties: Option<usize>,
    /// Either a number or a string holding a number.
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
}

impl PopulationSettings {
    pub fn random_seed(&self) -> SimResult<Option<u64>> {
        match &self.random_seed {
            None | Some(JSValue::Null) => Ok(None),
            x => read_js_int(x).map(Some),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyConfig {
    pub name: String,
    /// Economic, diplomatic, civil, social.
    pub ideology: [f64; 4],
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSources", default)]
    pub data_sources: DataSources,
    #[serde(default)]
    pub population: PopulationSettings,
    pub parties: Option<Vec<PartyConfig>>,
}

/// The settings of one run, after merging the command line and the configuration file.
#[derive(PartialEq, Debug, Clone)]
pub struct Settings {
    pub election_name: String,
    pub first_names_path: String,
    pub last_names_path: String,
    pub party_names_path: String,
    pub voters: usize,
    pub parties: usize,
    pub seed: Option<u64>,
    pub explicit_parties: Option<Vec<(String, IdeologyVector)>>,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub chart: bool,
}

impl Settings {
    pub fn from_args(args: &Args) -> SimResult<Settings> {
        match &args.config {
            Some(config_path) => {
                let config = read_config(config_path)?;
                let root_p = Path::new(config_path.as_str())
                    .parent()
                    .context(MissingParentDirSnafu {})?;
                Settings::merge(args, &config, root_p)
            }
            None => Settings::merge(args, &SimConfig::default(), Path::new("")),
        }
    }

    /// Command line options take precedence over the configuration. Paths from the
    /// configuration are relative to `root_p`.
    pub fn merge(args: &Args, config: &SimConfig, root_p: &Path) -> SimResult<Settings> {
        let pick_path = |arg: &Option<String>, cfg: &Option<String>, default: &str| -> String {
            match (arg, cfg) {
                (Some(p), _) => p.clone(),
                (None, Some(p)) => root_p.join(p).display().to_string(),
                (None, None) => default.to_string(),
            }
        };

        let seed = match args.seed {
            Some(s) => Some(s),
            None => config.population.random_seed()?,
        };

        let explicit_parties = config.parties.as_ref().map(|ps| {
            ps.iter()
                .map(|pc| (pc.name.clone(), IdeologyVector::from(pc.ideology)))
                .collect()
        });

        let out = args
            .out
            .clone()
            .or_else(|| config.output_settings.output_path.clone());

        Ok(Settings {
            election_name: config
                .output_settings
                .election_name
                .clone()
                .unwrap_or_else(|| DEFAULT_ELECTION_NAME.to_string()),
            first_names_path: pick_path(
                &args.first_names,
                &config.data_sources.first_names_path,
                DEFAULT_FIRST_NAMES,
            ),
            last_names_path: pick_path(
                &args.last_names,
                &config.data_sources.last_names_path,
                DEFAULT_LAST_NAMES,
            ),
            party_names_path: pick_path(
                &args.party_names,
                &config.data_sources.party_names_path,
                DEFAULT_PARTY_NAMES,
            ),
            voters: args
                .voters
                .or(config.population.voters)
                .unwrap_or(DEFAULT_VOTERS),
            parties: args
                .parties
                .or(config.population.parties)
                .unwrap_or(DEFAULT_PARTIES),
            seed,
            explicit_parties,
            out,
            reference: args.reference.clone(),
            chart: args.chart,
        })
    }
}

pub fn read_config(path: &str) -> SimResult<SimConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SimConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> SimResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> SimResult<u64> {
    match x {
        Some(JSValue::Number(n)) => n.as_u64().context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<u64>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
