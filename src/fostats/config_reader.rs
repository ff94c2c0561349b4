use crate::args::Args;
use crate::fostats::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CACHE_DIR: &str = "tmp/w3c-fo-stats";
pub const DEFAULT_INDEX_FILE: &str = "votes.html";
pub const DEFAULT_ROSTER_FILE: &str = "ac-reps.html";
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// The configuration file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoConfig {
    /// Relative to the directory of the configuration file.
    #[serde(rename = "cacheDirectory")]
    pub cache_directory: Option<String>,
    #[serde(rename = "indexFile")]
    pub index_file: Option<String>,
    #[serde(rename = "rosterFile")]
    pub roster_file: Option<String>,
    #[serde(rename = "resultsDirectory")]
    pub results_directory: Option<String>,
    #[serde(rename = "minSupporters")]
    pub min_supporters: Option<u64>,
    #[serde(rename = "voterOverrides")]
    pub voter_overrides: Option<BTreeMap<String, String>>,
    #[serde(rename = "supportPhrases")]
    pub support_phrases: Option<Vec<String>>,
}

/// The settings of a run, once the command line and the configuration file
/// have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub cache_dir: PathBuf,
    pub index_file: String,
    pub roster_file: String,
    pub results_dir: String,
    pub min_supporters: u64,
    pub voter_overrides: BTreeMap<String, String>,
    pub support_phrases: Vec<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

impl RunSettings {
    /// The command line takes precedence over the configuration file.
    pub fn resolve(args: &Args) -> FoResult<RunSettings> {
        let (config, config_dir) = match &args.config {
            Some(config_path) => {
                let config = read_config(config_path)?;
                let config_dir = Path::new(config_path)
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_default();
                (config, config_dir)
            }
            None => (FoConfig::default(), PathBuf::new()),
        };

        let cache_dir = match (&args.cache_dir, &config.cache_directory) {
            (Some(d), _) => PathBuf::from(d),
            (None, Some(d)) => config_dir.join(d),
            (None, None) => PathBuf::from(DEFAULT_CACHE_DIR),
        };

        Ok(RunSettings {
            cache_dir,
            index_file: config
                .index_file
                .unwrap_or_else(|| DEFAULT_INDEX_FILE.to_string()),
            roster_file: config
                .roster_file
                .unwrap_or_else(|| DEFAULT_ROSTER_FILE.to_string()),
            results_dir: config
                .results_directory
                .unwrap_or_else(|| DEFAULT_RESULTS_DIR.to_string()),
            min_supporters: args
                .min_supporters
                .or(config.min_supporters)
                .unwrap_or(objection_tally::summary::DEFAULT_MIN_SUPPORTERS),
            voter_overrides: config.voter_overrides.unwrap_or_default(),
            support_phrases: config.support_phrases.unwrap_or_default(),
            out: args.out.clone().filter(|s| !s.is_empty()),
            reference: args.reference.clone(),
        })
    }

    pub fn index_path(&self) -> PathBuf {
        self.cache_dir.join(&self.index_file)
    }

    pub fn roster_path(&self) -> PathBuf {
        self.cache_dir.join(&self.roster_file)
    }

    pub fn results_path(&self) -> PathBuf {
        self.cache_dir.join(&self.results_dir)
    }
}

pub fn read_config(path: &str) -> FoResult<FoConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: FoConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> FoResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
