pub mod config_reader;
mod io_cache;
mod report;

use log::{debug, info, warn};

use objection_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::fostats::config_reader::*;
use crate::fostats::io_cache::ResultPages;

#[derive(Debug, Snafu)]
pub enum FoStatsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(
        "Some result pages could not be read, the extraction patterns need an update: {}",
        ids.join(", ")
    ))]
    MalformedPages { ids: Vec<String> },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type FoResult<T> = Result<T, FoStatsError>;

fn member_to_json(tally: &MemberTally) -> JSValue {
    // Keys in alphabetical order: the reference files are compared as text.
    json!({
        "abstain": tally.abstain,
        "doesNotSupport": tally.does_not_support,
        "objectionsByCharter": tally.objections_by_charter,
        "objectionsByOther": tally.objections_by_other,
        "objectionsByRecommendation": tally.objections_by_recommendation,
        "objectionsTotal": tally.objections_total,
        "support": tally.support,
        "unknown": tally.unknown,
    })
}

fn build_summary_js(results: &TallyResults) -> JSValue {
    let mut members: JSMap<String, JSValue> = JSMap::new();
    for (name, tally) in results.members.iter() {
        members.insert(name.clone(), member_to_json(tally));
    }

    let mut ballots: JSMap<String, JSValue> = JSMap::new();
    for (title, tally) in results.ballots.iter() {
        ballots.insert(
            title.clone(),
            json!({
                "objectors": tally.objector_identities,
                "totalSupport": tally.total_support,
            }),
        );
    }

    let failed_pages: Vec<JSValue> = results
        .failed_pages
        .iter()
        .map(|fp| json!({"ballotId": fp.ballot_id, "cause": fp.cause.to_string()}))
        .collect();

    json!({
        "ballots": ballots,
        "failedPages": failed_pages,
        "members": members,
        "totalObjections": results.total_objections,
    })
}

/// Reads the cached pages and tallies all the relevant ballots.
///
/// The index and the roster are required. A ballot without a cached result
/// page is skipped.
pub fn tally_cache(settings: &RunSettings) -> FoResult<TallyResults> {
    let index_p = settings.index_path();
    info!("Reading the ballot index {}", index_p.display());
    let index = io_cache::read_page(&index_p)?;
    let roster_p = settings.roster_path();
    info!("Reading the roster {}", roster_p.display());
    let roster = io_cache::read_page(&roster_p)?;

    let directory =
        VoterDirectory::from_roster(&roster).with_overrides(settings.voter_overrides.clone());
    let classifier = Classifier::default().with_support_phrases(settings.support_phrases.clone());
    debug!("tally_cache: classifier: {:?}", classifier);

    let pages = ResultPages::new(settings.results_path());
    Ok(run_tally(&index, &directory, classifier, |link| {
        pages.result_page(&link.id)
    }))
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> FoResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!(
            "Difference detected between the tallies and the reference summary {}",
            reference_path
        )
    }
    info!("The tallies match the reference summary {}", reference_path);
    Ok(())
}

/// Runs the full report: tallies, prints the text report on the standard output,
/// writes the summary and checks it against the reference.
///
/// The pages that could not be read are printed with the report. They make the
/// run fail once everything else is done.
pub fn run_report(settings: &RunSettings) -> FoResult<TallyResults> {
    let results = tally_cache(settings)?;

    print!("{}", report::render(&results, settings.min_supporters));

    let result_js = build_summary_js(&results);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;
    match settings.out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            info!("Writing the summary to {}", path);
            fs::write(path, &pretty_js_stats).context(WritingOutputSnafu { path })?;
        }
        None => {}
    }

    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    if !results.failed_pages.is_empty() {
        let ids: Vec<String> = results
            .failed_pages
            .iter()
            .map(|fp| fp.ballot_id.clone())
            .collect();
        return MalformedPagesSnafu { ids }.fail();
    }
    Ok(results)
}

pub fn run_args(args: &Args) -> FoResult<()> {
    let settings = RunSettings::resolve(args)?;
    info!("settings: {:?}", settings);
    run_report(&settings)?;
    Ok(())
}

#[cfg(test)]
fn run_fixture_test(test_name: &str) -> FoResult<()> {
    let test_dir = format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    info!("Running test {}", test_name);
    let args = Args {
        config: Some(format!("{}/{}_config.json", test_dir, test_name)),
        reference: Some(format!("{}/{}_expected_summary.json", test_dir, test_name)),
        ..Default::default()
    };
    let res = run_args(&args);
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = snafu::ErrorCompat::backtrace(e) {
            eprintln!("trace: {}", bt);
        } else {
            eprintln!("No trace found");
        }
    }
    res
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let res = run_fixture_test(test_name);
    assert!(res.is_ok(), "test {} failed: {:?}", test_name, res.err());
}
