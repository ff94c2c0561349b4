mod config;
mod tally;

pub mod classify;
pub mod directory;
pub mod entities;
pub mod extract;
pub mod manual;
pub mod patterns;
pub mod selector;
pub mod summary;

use log::{debug, info};
use std::collections::HashSet;

pub use crate::classify::{classify, Classifier};
pub use crate::config::*;
pub use crate::directory::VoterDirectory;
pub use crate::extract::{extract_ballot_metadata, extract_vote_rows};
pub use crate::selector::select_relevant_ballots;
pub use crate::tally::Aggregator;

/// Tallies all the relevant ballots of an index.
///
/// Arguments:
/// * `index_page` the ballot index. Only the calls for review of charters and
/// recommendations are considered.
/// * `directory` the voter directory used to resolve the voters to their organization
/// * `classifier` the rules applied to the positions
/// * `page_for` returns the result page of a ballot, or None if it is not available.
/// It is called at most once per ballot id.
///
/// Ballots without a result page are skipped. Result pages that cannot be read
/// are listed in `TallyResults::failed_pages`; they do not prevent the other
/// pages from being tallied.
pub fn run_tally<F>(
    index_page: &str,
    directory: &VoterDirectory,
    classifier: Classifier,
    mut page_for: F,
) -> TallyResults
where
    F: FnMut(&BallotLink) -> Option<String>,
{
    let mut aggregator = Aggregator::with_classifier(directory, classifier);
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut num_selected = 0;
    for link in select_relevant_ballots(index_page) {
        if !seen_ids.insert(link.id.clone()) {
            debug!("run_tally: ballot {} already processed", link.id);
            continue;
        }
        num_selected += 1;
        let page = match page_for(&link) {
            Some(p) => p,
            None => {
                info!("No result page for ballot {}: {}", link.id, link.description);
                continue;
            }
        };
        if let Err(e) = aggregator.process_page(&link.id, &page) {
            debug!("run_tally: {}", e);
        }
    }
    let results = aggregator.finish();
    info!(
        "Tallied {} selected ballots: {} voters, {} objections, {} failed pages",
        num_selected,
        results.members.len(),
        results.total_objections,
        results.failed_pages.len()
    );
    results
}
