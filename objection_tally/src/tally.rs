use log::{debug, error, info, warn};
use std::collections::{BTreeMap, HashSet};

use crate::classify::Classifier;
use crate::config::*;
use crate::directory::VoterDirectory;
use crate::extract::{extract_ballot_metadata, extract_vote_rows};

// Positions shorter than this are not votes.
const MIN_POSITION_LEN: usize = 10;

/// Accumulates the votes of result pages into the per-member and per-ballot
/// tallies.
///
/// Each call to `process_page` handles one page completely. A page that cannot
/// be read leaves the tallies untouched.
///
/// ```
/// use objection_tally::{Aggregator, VoterDirectory};
///
/// let directory = VoterDirectory::from_roster(
///     "<h2>Acme Corp</h2>\n<h3 class=\"h5 card-title\">\n  Jane Doe\n</h3>",
/// );
/// let page = "<title>Results: Call for Review: Foo Charter - WBS</title>\n\
///     <p>This questionnaire was open from 2021-02-01 to 2021-03-01</p>\n\
///     <tr><th scope='row'>Jane Doe (Individual)</th>\n<td>[Formal Objection] to this Charter</td></tr>\n";
///
/// let mut aggregator = Aggregator::new(&directory);
/// let report = aggregator.process_page("12345", page)?;
/// assert_eq!(report.accepted, 1);
///
/// let results = aggregator.finish();
/// assert_eq!(results.total_objections, 1);
/// assert_eq!(results.members["Acme Corp"].objections_by_charter, 1);
/// assert_eq!(
///     results.ballots["2021 Call for Review: Foo Charter"].objector_identities,
///     vec!["Acme Corp".to_string()]
/// );
/// # Ok::<(), objection_tally::TallyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator<'d> {
    directory: &'d VoterDirectory,
    classifier: Classifier,
    members: BTreeMap<String, MemberTally>,
    ballots: BTreeMap<String, BallotTally>,
    total_objections: u64,
    failed_pages: Vec<FailedPage>,
}

// Why a row does not count as a vote.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Rejection {
    // Not a vote: another table, boilerplate, empty answer.
    NotAVote,
    Anomaly(RowAnomalyKind),
}

impl<'d> Aggregator<'d> {
    pub fn new(directory: &'d VoterDirectory) -> Aggregator<'d> {
        Aggregator::with_classifier(directory, Classifier::default())
    }

    pub fn with_classifier(directory: &'d VoterDirectory, classifier: Classifier) -> Aggregator<'d> {
        Aggregator {
            directory,
            classifier,
            members: BTreeMap::new(),
            ballots: BTreeMap::new(),
            total_objections: 0,
            failed_pages: Vec::new(),
        }
    }

    /// Reads the metadata and the votes of a result page and adds them to the tallies.
    ///
    /// If the title or the year cannot be found, the page is recorded as failed
    /// and an error is returned. Nothing else is changed in this case.
    pub fn process_page(&mut self, ballot_id: &str, page: &str) -> Result<PageReport, TallyError> {
        let metadata = match extract_ballot_metadata(page) {
            Ok(md) => md,
            Err(cause) => {
                error!("Ballot {}: cannot read the result page: {}", ballot_id, cause);
                self.failed_pages.push(FailedPage {
                    ballot_id: ballot_id.to_string(),
                    cause,
                });
                return Err(TallyError::MalformedBallotPage {
                    ballot_id: ballot_id.to_string(),
                    cause,
                });
            }
        };
        let ballot = BallotDescriptor {
            id: ballot_id.to_string(),
            title: metadata.title,
            year: metadata.year,
        };
        Ok(self.process_rows(ballot, extract_vote_rows(page)))
    }

    /// Adds the rows of one page, for a ballot whose metadata is already known.
    ///
    /// An identity is counted at most once per call.
    pub fn process_rows<I>(&mut self, ballot: BallotDescriptor, rows: I) -> PageReport
    where
        I: IntoIterator<Item = RawVoteRow>,
    {
        let mut report = PageReport {
            ballot,
            accepted: 0,
            filtered: 0,
            duplicates: 0,
            anomalies: Vec::new(),
            unclassified: Vec::new(),
        };
        let mut seen: HashSet<String> = HashSet::new();

        for row in rows {
            let record = VoteRecord::from_row(&report.ballot.id, &row);
            match screen(&row, &record) {
                Some(Rejection::NotAVote) => {
                    debug!(
                        "process_rows: ballot {}: ignoring row {:?}",
                        report.ballot.id, row
                    );
                    report.filtered += 1;
                    continue;
                }
                Some(Rejection::Anomaly(kind)) => {
                    warn!(
                        "Member name parsing error in ballot {} ({:?}): {:?}",
                        report.ballot.id, kind, row.voter_cell
                    );
                    report.anomalies.push(RowAnomaly {
                        voter_cell: row.voter_cell.clone(),
                        kind,
                    });
                    continue;
                }
                None => {}
            }

            let identity = self.directory.resolve(&record.voter_name).to_string();
            if seen.contains(&identity) {
                debug!(
                    "process_rows: ballot {}: {} already counted",
                    report.ballot.id, identity
                );
                report.duplicates += 1;
                continue;
            }

            let category = self.classifier.classify(&record.position_text);
            debug!(
                "process_rows: ballot {}: {} ({}) -> {:?}",
                report.ballot.id, identity, record.voter_name, category
            );
            self.members
                .entry(identity.clone())
                .or_default()
                .record(category);
            let ballot_tally = self.ballots.entry(report.ballot.title.clone()).or_default();
            match category {
                PositionCategory::FormalObjection(_) => {
                    self.total_objections += 1;
                    ballot_tally.objector_identities.push(identity.clone());
                }
                PositionCategory::Support => {
                    ballot_tally.total_support += 1;
                }
                PositionCategory::Unknown => {
                    warn!(
                        "Unknown position in ballot {} for {}: {:?}",
                        report.ballot.id, record.voter_name, record.position_text
                    );
                    report.unclassified.push(UnclassifiedPosition {
                        voter: record.voter_name.clone(),
                        position: record.position_text.clone(),
                    });
                }
                PositionCategory::DoesNotSupport | PositionCategory::Abstain => {}
            }
            seen.insert(identity);
            report.accepted += 1;
        }

        info!(
            "Ballot {} ({}): {} votes, {} ignored rows, {} duplicates, {} anomalies, {} unknown positions",
            report.ballot.id,
            report.ballot.title,
            report.accepted,
            report.filtered,
            report.duplicates,
            report.anomalies.len(),
            report.unclassified.len()
        );
        report
    }

    pub fn members(&self) -> &BTreeMap<String, MemberTally> {
        &self.members
    }

    pub fn ballots(&self) -> &BTreeMap<String, BallotTally> {
        &self.ballots
    }

    pub fn total_objections(&self) -> u64 {
        self.total_objections
    }

    pub fn failed_pages(&self) -> &[FailedPage] {
        &self.failed_pages
    }

    pub fn finish(self) -> TallyResults {
        TallyResults {
            members: self.members,
            ballots: self.ballots,
            total_objections: self.total_objections,
            failed_pages: self.failed_pages,
        }
    }
}

fn screen(row: &RawVoteRow, record: &VoteRecord) -> Option<Rejection> {
    if record.voter_name.contains("products")
        || record.position_text.chars().count() < MIN_POSITION_LEN
        || record.position_text.contains("Obsolete Recommendations")
    {
        return Some(Rejection::NotAVote);
    }
    let cell = row.voter_cell.trim();
    if cell.contains("<td>") {
        return Some(Rejection::Anomaly(RowAnomalyKind::EmbeddedCellDelimiter));
    }
    if cell.contains(['\n', '\r']) {
        return Some(Rejection::Anomaly(RowAnomalyKind::EmbeddedLineBreak));
    }
    None
}
