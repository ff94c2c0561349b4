// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// An entry of the ballot index: the opaque identifier used in the results link
/// and the (decoded) description carried by the link title.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BallotLink {
    pub id: String,
    pub description: String,
}

/// A two-cell row of a result page, as found in the markup.
///
/// Nothing is known about the content at this point: the row may not even
/// belong to the table of votes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawVoteRow {
    pub voter_cell: String,
    pub position_cell: String,
}

/// The metadata found in the header of a result page.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BallotMetadata {
    /// The title of the ballot, prefixed with the year.
    pub title: String,
    pub year: u32,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BallotDescriptor {
    pub id: String,
    pub title: String,
    pub year: u32,
}

/// A vote, once the cells have been cleaned up.
/// This is before resolving the voter and classifying the position.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRecord {
    pub ballot_id: String,
    pub voter_name: String,
    pub position_text: String,
}

// ******** Classification *********

/// The subject of a formal objection.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ObjectionSubject {
    Charter,
    Recommendation,
    Other,
}

/// All the positions a voter can take on a ballot.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PositionCategory {
    Support,
    DoesNotSupport,
    Abstain,
    FormalObjection(ObjectionSubject),
    /// None of the known phrasings matched. The rules need to be extended.
    Unknown,
}

impl PositionCategory {
    pub fn is_objection(&self) -> bool {
        matches!(self, PositionCategory::FormalObjection(_))
    }
}

// ******** Output data structures *********

/// Counters for one member organization (or one individual when the name could
/// not be resolved).
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MemberTally {
    pub support: u64,
    pub does_not_support: u64,
    pub abstain: u64,
    pub unknown: u64,
    pub objections_by_charter: u64,
    pub objections_by_recommendation: u64,
    pub objections_by_other: u64,
    pub objections_total: u64,
}

impl MemberTally {
    pub fn record(&mut self, category: PositionCategory) {
        match category {
            PositionCategory::Support => self.support += 1,
            PositionCategory::DoesNotSupport => self.does_not_support += 1,
            PositionCategory::Abstain => self.abstain += 1,
            PositionCategory::Unknown => self.unknown += 1,
            PositionCategory::FormalObjection(subject) => {
                match subject {
                    ObjectionSubject::Charter => self.objections_by_charter += 1,
                    ObjectionSubject::Recommendation => self.objections_by_recommendation += 1,
                    ObjectionSubject::Other => self.objections_by_other += 1,
                }
                self.objections_total += 1;
            }
        }
    }

    /// The number of votes with a known position.
    /// Unknown positions are not counted as cast votes.
    pub fn votes_cast(&self) -> u64 {
        self.objections_total + self.abstain + self.does_not_support + self.support
    }
}

/// Counters for one ballot, keyed by its title.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct BallotTally {
    pub total_support: u64,
    /// One entry per objection, in the order they were found.
    pub objector_identities: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RowAnomalyKind {
    EmbeddedCellDelimiter,
    EmbeddedLineBreak,
}

/// A row whose voter cell cannot be a name. It was skipped.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RowAnomaly {
    pub voter_cell: String,
    pub kind: RowAnomalyKind,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnclassifiedPosition {
    pub voter: String,
    pub position: String,
}

/// What a single page contributed to the tallies.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PageReport {
    pub ballot: BallotDescriptor,
    pub accepted: u32,
    /// Rows that are not votes (unrelated tables, boilerplate).
    pub filtered: u32,
    /// Rows for an identity already counted on this page.
    pub duplicates: u32,
    pub anomalies: Vec<RowAnomaly>,
    pub unclassified: Vec<UnclassifiedPosition>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FailedPage {
    pub ballot_id: String,
    pub cause: MalformedPage,
}

/// The outcome of a complete run.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct TallyResults {
    pub members: BTreeMap<String, MemberTally>,
    pub ballots: BTreeMap<String, BallotTally>,
    pub total_objections: u64,
    pub failed_pages: Vec<FailedPage>,
}

// ********* Errors **********

/// The structural element of a result page that could not be found.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum MalformedPage {
    MissingTitle,
    MissingYear,
}

impl Error for MalformedPage {}

impl Display for MalformedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedPage::MissingTitle => write!(f, "no title header found"),
            MalformedPage::MissingYear => write!(f, "no 'open from' statement found"),
        }
    }
}

/// Errors that prevent a page from being tallied.
///
/// They indicate that the format of the pages changed and that the extraction
/// patterns need an update. The other pages are not affected.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyError {
    MalformedBallotPage {
        ballot_id: String,
        cause: MalformedPage,
    },
}

impl Error for TallyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TallyError::MalformedBallotPage { cause, .. } => Some(cause),
        }
    }
}

impl Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyError::MalformedBallotPage { ballot_id, cause } => {
                write!(f, "malformed ballot page {}: {}", ballot_id, cause)
            }
        }
    }
}
