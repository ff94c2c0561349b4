//! Orderings of the tallies used by the reports.
//!
//! All the sorts are stable: ties keep the alphabetical order of the tallies.

use crate::config::{BallotTally, MemberTally, TallyResults};

/// Ballots need at least this many supporters to appear in the most supported ones.
pub const DEFAULT_MIN_SUPPORTERS: u64 = 40;

/// The kind of work a ballot is about, as read from its title.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum BallotKind {
    Charter,
    Recommendation,
}

impl BallotKind {
    pub fn of_title(title: &str) -> BallotKind {
        if title.to_lowercase().contains("charter") {
            BallotKind::Charter
        } else {
            BallotKind::Recommendation
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MemberRanking<'a> {
    pub member: &'a str,
    pub objections: u64,
    pub votes_cast: u64,
    /// Rounded down.
    pub objection_percent: u64,
}

pub fn objection_percent(tally: &MemberTally) -> u64 {
    let votes = tally.votes_cast();
    if votes == 0 {
        0
    } else {
        tally.objections_total * 100 / votes
    }
}

/// The ballots with at least `min_supporters` support votes, most supported first.
pub fn most_supported(results: &TallyResults, min_supporters: u64) -> Vec<(&str, &BallotTally)> {
    let mut l: Vec<(&str, &BallotTally)> = results
        .ballots
        .iter()
        .filter(|(_, b)| b.total_support >= min_supporters)
        .map(|(title, b)| (title.as_str(), b))
        .collect();
    l.sort_by(|a, b| b.1.total_support.cmp(&a.1.total_support));
    l
}

/// The ballots of one kind that received objections, most objected first.
pub fn objections_by_kind(results: &TallyResults, kind: BallotKind) -> Vec<(&str, &BallotTally)> {
    let mut l: Vec<(&str, &BallotTally)> = results
        .ballots
        .iter()
        .filter(|(title, b)| !b.objector_identities.is_empty() && BallotKind::of_title(title) == kind)
        .map(|(title, b)| (title.as_str(), b))
        .collect();
    l.sort_by(|a, b| {
        b.1.objector_identities
            .len()
            .cmp(&a.1.objector_identities.len())
    });
    l
}

/// One line per member, the members with the most objections first.
pub fn member_rankings(results: &TallyResults) -> Vec<MemberRanking<'_>> {
    let mut l: Vec<MemberRanking> = results
        .members
        .iter()
        .map(|(member, tally)| MemberRanking {
            member: member.as_str(),
            objections: tally.objections_total,
            votes_cast: tally.votes_cast(),
            objection_percent: objection_percent(tally),
        })
        .collect();
    l.sort_by(|a, b| b.objections.cmp(&a.objections));
    l
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(support: u64, objectors: &[&str]) -> BallotTally {
        BallotTally {
            total_support: support,
            objector_identities: objectors.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn results() -> TallyResults {
        let mut r = TallyResults::default();
        r.ballots.insert("2020 A Charter".to_string(), ballot(41, &["X"]));
        r.ballots.insert("2020 B Recommendation".to_string(), ballot(39, &[]));
        r.ballots.insert("2021 C Recommendation".to_string(), ballot(40, &["X", "Y"]));
        r.ballots.insert("2021 D charter".to_string(), ballot(60, &["Y", "Z", "X"]));
        r.ballots.insert("2022 E Recommendation".to_string(), ballot(45, &["Z"]));
        r.members.insert(
            "X".to_string(),
            MemberTally {
                support: 1,
                objections_by_charter: 2,
                objections_by_recommendation: 1,
                objections_total: 3,
                ..Default::default()
            },
        );
        r.members.insert(
            "Y".to_string(),
            MemberTally {
                support: 2,
                abstain: 1,
                unknown: 4,
                objections_by_other: 1,
                objections_total: 1,
                ..Default::default()
            },
        );
        r.members.insert("Z".to_string(), MemberTally::default());
        r
    }

    #[test]
    fn percent_is_rounded_down() {
        let r = results();
        assert_eq!(objection_percent(&r.members["X"]), 75);
        // Unknown positions are not votes: 1 / 4
        assert_eq!(objection_percent(&r.members["Y"]), 25);
        assert_eq!(objection_percent(&r.members["Z"]), 0);
        let t = MemberTally {
            support: 2,
            objections_total: 1,
            ..Default::default()
        };
        assert_eq!(objection_percent(&t), 33);
    }

    #[test]
    fn most_supported_needs_forty() {
        let r = results();
        let titles: Vec<&str> = most_supported(&r, DEFAULT_MIN_SUPPORTERS)
            .iter()
            .map(|p| p.0)
            .collect();
        assert_eq!(
            titles,
            vec![
                "2021 D charter",
                "2022 E Recommendation",
                "2020 A Charter",
                "2021 C Recommendation"
            ]
        );
    }

    #[test]
    fn objections_split_by_kind() {
        let r = results();
        let charters: Vec<&str> = objections_by_kind(&r, BallotKind::Charter)
            .iter()
            .map(|p| p.0)
            .collect();
        assert_eq!(charters, vec!["2021 D charter", "2020 A Charter"]);
        let recs: Vec<&str> = objections_by_kind(&r, BallotKind::Recommendation)
            .iter()
            .map(|p| p.0)
            .collect();
        assert_eq!(recs, vec!["2021 C Recommendation", "2022 E Recommendation"]);
    }

    #[test]
    fn members_by_objections() {
        let r = results();
        let l = member_rankings(&r);
        let names: Vec<&str> = l.iter().map(|m| m.member).collect();
        assert_eq!(names, vec!["X", "Y", "Z"]);
        assert_eq!(
            l[0],
            MemberRanking {
                member: "X",
                objections: 3,
                votes_cast: 4,
                objection_percent: 75
            }
        );
    }
}
