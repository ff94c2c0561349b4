// The text report printed on the standard output.

use objection_tally::summary::*;
use objection_tally::{BallotTally, TallyResults};

use std::fmt::Write;

const SEPARATOR: &str =
    "----------------------------------------------------------------------------";

fn push_ballots(out: &mut String, header: &str, ballots: &[(&str, &BallotTally)]) {
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", SEPARATOR);
    for (title, tally) in ballots {
        let _ = writeln!(
            out,
            "{:>10} | {} | {}",
            tally.objector_identities.len(),
            title,
            tally.objector_identities.join(", ")
        );
    }
    out.push('\n');
}

fn member_cell(member: &str) -> String {
    member.chars().take(39).collect()
}

pub fn render(results: &TallyResults, min_supporters: u64) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Most supported work (at least {} supporters)",
        min_supporters
    );
    let _ = writeln!(out, "{}", SEPARATOR);
    for (title, tally) in most_supported(results, min_supporters) {
        let _ = writeln!(out, "{:>10} | {}", tally.total_support, title);
    }
    out.push('\n');

    push_ballots(
        &mut out,
        "Objections by charter",
        &objections_by_kind(results, BallotKind::Charter),
    );
    push_ballots(
        &mut out,
        "Objections by proposed recommendation",
        &objections_by_kind(results, BallotKind::Recommendation),
    );

    let _ = writeln!(out, "Objections by member");
    let _ = writeln!(
        out,
        "{:>40} | {:>10} | {:>6} | {:>9} |",
        "", "Objection", "Total", "Objection"
    );
    let _ = writeln!(
        out,
        "{:>40} | {:>10} | {:>6} | {:>9} |",
        "W3C Member", "Count", "votes", "Percent"
    );
    let _ = writeln!(out, "{}", SEPARATOR);
    for ranking in member_rankings(results) {
        let _ = writeln!(
            out,
            "{:>40} | {:>10} | {:>6} | {:>9} |",
            member_cell(ranking.member),
            ranking.objections,
            ranking.votes_cast,
            format!("{}%", ranking.objection_percent)
        );
    }
    let _ = writeln!(out, "Total Voters: {}", results.members.len());
    let _ = writeln!(out, "Total Objections: {}", results.total_objections);

    if !results.failed_pages.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failed pages");
        let _ = writeln!(out, "{}", SEPARATOR);
        for fp in results.failed_pages.iter() {
            let _ = writeln!(out, "{} | {}", fp.ballot_id, fp.cause);
        }
    }
    out
}
