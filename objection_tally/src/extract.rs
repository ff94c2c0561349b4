//! Extraction of the ballot metadata and of the vote rows of a result page.

use log::debug;

use crate::config::*;
use crate::entities::decode;
use crate::patterns;

/// Reads the title and the year of a result page.
///
/// The returned title is prefixed with the year, so that ballots with the same
/// name in different years are kept apart.
pub fn extract_ballot_metadata(page: &str) -> Result<BallotMetadata, MalformedPage> {
    let raw_title = patterns::title_header(page).ok_or(MalformedPage::MissingTitle)?;
    let year = patterns::open_from_year(page).ok_or(MalformedPage::MissingYear)?;
    let title = format!("{} {}", year, decode(raw_title).trim());
    debug!("extract_ballot_metadata: title: {:?}", title);
    Ok(BallotMetadata { title, year })
}

/// All the two-cell rows of a page, in document order.
///
/// The rows are returned as found: some of them are not votes and the cells
/// are still encoded.
pub fn extract_vote_rows(page: &str) -> impl Iterator<Item = RawVoteRow> + '_ {
    patterns::vote_rows(page).map(|m| RawVoteRow {
        voter_cell: m.header_cell.to_string(),
        position_cell: m.data_cell.to_string(),
    })
}

/// Decodes the name and removes the annotation in parentheses, if any:
/// `Jane Doe (Individual User)` becomes `Jane Doe`.
pub fn normalize_voter_name(cell: &str) -> String {
    let name = decode(cell.trim());
    let stripped = match name.find(" (") {
        Some(start) => match name[start..].rfind(')') {
            Some(end) => format!("{}{}", &name[..start], &name[start + end + 1..]),
            None => name.clone(),
        },
        None => name.clone(),
    };
    stripped.trim().to_string()
}

/// Decodes the position and puts it on a single line, with single spaces.
pub fn normalize_position(cell: &str) -> String {
    decode(cell)
        .replace(['\r', '\n'], " ")
        .split(' ')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

impl VoteRecord {
    pub fn from_row(ballot_id: &str, row: &RawVoteRow) -> VoteRecord {
        VoteRecord {
            ballot_id: ballot_id.to_string(),
            voter_name: normalize_voter_name(&row.voter_cell),
            position_text: normalize_position(&row.position_cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<html><head>\n<title>Results of Questionnaire: Call for Review: Widgets 2.0 Proposed Recommendation - WBS</title>\n</head>\n\
        <body><p>This questionnaire was open from 2022-03-01 to 2022-03-29.</p>\n\
        <table>\n\
        <tr><th scope='row'>Jane Doe (Individual)</th>\n<td>[Formal Objection] to this Recommendation</td></tr>\n\
        <tr><th scope='row'>Fran&ccedil;ois Dupont</th>\n<td>supports publication\nas  a   Recommendation</td></tr>\n\
        </table></body></html>";

    #[test]
    fn metadata() {
        let md = extract_ballot_metadata(PAGE).unwrap();
        assert_eq!(md.year, 2022);
        assert_eq!(
            md.title,
            "2022 Call for Review: Widgets 2.0 Proposed Recommendation"
        );
    }

    #[test]
    fn metadata_decodes_title() {
        let page = "<title>Results: Review of Ink &amp; Paper Charter - WBS</title> is open from 2019-05-02";
        let md = extract_ballot_metadata(page).unwrap();
        assert_eq!(md.title, "2019 Review of Ink & Paper Charter");
    }

    #[test]
    fn metadata_missing_title() {
        let page = "<h1>Results</h1> open from 2020-01-01";
        assert_eq!(
            extract_ballot_metadata(page),
            Err(MalformedPage::MissingTitle)
        );
    }

    #[test]
    fn metadata_missing_year() {
        let page = "<title>Results: Some Charter - WBS</title><p>closed</p>";
        assert_eq!(
            extract_ballot_metadata(page),
            Err(MalformedPage::MissingYear)
        );
    }

    #[test]
    fn rows_are_raw() {
        let rows: Vec<RawVoteRow> = extract_vote_rows(PAGE).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].voter_cell, "Jane Doe (Individual)");
        assert_eq!(rows[1].voter_cell, "Fran&ccedil;ois Dupont");
        assert_eq!(
            rows[1].position_cell,
            "supports publication\nas  a   Recommendation"
        );
        // Each call scans the page again.
        assert_eq!(extract_vote_rows(PAGE).count(), 2);
    }

    #[test]
    fn voter_names() {
        assert_eq!(normalize_voter_name(" Jane Doe (Individual) "), "Jane Doe");
        assert_eq!(
            normalize_voter_name("Jane Doe (Individual User)"),
            "Jane Doe"
        );
        assert_eq!(normalize_voter_name("Fran&ccedil;ois"), "François");
        assert_eq!(normalize_voter_name("Acme (unclosed"), "Acme (unclosed");
        assert_eq!(normalize_voter_name("David Singer"), "David Singer");
    }

    #[test]
    fn positions() {
        assert_eq!(
            normalize_position("  supports publication\r\nas  a   Recommendation "),
            "supports publication as a Recommendation"
        );
        assert_eq!(
            normalize_position("[Formal Objection] &quot;Charter&quot;"),
            "[Formal Objection] \"Charter\""
        );
    }

    #[test]
    fn record_from_row() {
        let row = RawVoteRow {
            voter_cell: "Jane Doe (Individual)".to_string(),
            position_cell: "abstains\n(no opinion)".to_string(),
        };
        assert_eq!(
            VoteRecord::from_row("12345", &row),
            VoteRecord {
                ballot_id: "12345".to_string(),
                voter_name: "Jane Doe".to_string(),
                position_text: "abstains (no opinion)".to_string(),
            }
        );
    }
}
