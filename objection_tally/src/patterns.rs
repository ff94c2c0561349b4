//! The structural patterns recognized in the pages.
//!
//! All the knowledge about the markup of the voting platform is kept in this
//! module. Each pattern is exposed as a function returning the raw (still
//! encoded) fragments it matched, so that a change of format upstream only
//! requires an update here.

use once_cell::sync::Lazy;
use regex::Regex;

// A results link of the ballot index, and the title attribute on the same line.
static INDEX_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"href='(\S*)/results'.*title='([^']*)'").expect("index link pattern")
});

static REVIEW_REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)call for review.*(charter|recommendation)").expect("review request pattern")
});

// A row header cell immediately followed, on the next line, by a data cell.
static VOTE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<tr><th scope='row'>([^<]*)</th>\r?\n<td>([^<]*)</td>").expect("vote row pattern")
});

// <title>context: the title - suffix</title>. The greedy group stops at the last " - ".
static TITLE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:<title>)[^:<]*:([^<]*) - [^<]*(?i:</title>)").expect("title pattern")
});

// "(is|was) open from <date>". The year is the first standalone four-digit number.
static OPEN_FROM_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)open from.{0,80}?\b(\d{4})\b").expect("open from pattern")
});

static ROSTER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<h2>([^<]*)|<h3 class="h5 card-title">\s*([^<\r\n]*)"#).expect("roster pattern")
});

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct IndexLinkMatch<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct VoteRowMatch<'a> {
    pub header_cell: &'a str,
    pub data_cell: &'a str,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RosterMatch<'a> {
    /// The heading of the organization card, with its qualifier if any.
    pub heading: &'a str,
    pub member: &'a str,
}

/// All the results links of a ballot index, in document order.
pub fn index_links(page: &str) -> impl Iterator<Item = IndexLinkMatch<'_>> + '_ {
    INDEX_LINK.captures_iter(page).filter_map(|caps| {
        Some(IndexLinkMatch {
            id: caps.get(1)?.as_str(),
            title: caps.get(2)?.as_str(),
        })
    })
}

/// True if a (decoded) ballot description is a call for review of a charter
/// or of a recommendation.
pub fn is_review_request(description: &str) -> bool {
    REVIEW_REQUEST.is_match(description)
}

/// All the header/data row pairs of a page, in document order.
pub fn vote_rows(page: &str) -> impl Iterator<Item = VoteRowMatch<'_>> + '_ {
    VOTE_ROW.captures_iter(page).filter_map(|caps| {
        Some(VoteRowMatch {
            header_cell: caps.get(1)?.as_str(),
            data_cell: caps.get(2)?.as_str(),
        })
    })
}

/// The middle part of the title header, untrimmed.
pub fn title_header(page: &str) -> Option<&str> {
    TITLE_HEADER
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn open_from_year(page: &str) -> Option<u32> {
    OPEN_FROM_YEAR
        .captures(page)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// The members of the roster, each with the closest organization heading above it.
/// Members found before any heading are dropped.
pub fn roster_entries(page: &str) -> impl Iterator<Item = RosterMatch<'_>> + '_ {
    let mut heading: Option<&str> = None;
    ROSTER_BLOCK.captures_iter(page).filter_map(move |caps| {
        if let Some(h) = caps.get(1) {
            heading = Some(h.as_str());
            return None;
        }
        let member = caps.get(2)?.as_str().trim();
        if member.is_empty() {
            return None;
        }
        heading.map(|heading| RosterMatch { heading, member })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_links_in_order() {
        let page = "<li><a href='12345/results' title='Call for Review: Foo Charter'>x</a></li>\n\
                    <li><a href='other' title='nothing'>y</a></li>\n\
                    <li><a href='abc-def/results' class='v' title='Call for Review: Bar 1.0 Proposed Recommendation'>z</a></li>\n";
        let links: Vec<IndexLinkMatch> = index_links(page).collect();
        assert_eq!(
            links,
            vec![
                IndexLinkMatch {
                    id: "12345",
                    title: "Call for Review: Foo Charter"
                },
                IndexLinkMatch {
                    id: "abc-def",
                    title: "Call for Review: Bar 1.0 Proposed Recommendation"
                },
            ]
        );
    }

    #[test]
    fn review_requests() {
        assert!(is_review_request("Call for Review: Foo Working Group Charter"));
        assert!(is_review_request("CALL FOR REVIEW of proposed RECOMMENDATION"));
        assert!(!is_review_request("Charter call for review"));
        assert!(!is_review_request("Call for Review: Process 2021"));
        assert!(!is_review_request("Election of the Advisory Board"));
    }

    #[test]
    fn vote_rows_need_adjacent_cells() {
        let page = "<table>\n<tr><th scope='row'>Jane Doe (Individual)</th>\n<td>supports publication</td></tr>\n\
                    <tr><th scope='row'>Detached</th><td>same line</td></tr>\n\
                    <tr><th scope='row'>John Roe</th>\r\n<td>abstains</td></tr>\n</table>";
        let rows: Vec<VoteRowMatch> = vote_rows(page).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].header_cell, "Jane Doe (Individual)");
        assert_eq!(rows[0].data_cell, "supports publication");
        assert_eq!(rows[1].header_cell, "John Roe");
    }

    #[test]
    fn title_keeps_inner_separators() {
        let page = "<head><title>Results: Call for Review: A - B Charter - WBS</title></head>";
        assert_eq!(title_header(page), Some(" Call for Review: A - B Charter"));
        assert_eq!(title_header("<title>No separator</title>"), None);
        assert_eq!(title_header("<h1>Results: X - Y</h1>"), None);
    }

    #[test]
    fn years() {
        assert_eq!(
            open_from_year("<p>This questionnaire was open from 2021-09-16 to 2021-10-14.</p>"),
            Some(2021)
        );
        assert_eq!(
            open_from_year("This questionnaire is open from March 3, 2020 to April 1, 2020"),
            Some(2020)
        );
        assert_eq!(open_from_year("opened 2019-01-01"), None);
    }

    #[test]
    fn roster_pairs_member_with_closest_heading() {
        let page = r#"<h3 class="h5 card-title">
              Orphan
            <h2>Acme Corp - Member since 2001</h2>
            <div class="card">
              <h3 class="h5 card-title">
                Jane Doe
              </h3>
            </div>
            <h2>Widgets &amp; Co</h2>
            <h3 class="h5 card-title">John Roe</h3>
            <h3 class="h5 card-title">Ann Other</h3>"#;
        let entries: Vec<RosterMatch> = roster_entries(page).collect();
        assert_eq!(
            entries,
            vec![
                RosterMatch {
                    heading: "Acme Corp - Member since 2001",
                    member: "Jane Doe"
                },
                RosterMatch {
                    heading: "Widgets &amp; Co",
                    member: "John Roe"
                },
                RosterMatch {
                    heading: "Widgets &amp; Co",
                    member: "Ann Other"
                },
            ]
        );
    }
}
