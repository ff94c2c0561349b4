use log::debug;

use crate::config::BallotLink;
use crate::entities::decode;
use crate::patterns;

/// Lists the ballots of the index that are calls for review of a charter or of a
/// recommendation, in the order of the index.
///
/// Ids listed several times by the index are returned several times.
pub fn select_relevant_ballots(index_page: &str) -> impl Iterator<Item = BallotLink> + '_ {
    patterns::index_links(index_page).filter_map(|m| {
        let description = decode(m.title);
        if patterns::is_review_request(&description) {
            debug!("select_relevant_ballots: keeping {}: {}", m.id, description);
            Some(BallotLink {
                id: m.id.to_string(),
                description,
            })
        } else {
            debug!("select_relevant_ballots: skipping {}: {}", m.id, description);
            None
        }
    })
}
