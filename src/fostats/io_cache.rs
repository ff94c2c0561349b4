// Reading the pages from the cache directory.

use crate::fostats::*;

use std::path::{Path, PathBuf};

pub fn read_page(path: &Path) -> FoResult<String> {
    fs::read_to_string(path).context(OpeningFileSnafu {
        path: path.display().to_string(),
    })
}

/// The result pages of the ballots, one `<ballot id>.html` file per ballot.
pub struct ResultPages {
    root: PathBuf,
}

impl ResultPages {
    pub fn new(root: PathBuf) -> ResultPages {
        ResultPages { root }
    }

    fn page_path(&self, ballot_id: &str) -> Option<PathBuf> {
        // The id comes from the index page and becomes a file name.
        if ballot_id.is_empty()
            || ballot_id.contains('/')
            || ballot_id.contains('\\')
            || ballot_id.contains("..")
        {
            return None;
        }
        Some(self.root.join(format!("{}.html", ballot_id)))
    }

    /// The page of a ballot, if it is in the cache and readable.
    pub fn result_page(&self, ballot_id: &str) -> Option<String> {
        let p = match self.page_path(ballot_id) {
            Some(p) => p,
            None => {
                warn!("Ballot id {:?} cannot be used as a file name, skipping", ballot_id);
                return None;
            }
        };
        if !p.exists() {
            warn!("Result page {} is not in the cache, skipping", p.display());
            return None;
        }
        match read_page(&p) {
            Ok(page) => {
                debug!("result_page: read {} bytes from {}", page.len(), p.display());
                Some(page)
            }
            Err(e) => {
                warn!("Could not read the result page {}: {:?}", p.display(), e);
                None
            }
        }
    }
}
