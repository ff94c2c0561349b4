use log::{debug, info};
use std::collections::HashMap;

use crate::entities::decode;
use crate::patterns;

/// Representatives who voted under a name that is no longer listed in the roster.
pub const HISTORICAL_OVERRIDES: &[(&str, &str)] = &[("David Singer", "Apple, Inc.")];

/// Maps the display name of a voter to the organization it votes for.
///
/// The directory is built once and only read afterwards.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoterDirectory {
    organizations: HashMap<String, String>,
}

impl VoterDirectory {
    /// Builds the directory from the roster page, then applies the historical
    /// overrides. The overrides always win over the roster.
    pub fn from_roster(roster_page: &str) -> VoterDirectory {
        let mut organizations: HashMap<String, String> = HashMap::new();
        for entry in patterns::roster_entries(roster_page) {
            let heading = decode(entry.heading);
            // The heading may carry a qualifier: "Acme Corp - Member since 2001"
            let organization = heading.split(" - ").next().unwrap_or("").trim().to_string();
            let member = decode(entry.member).trim().to_string();
            debug!("from_roster: {:?} -> {:?}", member, organization);
            organizations.insert(member, organization);
        }
        let scanned = organizations.len();
        for (name, organization) in HISTORICAL_OVERRIDES {
            organizations.insert(name.to_string(), organization.to_string());
        }
        info!(
            "Voter directory: {} names from the roster, {} historical overrides",
            scanned,
            HISTORICAL_OVERRIDES.len()
        );
        VoterDirectory { organizations }
    }

    /// Applies additional overrides, after the historical ones.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> VoterDirectory
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, organization) in overrides {
            self.organizations.insert(name.into(), organization.into());
        }
        self
    }

    /// The organization of a voter, or the name itself if the voter is unknown.
    pub fn resolve<'a>(&'a self, voter_name: &'a str) -> &'a str {
        self.organizations
            .get(voter_name)
            .map(|s| s.as_str())
            .unwrap_or(voter_name)
    }

    pub fn organization(&self, voter_name: &str) -> Option<&str> {
        self.organizations.get(voter_name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }
}
