//! Classification of the free-text positions.
//!
//! The positions are sentences picked from a list that changed over the years.
//! The rules are evaluated in order and the first one that matches decides.
//! The objection and abstention markers are unambiguous, so they come first;
//! the support phrasings are a growing list and come last.

use crate::config::{ObjectionSubject, PositionCategory};

pub const FORMAL_OBJECTION_MARKER: &str = "[Formal Objection]";

/// The phrasings of a support vote observed so far.
pub const SUPPORT_PHRASES: &[&str] = &[
    "supports publication",
    "supports this Charter",
    "support the proposal",
    "supports the proposal",
    "supports the proposed Charters",
    "supports this Activity Proposal",
    "supports republishing",
    "supports extending the charter",
];

/// How a rule looks at the text. All the comparisons are case-sensitive.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Matcher {
    Contains(String),
    ContainsAny(Vec<String>),
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Contains(s) => text.contains(s.as_str()),
            Matcher::ContainsAny(l) => l.iter().any(|s| text.contains(s.as_str())),
        }
    }
}

/// What a rule decides when it matches.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Verdict {
    Category(PositionCategory),
    /// A formal objection, with the subject read from the text.
    Objection,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Rule {
    pub matcher: Matcher,
    pub verdict: Verdict,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Classifier {
        let phrases = SUPPORT_PHRASES.iter().map(|s| s.to_string()).collect();
        Classifier {
            rules: vec![
                Rule {
                    matcher: Matcher::Contains(FORMAL_OBJECTION_MARKER.to_string()),
                    verdict: Verdict::Objection,
                },
                Rule {
                    matcher: Matcher::ContainsAny(vec!["abstains".to_string(), "other".to_string()]),
                    verdict: Verdict::Category(PositionCategory::Abstain),
                },
                Rule {
                    matcher: Matcher::Contains("does not support".to_string()),
                    verdict: Verdict::Category(PositionCategory::DoesNotSupport),
                },
                Rule {
                    matcher: Matcher::ContainsAny(phrases),
                    verdict: Verdict::Category(PositionCategory::Support),
                },
            ],
        }
    }
}

impl Classifier {
    /// Adds phrasings to the support rule.
    pub fn with_support_phrases<I, S>(mut self, phrases: I) -> Classifier
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let support = Verdict::Category(PositionCategory::Support);
        let extra: Vec<String> = phrases.into_iter().map(|s| s.into()).collect();
        match self.rules.iter_mut().find(|r| r.verdict == support) {
            Some(Rule {
                matcher: Matcher::ContainsAny(l),
                ..
            }) => l.extend(extra),
            _ => self.rules.push(Rule {
                matcher: Matcher::ContainsAny(extra),
                verdict: support,
            }),
        }
        self
    }

    /// Appends a rule. It has the lowest priority.
    pub fn with_rule(mut self, rule: Rule) -> Classifier {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classifies a normalized position. Returns `Unknown` when no rule matches.
    pub fn classify(&self, position: &str) -> PositionCategory {
        self.rules
            .iter()
            .find(|r| r.matcher.matches(position))
            .map(|r| match r.verdict {
                Verdict::Category(c) => c,
                Verdict::Objection => PositionCategory::FormalObjection(objection_subject(position)),
            })
            .unwrap_or(PositionCategory::Unknown)
    }
}

pub fn objection_subject(position: &str) -> ObjectionSubject {
    if position.contains("Charter") {
        ObjectionSubject::Charter
    } else if position.contains("Recommendation") {
        ObjectionSubject::Recommendation
    } else {
        ObjectionSubject::Other
    }
}

/// Classifies a position with the default rules.
pub fn classify(position: &str) -> PositionCategory {
    Classifier::default().classify(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectionSubject::*;
    use crate::config::PositionCategory::*;

    #[test]
    fn objections_by_subject() {
        assert_eq!(
            classify("[Formal Objection] to this Charter"),
            FormalObjection(Charter)
        );
        assert_eq!(
            classify("[Formal Objection] to this Recommendation"),
            FormalObjection(Recommendation)
        );
        assert_eq!(
            classify("[Formal Objection] to this document"),
            FormalObjection(Other)
        );
    }

    #[test]
    fn charter_wins_over_recommendation() {
        for text in [
            "[Formal Objection] Charter",
            "[Formal Objection] Recommendation track Charter",
            "[Formal Objection] Charter; supports publication as a Recommendation",
            "other Recommendation [Formal Objection] Charter abstains",
        ] {
            assert_eq!(classify(text), FormalObjection(Charter), "{}", text);
        }
    }

    #[test]
    fn objection_beats_support() {
        assert_eq!(
            classify("supports publication [Formal Objection]"),
            FormalObjection(Other)
        );
        assert_eq!(
            classify("supports this Charter [Formal Objection] to this Charter"),
            FormalObjection(Charter)
        );
    }

    #[test]
    fn abstentions() {
        assert_eq!(classify("abstains due to other commitments"), Abstain);
        assert_eq!(classify("abstains from this vote"), Abstain);
        assert_eq!(classify("has other comments"), Abstain);
        // The marker is case-sensitive.
        assert_eq!(classify("Abstains"), Unknown);
        // "other" comes before "does not support".
        assert_eq!(classify("does not support, for other reasons"), Abstain);
    }

    #[test]
    fn does_not_support() {
        assert_eq!(
            classify("does not support publication"),
            DoesNotSupport
        );
        // "does not support" is checked before the support phrases.
        assert_eq!(
            classify("does not support this Charter but supports publication"),
            DoesNotSupport
        );
    }

    #[test]
    fn support_phrases() {
        for text in [
            "supports publication as a W3C Recommendation",
            "supports this Charter as proposed",
            "support the proposal",
            "supports the proposal",
            "supports the proposed Charters",
            "supports this Activity Proposal",
            "supports republishing the Recommendation",
            "supports extending the charter until June",
        ] {
            assert_eq!(classify(text), Support, "{}", text);
        }
        assert_eq!(classify("Supports Publication"), Unknown);
        assert_eq!(classify("endorses the document"), Unknown);
    }

    #[test]
    fn extra_support_phrases() {
        let c = Classifier::default().with_support_phrases(vec!["endorses the document"]);
        assert_eq!(c.classify("endorses the document"), Support);
        assert_eq!(c.classify("supports publication"), Support);
        // The order of the rules is unchanged.
        assert_eq!(c.rules().len(), 4);
        assert_eq!(
            c.classify("[Formal Objection] endorses the document"),
            FormalObjection(Other)
        );
    }

    #[test]
    fn extra_rules_come_last() {
        let c = Classifier::default().with_rule(Rule {
            matcher: Matcher::Contains("objects".to_string()),
            verdict: Verdict::Category(DoesNotSupport),
        });
        assert_eq!(c.classify("objects strongly"), DoesNotSupport);
        assert_eq!(c.classify("objects but supports publication"), Support);
    }
}
