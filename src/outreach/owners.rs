//! List-source policy: maps an inbound list label to an owning partner.
//!
//! Matching is a case-insensitive substring test of each owner's token
//! against the label. Owners are checked in table order and the first
//! match wins, so `"james-zi-import"` belongs to james.

use serde::Serialize;

/// An internal stakeholder that leads are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    /// Lowercase token searched for in the list-source label.
    pub token: &'static str,
    /// Name used to sign outreach emails.
    pub sender_name: &'static str,
    pub email: &'static str,
    pub scheduling_link: &'static str,
}

/// Owner table in priority order.
pub const OWNERS: &[Owner] = &[
    Owner {
        token: "james",
        sender_name: "James",
        email: "james@scopvc.com",
        scheduling_link: "https://calendly.com/james-scopvc/30min",
    },
    Owner {
        token: "zi",
        sender_name: "Zi",
        email: "zi@scopvc.com",
        scheduling_link: "https://calendly.com/zi-scopvc/zoom-w-zi-scop-venture-capital",
    },
];

/// Outcome of classifying a list-source label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceClassification {
    pub authorized: bool,
    pub owner: Option<Owner>,
}

/// Pure classifier over a fixed owner table.
#[derive(Debug, Clone)]
pub struct ListSourcePolicy {
    owners: Vec<Owner>,
}

impl Default for ListSourcePolicy {
    fn default() -> Self {
        Self::new(OWNERS.to_vec())
    }
}

impl ListSourcePolicy {
    pub fn new(owners: Vec<Owner>) -> Self {
        Self { owners }
    }

    /// Classify a list-source label. No I/O.
    pub fn classify(&self, list_source: &str) -> SourceClassification {
        let label = list_source.to_lowercase();
        let owner = self
            .owners
            .iter()
            .find(|o| label.contains(&o.token.to_lowercase()))
            .cloned();

        match owner {
            Some(owner) => {
                tracing::debug!(list_source, owner = owner.email, "List source authorized");
                SourceClassification {
                    authorized: true,
                    owner: Some(owner),
                }
            }
            None => {
                tracing::warn!(list_source, "List source not attributed to any owner");
                SourceClassification {
                    authorized: false,
                    owner: None,
                }
            }
        }
    }
}
