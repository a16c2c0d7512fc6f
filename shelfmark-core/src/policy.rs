//! Reconciliation policies
//!
//! The batch CLI takes the top candidate automatically while interactive
//! front-ends rely on the user's choice. Both go through the same queue;
//! only the policy differs.

use crate::queue::ReconciliationEntry;
use crate::types::Selection;
use serde::{Deserialize, Serialize};

/// Decides the selection of a pending entry just before finalizing
pub trait SelectionPolicy: Send + Sync {
    fn choose(&self, entry: &ReconciliationEntry) -> Selection;
}

/// Keep whatever the user selected
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveSelect;

impl SelectionPolicy for InteractiveSelect {
    fn choose(&self, entry: &ReconciliationEntry) -> Selection {
        entry.selection()
    }
}

/// Take the service's top-ranked candidate for every entry left unselected.
/// Entries without fetched candidates stay unselected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTopMatch;

impl SelectionPolicy for AutoTopMatch {
    fn choose(&self, entry: &ReconciliationEntry) -> Selection {
        match entry.selection() {
            Selection::Selected(i) => Selection::Selected(i),
            Selection::Unselected => match entry.candidates() {
                Some(candidates) if !candidates.is_empty() => Selection::Selected(0),
                _ => Selection::Unselected,
            },
        }
    }
}

/// Policy names as they appear in requests and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Interactive,
    AutoTopMatch,
}

impl PolicyKind {
    pub fn policy(self) -> &'static dyn SelectionPolicy {
        match self {
            PolicyKind::Interactive => &InteractiveSelect,
            PolicyKind::AutoTopMatch => &AutoTopMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_serde() {
        let kind: PolicyKind = serde_json::from_str(r#""auto_top_match""#).unwrap();
        assert_eq!(kind, PolicyKind::AutoTopMatch);
        assert_eq!(
            serde_json::to_string(&PolicyKind::Interactive).unwrap(),
            r#""interactive""#
        );
    }
}
