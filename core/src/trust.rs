use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustChange {
    Granted,
    Revoked,
    /// Owners always trust themselves; self-targeted changes do nothing.
    Ignored,
}

/// Per-owner set of players allowed to act on the owner's games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustStore {
    grants: BTreeMap<String, BTreeSet<String>>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trusted(&self, owner: &str, target: &str) -> bool {
        owner == target
            || self
                .grants
                .get(owner)
                .is_some_and(|granted| granted.contains(target))
    }

    /// Grants trust, leaving an existing grant in place.
    pub fn grant(&mut self, owner: &str, target: &str) -> TrustChange {
        if owner == target {
            return TrustChange::Ignored;
        }
        self.grants
            .entry(owner.into())
            .or_default()
            .insert(target.into());
        TrustChange::Granted
    }

    /// Flips the grant for `(owner, target)`.
    pub fn toggle(&mut self, owner: &str, target: &str) -> TrustChange {
        if owner == target {
            return TrustChange::Ignored;
        }

        if let Some(granted) = self.grants.get_mut(owner) {
            if granted.remove(target) {
                if granted.is_empty() {
                    self.grants.remove(owner);
                }
                return TrustChange::Revoked;
            }
        }

        self.grant(owner, target)
    }

    pub fn trusted_by<'a>(&'a self, owner: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.grants
            .get(owner)
            .into_iter()
            .flat_map(|granted| granted.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn toggle_twice_returns_to_untrusted() {
        let mut trust = TrustStore::new();

        assert_eq!(trust.toggle("alice", "bob"), TrustChange::Granted);
        assert!(trust.is_trusted("alice", "bob"));
        assert_eq!(trust.toggle("alice", "bob"), TrustChange::Revoked);
        assert!(!trust.is_trusted("alice", "bob"));
        assert_eq!(trust, TrustStore::new());
    }

    #[test]
    fn self_trust_is_implicit_and_ignored() {
        let mut trust = TrustStore::new();

        assert!(trust.is_trusted("alice", "alice"));
        assert_eq!(trust.toggle("alice", "alice"), TrustChange::Ignored);
        assert_eq!(trust.grant("alice", "alice"), TrustChange::Ignored);
        assert!(trust.is_trusted("alice", "alice"));
    }

    #[test]
    fn grants_are_one_directional() {
        let mut trust = TrustStore::new();
        trust.toggle("alice", "bob");
        trust.grant("alice", "carol");
        trust.grant("alice", "carol");

        assert!(!trust.is_trusted("bob", "alice"));
        assert_eq!(trust.trusted_by("alice").collect::<Vec<_>>(), ["bob", "carol"]);
        assert_eq!(trust.trusted_by("bob").count(), 0);
    }
}
