use std::collections::HashSet;
use std::fmt;

/// Platform-level abilities the bot needs in a channel before it can execute
/// a command there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    SendMessages,
    EmbedLinks,
    ManageMessages,
    AttachFiles,
    AddReactions,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SendMessages => "SEND_MESSAGES",
            Capability::EmbedLinks => "EMBED_LINKS",
            Capability::ManageMessages => "MANAGE_MESSAGES",
            Capability::AttachFiles => "ATTACH_FILES",
            Capability::AddReactions => "ADD_REACTIONS",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unordered set of capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    caps: HashSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(caps: &[Capability]) -> Self {
        Self {
            caps: caps.iter().copied().collect(),
        }
    }

    /// Every capability the platform models.
    pub fn all() -> Self {
        Self::of(&[
            Capability::SendMessages,
            Capability::EmbedLinks,
            Capability::ManageMessages,
            Capability::AttachFiles,
            Capability::AddReactions,
        ])
    }

    pub fn insert(&mut self, cap: Capability) {
        self.caps.insert(cap);
    }

    pub fn contains(&self, cap: Capability) -> bool {
        self.caps.contains(&cap)
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            caps: self.caps.union(&other.caps).copied().collect(),
        }
    }

    /// Capabilities required by `self` that `have` does not grant, in a
    /// stable order for display.
    pub fn missing(&self, have: &Self) -> Vec<Capability> {
        let mut missing: Vec<Capability> = self
            .caps
            .iter()
            .filter(|cap| !have.caps.contains(cap))
            .copied()
            .collect();
        missing.sort_by_key(|cap| cap.as_str());
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_required_minus_granted() {
        let required = CapabilitySet::of(&[Capability::SendMessages, Capability::EmbedLinks]);
        let have = CapabilitySet::of(&[Capability::SendMessages]);
        assert_eq!(required.missing(&have), vec![Capability::EmbedLinks]);
        assert!(required.missing(&CapabilitySet::all()).is_empty());
    }

    #[test]
    fn union_merges_both_sides() {
        let a = CapabilitySet::of(&[Capability::SendMessages]);
        let b = CapabilitySet::of(&[Capability::AttachFiles]);
        let merged = a.union(&b);
        assert!(merged.contains(Capability::SendMessages));
        assert!(merged.contains(Capability::AttachFiles));
    }
}
