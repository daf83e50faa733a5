/// A platform user as seen on an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Platform-assigned snowflake, stable across renames.
    pub id: String,
    /// Human-readable tag, e.g. `name#1234`.
    pub tag: String,
    pub is_bot: bool,
    pub avatar_url: Option<String>,
}

impl Author {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            is_bot: false,
            avatar_url: None,
        }
    }

    pub fn with_bot(mut self, is_bot: bool) -> Self {
        self.is_bot = is_bot;
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// The application owner identity, fetched once at startup.
///
/// A single configured id is an individual owner; several ids form a team,
/// and membership in the team satisfies owner checks.
#[derive(Debug, Clone)]
pub enum AppOwner {
    User(String),
    Team(Vec<String>),
}

impl AppOwner {
    pub fn from_ids(ids: &[String]) -> Self {
        match ids {
            [single] => AppOwner::User(single.clone()),
            many => AppOwner::Team(many.to_vec()),
        }
    }

    pub fn includes(&self, user_id: &str) -> bool {
        match self {
            AppOwner::User(id) => id == user_id,
            AppOwner::Team(ids) => ids.iter().any(|id| id == user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_id_is_user_owner() {
        let owner = AppOwner::from_ids(&["100".to_string()]);
        assert!(matches!(owner, AppOwner::User(_)));
        assert!(owner.includes("100"));
        assert!(!owner.includes("200"));
    }

    #[test]
    fn several_ids_form_a_team() {
        let owner = AppOwner::from_ids(&["100".to_string(), "200".to_string()]);
        assert!(matches!(owner, AppOwner::Team(_)));
        assert!(owner.includes("200"));
        assert!(!owner.includes("300"));
    }

    #[test]
    fn empty_team_denies_everyone() {
        let owner = AppOwner::from_ids(&[]);
        assert!(!owner.includes("100"));
    }
}
