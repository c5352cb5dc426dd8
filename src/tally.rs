use std::collections::HashMap;
use time::OffsetDateTime;

/// Distinct voters since the last reset, keyed by the host a vote arrived
/// from. Votes are meant to expire after five minutes; expiry is not
/// implemented yet, so entries live until the next reset.
#[derive(Debug, Default)]
pub struct VoteTally {
    votes: HashMap<String, OffsetDateTime>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self {
            votes: HashMap::new(),
        }
    }

    /// Records a vote for `key`. A repeat vote from the same key refreshes
    /// its timestamp instead of counting twice.
    pub fn register_vote(&mut self, key: &str) {
        self.votes.insert(key.to_string(), OffsetDateTime::now_utc());
    }

    pub fn count(&self) -> usize {
        self.votes.len()
    }

    /// Drops every recorded vote. Called once a toggle has been triggered.
    pub fn reset(&mut self) {
        self.votes = HashMap::new();
    }
}
