//! Link entity representing a source link ↔ short code mapping.

use chrono::{DateTime, Utc};

/// A stored mapping between a source link and its short code.
///
/// Created on the first successful code reservation for a source link and
/// afterwards mutated only by visit increments. Links are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub source_link: String,
    pub short_code: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        source_link: String,
        short_code: String,
        visits: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_link,
            short_code,
            visits,
            created_at,
        }
    }

    /// Returns true if the link has never been visited.
    pub fn is_unvisited(&self) -> bool {
        self.visits == 0
    }
}
