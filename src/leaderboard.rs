//! Leaderboard
//!
//! Keeps the best score of each player, top 10 only. Players are keyed by
//! account id; the username is display data.

use serde::{Deserialize, Serialize};

use crate::accounts::{Avatar, UserId};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// Unix time in milliseconds
pub type Timestamp = u64;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub username: String,
    pub avatar: Avatar,
    pub score: u32,
    /// When the current score was set
    pub updated_at: Timestamp,
}

/// Ranked, deduplicated, bounded list of best scores.
///
/// Serialized as a plain list of rows; deserializing goes through
/// [`Leaderboard::from_entries`] so a stored board is always re-ranked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<LeaderboardEntry>", into = "Vec<LeaderboardEntry>")]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored rows, putting them in ranked order and keeping the
    /// top [`MAX_ENTRIES`]. Rows must already be unique per user.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        sort_ranked(&mut entries);
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }

    /// Record a finished run.
    ///
    /// An existing entry only changes when the new score is strictly
    /// higher. Returns the player's rank (1-indexed) afterwards, or `None`
    /// if they fell off the board.
    pub fn record(
        &mut self,
        user_id: UserId,
        username: &str,
        avatar: &Avatar,
        score: u32,
        now: Timestamp,
    ) -> Option<usize> {
        match self.entries.iter_mut().find(|e| e.user_id == user_id) {
            Some(entry) if score > entry.score => {
                entry.score = score;
                entry.updated_at = now;
                entry.username = username.to_string();
                entry.avatar = avatar.clone();
            }
            Some(_) => return self.rank_of(user_id),
            None => self.entries.push(LeaderboardEntry {
                user_id,
                username: username.to_string(),
                avatar: avatar.clone(),
                score,
                updated_at: now,
            }),
        }

        sort_ranked(&mut self.entries);
        // Anything past the cut is gone for good
        self.entries.truncate(MAX_ENTRIES);

        self.rank_of(user_id)
    }

    /// Rank (1-indexed) of a player, if listed
    pub fn rank_of(&self, user_id: UserId) -> Option<usize> {
        self.entries.iter().position(|e| e.user_id == user_id).map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<LeaderboardEntry>> for Leaderboard {
    fn from(entries: Vec<LeaderboardEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Leaderboard> for Vec<LeaderboardEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}

/// Descending score; on ties the longer-standing holder stays ahead.
/// `sort_by` is stable, so exact ties keep their prior order.
fn sort_ranked(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.updated_at.cmp(&b.updated_at)));
}
