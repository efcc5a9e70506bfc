//! Player accounts
//!
//! Registration, login and per-player high scores. Passwords are kept only
//! as salted one-way digests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AccountError;
use crate::leaderboard::{Leaderboard, LeaderboardEntry, Timestamp};

/// Stable account identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Colour swatch plus initial shown next to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub color: String,
    pub letter: String,
}

const AVATAR_COLORS: [&str; 5] = ["#48bb78", "#4299e1", "#ed8936", "#9f7aea", "#f56565"];

impl Avatar {
    /// Default avatar: colour picked by the sum of the name's character
    /// codes, letter is the upper-cased first character
    pub fn for_username(username: &str) -> Self {
        let sum: u64 = username.chars().map(|c| u64::from(u32::from(c))).sum();
        let color = AVATAR_COLORS[(sum % AVATAR_COLORS.len() as u64) as usize];
        let letter = username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string());
        Self {
            color: color.to_string(),
            letter,
        }
    }
}

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    /// `salt$digest`, both hex
    pub password_digest: String,
    pub avatar: Avatar,
    /// Best finished run; never decreases
    pub high_score: u32,
    #[serde(default)]
    pub created_at: Timestamp,
}

/// What the game needs from account storage
pub trait AccountStore {
    /// The logged-in player, if any
    fn current_user(&self) -> Option<Account>;

    /// Submit a finished run. Returns true only if it beat the player's
    /// previous high score.
    fn commit_high_score(&mut self, user_id: UserId, score: u32, now: Timestamp) -> bool;
}

const DIGEST_CONTEXT: &str = "grid-snake 2026-10 account password digest";

/// Salted BLAKE3 digest of a password
pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    let salt: String = salt.iter().map(|b| format!("{b:02x}")).collect();
    let digest = salted_digest(&salt, password);
    format!("{salt}${}", digest.to_hex())
}

/// Check a password against a stored digest in constant time
pub fn verify_password(stored: &str, password: &str) -> bool {
    let Some((salt, hex)) = stored.split_once('$') else {
        return false;
    };
    match blake3::Hash::from_hex(hex) {
        Ok(expected) => salted_digest(salt, password) == expected,
        Err(_) => false,
    }
}

/// True if the string has the `salt$digest` shape
pub fn is_password_digest(stored: &str) -> bool {
    stored
        .split_once('$')
        .is_some_and(|(salt, hex)| !salt.is_empty() && blake3::Hash::from_hex(hex).is_ok())
}

fn salted_digest(salt: &str, password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new_derive_key(DIGEST_CONTEXT);
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize()
}

/// Accounts and leaderboard held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    users: Vec<Account>,
    leaderboard: Leaderboard,
    current: Option<UserId>,
    next_id: u64,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Create an account. The username is trimmed and must be unique.
    pub fn register(&mut self, username: &str, password: &str, now: Timestamp) -> Result<UserId, AccountError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingField);
        }
        if self.users.iter().any(|u| u.username == username) {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let id = UserId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.users.push(Account {
            id,
            username: username.to_string(),
            password_digest: hash_password(password),
            avatar: Avatar::for_username(username),
            high_score: 0,
            created_at: now,
        });
        log::info!("Registered `{username}` as user {id}");
        Ok(id)
    }

    /// Log in and remember the player as current
    pub fn login(&mut self, username: &str, password: &str) -> Result<Account, AccountError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingField);
        }
        let account = self
            .users
            .iter()
            .find(|u| u.username == username && verify_password(&u.password_digest, password))
            .ok_or(AccountError::InvalidCredentials)?;
        self.current = Some(account.id);
        log::info!("`{username}` logged in");
        Ok(account.clone())
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.current.take() {
            log::info!("User {id} logged out");
        }
    }

    pub fn user(&self, id: UserId) -> Option<&Account> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn users(&self) -> &[Account] {
        &self.users
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Swap in an imported data set. Rows are assumed validated.
    pub fn replace_data(&mut self, users: Vec<Account>, leaderboard: Vec<LeaderboardEntry>) {
        self.next_id = users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;
        self.users = users;
        self.leaderboard = Leaderboard::from_entries(leaderboard);
        if let Some(id) = self.current {
            if self.user(id).is_none() {
                log::info!("User {id} no longer exists; logged out");
                self.current = None;
            }
        }
        log::info!(
            "Loaded {} accounts and {} leaderboard entries",
            self.users.len(),
            self.leaderboard.len()
        );
    }
}

impl AccountStore for MemoryAccountStore {
    fn current_user(&self) -> Option<Account> {
        self.current.and_then(|id| self.user(id)).cloned()
    }

    fn commit_high_score(&mut self, user_id: UserId, score: u32, now: Timestamp) -> bool {
        let Some(account) = self.users.iter_mut().find(|u| u.id == user_id) else {
            log::warn!("Score {score} for unknown user {user_id} discarded");
            return false;
        };
        if score <= account.high_score {
            return false;
        }
        account.high_score = score;
        let rank = self
            .leaderboard
            .record(account.id, &account.username, &account.avatar, score, now);
        match rank {
            Some(rank) => log::info!("New high score {score} for `{}`, rank {rank}", account.username),
            None => log::info!("New high score {score} for `{}`", account.username),
        }
        true
    }
}
