//! Save/load persistence with integrity verification
//!
//! Features:
//! - Versioned JSON envelope
//! - BLAKE3 integrity digest over the data
//! - Atomic writes (tmp file, then rename)
//! - Shape and identity validation before anything reaches the game

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::accounts::{Account, MemoryAccountStore, is_password_digest};
use crate::error::{MalformedImportError, PersistenceError};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// Current envelope version
pub const DATA_VERSION: u64 = 1;

/// Accounts and leaderboard as stored on disk. Order is not significant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveData {
    pub users: Vec<Account>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    version: u64,
    digest: String,
    data: &'a Value,
}

impl SaveData {
    pub fn from_store(store: &MemoryAccountStore) -> Self {
        Self {
            users: store.users().to_vec(),
            leaderboard: store.leaderboard().entries().to_vec(),
        }
    }

    /// Hand validated data to a store
    pub fn apply_to(self, store: &mut MemoryAccountStore) {
        store.replace_data(self.users, self.leaderboard);
    }
}

/// Serialize the store into a versioned, digested JSON document
pub fn export(store: &MemoryAccountStore) -> Result<String, PersistenceError> {
    let data = serde_json::to_value(SaveData::from_store(store)).map_err(PersistenceError::Encode)?;
    let envelope = Envelope {
        version: DATA_VERSION,
        digest: digest_of(&data)?,
        data: &data,
    };
    serde_json::to_string_pretty(&envelope).map_err(PersistenceError::Encode)
}

/// Parse and validate an exported document.
///
/// The leaderboard comes back ranked and bounded to the top entries.
pub fn import(json: &str) -> Result<SaveData, MalformedImportError> {
    let root: Value = serde_json::from_str(json)?;
    let root = root.as_object().ok_or(MalformedImportError::NotAnObject)?;

    let version = root
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(MalformedImportError::MissingField("version"))?;
    if version != DATA_VERSION {
        return Err(MalformedImportError::UnsupportedVersion(version));
    }

    let data = root.get("data").ok_or(MalformedImportError::MissingField("data"))?;
    let fields = data.as_object().ok_or(MalformedImportError::NotAnObject)?;
    require_array(fields, "users")?;
    require_array(fields, "leaderboard")?;

    if let Some(digest) = root.get("digest") {
        let expected = digest.as_str().ok_or(MalformedImportError::MissingField("digest"))?;
        let actual = digest_of(data).map_err(|_| MalformedImportError::DigestMismatch)?;
        if actual != expected {
            return Err(MalformedImportError::DigestMismatch);
        }
    } else {
        log::warn!("Import has no integrity digest");
    }

    let data: SaveData = serde_json::from_value(data.clone())?;
    validate(data)
}

fn require_array(fields: &Map<String, Value>, name: &'static str) -> Result<(), MalformedImportError> {
    match fields.get(name) {
        None => Err(MalformedImportError::MissingField(name)),
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(MalformedImportError::NotAnArray(name)),
    }
}

fn validate(data: SaveData) -> Result<SaveData, MalformedImportError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for user in &data.users {
        if !ids.insert(user.id) {
            return Err(MalformedImportError::DuplicateUserId(user.id.0));
        }
        if !names.insert(user.username.as_str()) {
            return Err(MalformedImportError::DuplicateUsername(user.username.clone()));
        }
        if !is_password_digest(&user.password_digest) {
            return Err(MalformedImportError::BadDigest(user.username.clone()));
        }
    }

    let mut listed = HashSet::new();
    for entry in &data.leaderboard {
        if !listed.insert(entry.user_id) {
            return Err(MalformedImportError::DuplicateEntry(entry.user_id.0));
        }
    }

    Ok(SaveData {
        users: data.users,
        leaderboard: Leaderboard::from_entries(data.leaderboard).into_entries(),
    })
}

fn digest_of(data: &Value) -> Result<String, PersistenceError> {
    let bytes = serde_json::to_vec(data).map_err(PersistenceError::Encode)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Write an export atomically
pub fn save_file(path: &Path, store: &MemoryAccountStore) -> Result<(), PersistenceError> {
    let json = export(store)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::info!("Saved {} accounts to {}", store.users().len(), path.display());
    Ok(())
}

/// Read and validate an export from disk
pub fn load_file(path: &Path) -> Result<SaveData, PersistenceError> {
    let json = fs::read_to_string(path)?;
    Ok(import(&json)?)
}
