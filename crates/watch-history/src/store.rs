//! History store: where each user's encoded watch lines live.
//!
//! The aggregation core only reads histories. The single write path is
//! `mark_watched`, which appends a record unless a line for the same id
//! already exists. Each user's list sits behind one `RwLock`, so two
//! concurrent marks for the same id append exactly once.
//!
//! Lines are kept verbatim. A corrupt line is skipped when a history is
//! read, but it is never dropped from the store or from the saved file.

use crate::codec::{self, DecodedBatch};
use crate::error::{HistoryError, Result};
use crate::types::{TitleId, UserHistory, WatchRecord};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Read access to watch histories plus the idempotent append path.
pub trait HistoryStore: Send + Sync {
    /// Decoded history for a user, oldest first.
    ///
    /// Unknown users have an empty history.
    fn get_history(&self, user_key: &str) -> Result<UserHistory>;

    /// Append `record` unless the user already has a line for its id.
    ///
    /// Returns `true` if the record was added.
    fn mark_watched(&self, user_key: &str, record: &WatchRecord) -> Result<bool>;

    /// Whether the user has a line for `id` (of any kind)
    fn is_watched(&self, user_key: &str, id: TitleId) -> Result<bool>;
}

/// In-memory store, optionally loaded from and saved to a JSON file.
///
/// File shape: `{ "user key": ["encoded line", ...], ... }`
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    users: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Load a history file.
    ///
    /// A missing file is treated as an empty store.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("History file {:?} not found, starting empty", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let users: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;
        info!(
            "Loaded history for {} users from {:?}",
            users.len(),
            path
        );
        Ok(Self {
            users: RwLock::new(users),
        })
    }

    /// Write every user's lines back to disk, keys sorted for stable diffs
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let users = self.users.read().map_err(|_| HistoryError::LockPoisoned)?;
        let sorted: BTreeMap<&String, &Vec<String>> = users.iter().collect();
        let content = serde_json::to_string_pretty(&sorted)?;
        fs::write(path, content)?;
        debug!("Saved history for {} users to {:?}", users.len(), path);
        Ok(())
    }

    /// Seed a user's raw lines (used for imports and tests)
    pub fn insert_lines(&self, user_key: impl Into<String>, lines: Vec<String>) -> Result<()> {
        let mut users = self.users.write().map_err(|_| HistoryError::LockPoisoned)?;
        users.insert(user_key.into(), lines);
        Ok(())
    }

    /// All user keys, sorted
    pub fn user_keys(&self) -> Result<Vec<String>> {
        let users = self.users.read().map_err(|_| HistoryError::LockPoisoned)?;
        let mut keys: Vec<String> = users.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Decode a user's lines, reporting skipped lines alongside the records
    pub fn decode_user(&self, user_key: &str) -> Result<DecodedBatch> {
        let users = self.users.read().map_err(|_| HistoryError::LockPoisoned)?;
        let batch = match users.get(user_key) {
            Some(lines) => codec::decode_batch(lines),
            None => DecodedBatch::default(),
        };
        Ok(batch)
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get_history(&self, user_key: &str) -> Result<UserHistory> {
        let batch = self.decode_user(user_key)?;
        if !batch.skipped.is_empty() {
            warn!(
                "Skipped {} unreadable history lines for user {}",
                batch.skipped.len(),
                user_key
            );
        }
        Ok(UserHistory::from_records(batch.records))
    }

    fn mark_watched(&self, user_key: &str, record: &WatchRecord) -> Result<bool> {
        let prefix = codec::id_prefix(record.id);
        let mut users = self.users.write().map_err(|_| HistoryError::LockPoisoned)?;
        let lines = users.entry(user_key.to_string()).or_default();

        if lines.iter().any(|line| line.starts_with(&prefix)) {
            debug!("Title {} already in history of {}", record.id, user_key);
            return Ok(false);
        }

        lines.push(codec::encode(record));
        debug!("Added title {} to history of {}", record.id, user_key);
        Ok(true)
    }

    fn is_watched(&self, user_key: &str, id: TitleId) -> Result<bool> {
        let prefix = codec::id_prefix(id);
        let users = self.users.read().map_err(|_| HistoryError::LockPoisoned)?;
        Ok(users
            .get(user_key)
            .is_some_and(|lines| lines.iter().any(|line| line.starts_with(&prefix))))
    }
}
