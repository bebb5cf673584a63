//! Helper functions to build UserContext from a watch history
//!
//! The context is assembled once per request:
//! - Watched ids (for exclusion)
//! - Recommendation seeds (most recent per kind)
//! - Last watched title per kind (for display)

use crate::seeds::{select_last_watched_per_kind, select_seeds};
use crate::types::UserContext;
use anyhow::{Context, Result};
use watch_history::{HistoryStore, UserHistory};

/// Build a UserContext from an already-loaded history
pub fn context_from_history(
    user_key: &str,
    history: &UserHistory,
    seeds_per_kind: usize,
) -> UserContext {
    UserContext {
        user_key: user_key.to_string(),
        watched_ids: history.ids(),
        seeds: select_seeds(history, seeds_per_kind),
        last_watched: select_last_watched_per_kind(history),
    }
}

/// Read a user's history from the store and build their context
pub fn build_user_context(
    store: &dyn HistoryStore,
    user_key: &str,
    seeds_per_kind: usize,
) -> Result<UserContext> {
    let history = store
        .get_history(user_key)
        .with_context(|| format!("Failed to read history for {}", user_key))?;
    Ok(context_from_history(user_key, &history, seeds_per_kind))
}
