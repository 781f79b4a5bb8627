//! The single active user session and its durable snapshot.
//!
//! [`SessionStore`] owns at most one [`UserSession`]. Every mutation writes
//! the complete snapshot to storage before it becomes visible in memory, so
//! the two never disagree: if the write fails, the in-memory session is left
//! as it was and the error is returned.

use chrono::Utc;

use crate::error::{Error, Result, require_non_empty};
use crate::storage::{SESSION_KEY, SessionStorage};
use crate::types::{Identity, InitialStats, UserId, UserSession};

/// Owner of the active session.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    key: String,
    current: Option<UserSession>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Creates a store with no active session, using [`SESSION_KEY`].
    ///
    /// Nothing is read from `storage`; see [`SessionStore::init`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, SESSION_KEY)
    }

    /// Creates a store with no active session under a custom storage key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            current: None,
        }
    }

    /// Creates a store and restores any previously persisted session.
    pub fn init(storage: S) -> Self {
        Self::init_with_key(storage, SESSION_KEY)
    }

    /// Like [`SessionStore::init`] with a custom storage key.
    pub fn init_with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::with_key(storage, key);
        store.current = store.load_session();
        if let Some(session) = &store.current {
            tracing::info!(user_id = %session.id, "Restored session");
        }
        store
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    /// Returns `true` when a session is active.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// The storage key holding the snapshot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted session.
    ///
    /// Returns `None` when nothing is stored, when the stored text is not a
    /// valid session record, or when storage cannot be read. None of these
    /// are errors.
    pub fn load_session(&self) -> Option<UserSession> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read stored session");
                return None;
            }
        };

        match serde_json::from_str::<UserSession>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring malformed stored session");
                None
            }
        }
    }

    /// Starts a new session, replacing any active one.
    ///
    /// `email` and `name` must be non-blank; otherwise nothing is created
    /// or written.
    pub fn create_session(
        &mut self,
        identity: Identity,
        stats: InitialStats,
    ) -> Result<UserSession> {
        require_non_empty("email", &identity.email)?;
        require_non_empty("name", &identity.name)?;

        let (first_name, last_name, community) = match identity.profile {
            Some(profile) => (
                Some(profile.first_name),
                Some(profile.last_name),
                Some(profile.community),
            ),
            None => (None, None, None),
        };

        let session = UserSession {
            id: UserId::new(),
            email: identity.email,
            name: identity.name,
            first_name,
            last_name,
            community,
            points: stats.points,
            carbon_footprint: stats.carbon_footprint,
            waste_reduced: stats.waste_reduced,
            community_rank: stats.community_rank,
            join_date: Utc::now(),
            badges: stats.badges,
            challenges: Vec::new(),
        };

        self.persist(&session)?;
        tracing::info!(user_id = %session.id, points = session.points, "Created session");
        Ok(session)
    }

    /// Writes `session` as the full snapshot and makes it the active session.
    pub fn persist(&mut self, session: &UserSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.storage.set_item(&self.key, &json)?;
        self.current = Some(session.clone());
        Ok(())
    }

    /// Ends the active session and deletes its snapshot.
    pub fn clear_session(&mut self) -> Result<()> {
        if let Some(session) = self.current.take() {
            tracing::info!(user_id = %session.id, "Cleared session");
        }
        self.storage.remove_item(&self.key)
    }

    /// Adds `amount` points to the active session and persists it.
    ///
    /// Returns the new total.
    pub fn award_points(&mut self, amount: u64) -> Result<u64> {
        let total = self.mutate(|session| {
            session.points = session.points.saturating_add(amount);
            session.points
        })?;
        tracing::info!(amount, total, "Awarded points");
        Ok(total)
    }

    /// Overwrites the active session's carbon footprint and persists it.
    pub fn update_carbon_footprint(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::validation_field(
                "carbon_footprint",
                format!("must be a non-negative number, got {value}"),
            ));
        }
        self.mutate(|session| session.carbon_footprint = value)?;
        tracing::info!(carbon_footprint = value, "Updated carbon footprint");
        Ok(())
    }

    /// Records that the active session joined a challenge and persists it.
    ///
    /// Returns `false` if the session had already joined.
    pub fn join_challenge(&mut self, challenge: &str) -> Result<bool> {
        self.mutate(|session| session.join_challenge(challenge))
    }

    fn mutate<T>(&mut self, f: impl FnOnce(&mut UserSession) -> T) -> Result<T> {
        let mut session = self.current.clone().ok_or(Error::NoActiveSession)?;
        let out = f(&mut session);
        self.persist(&session)?;
        Ok(out)
    }
}
