use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adjust::{Adjustment, ProfileAdjustments};
use crate::error::CoreError;
use crate::merge::{self, MergeReport};
use crate::model::{CanonicalProfile, Method, MethodStatus, PartialParameterSet};
use crate::render;
use crate::store::ParameterStore;

/// A unique identifier for a brand voice session.
/// Generated as UUID v4 hex (no dashes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    /// Parse and validate an ID string. Must be non-empty hex.
    pub fn parse(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidId(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persisted form of a session. The profile is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub store: ParameterStore,
    #[serde(default, skip_serializing_if = "ProfileAdjustments::is_empty")]
    pub adjustments: ProfileAdjustments,
}

#[derive(Debug)]
struct SessionState {
    store: ParameterStore,
    adjustments: ProfileAdjustments,
    profile: CanonicalProfile,
}

impl SessionState {
    /// Merge the store, then lay the hand edits over the result.
    fn refresh(&mut self) {
        let mut profile = merge::recompute(&self.store);
        self.adjustments.apply(&mut profile);
        self.profile = profile;
    }
}

/// The per-session context: parameter store plus the canonical profile derived from it.
///
/// Store updates and the recomputation they trigger happen under one write
/// lock, so a reader never sees a profile computed from a half-updated store.
#[derive(Debug)]
pub struct BrandSession {
    id: SessionId,
    created_at: DateTime<Utc>,
    state: RwLock<SessionState>,
}

impl BrandSession {
    /// Start a session with an empty store and the default profile.
    pub fn new() -> Self {
        Self::from_snapshot(SessionSnapshot {
            id: SessionId::new(),
            created_at: Utc::now(),
            store: ParameterStore::new(),
            adjustments: ProfileAdjustments::new(),
        })
    }

    /// Rebuild a session from its persisted form, recomputing the profile.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let mut state = SessionState {
            store: snapshot.store,
            adjustments: snapshot.adjustments,
            profile: CanonicalProfile::default(),
        };
        state.refresh();
        Self {
            id: snapshot.id,
            created_at: snapshot.created_at,
            state: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read();
        SessionSnapshot {
            id: self.id.clone(),
            created_at: self.created_at,
            store: state.store.clone(),
            adjustments: state.adjustments.clone(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Store a producer's partial set for `method` and recompute the profile.
    pub fn commit(&self, method: Method, params: PartialParameterSet) -> CanonicalProfile {
        self.commit_with_source(method, params, None)
    }

    /// Like [`commit`](Self::commit), also recording what the run consumed.
    pub fn commit_with_source(
        &self,
        method: Method,
        params: PartialParameterSet,
        source: Option<String>,
    ) -> CanonicalProfile {
        let mut state = self.write();
        state.store.set_with_source(method, params, source);
        state.refresh();
        tracing::info!(session = %self.id.short(), %method, "Committed partial parameter set");
        state.profile.clone()
    }

    /// Drop the parameters of `method`, keeping its history flag, and recompute.
    /// Returns whether anything was stored for it.
    pub fn discard(&self, method: Method) -> bool {
        let mut state = self.write();
        let removed = state.store.discard(method);
        if removed {
            state.refresh();
            tracing::info!(session = %self.id.short(), %method, "Discarded method parameters");
        }
        removed
    }

    /// Clear the store, including `used` flags, and any hand edits, returning
    /// to the default profile.
    pub fn reset(&self) {
        let mut state = self.write();
        state.store.clear();
        state.adjustments.clear();
        state.profile = CanonicalProfile::default();
        tracing::info!(session = %self.id.short(), "Session reset");
    }

    /// Pin one profile field to a hand-chosen value. The edit outlives later
    /// commits until it is cleared.
    pub fn adjust(
        &self,
        path: &str,
        adjustment: Adjustment,
    ) -> Result<CanonicalProfile, CoreError> {
        let mut state = self.write();
        state.adjustments.set(path, adjustment)?;
        state.refresh();
        tracing::info!(session = %self.id.short(), field = path, "Adjusted profile field");
        Ok(state.profile.clone())
    }

    /// Drop the hand edit of `path`. Returns whether one existed.
    pub fn clear_adjustment(&self, path: &str) -> bool {
        let mut state = self.write();
        let removed = state.adjustments.remove(path);
        if removed {
            state.refresh();
        }
        removed
    }

    /// Drop every hand edit. Returns how many there were.
    pub fn clear_adjustments(&self) -> usize {
        let mut state = self.write();
        let count = state.adjustments.len();
        state.adjustments.clear();
        state.refresh();
        count
    }

    pub fn adjustments(&self) -> ProfileAdjustments {
        self.read().adjustments.clone()
    }

    pub fn get_profile(&self) -> CanonicalProfile {
        self.read().profile.clone()
    }

    pub fn get_method_status(&self) -> BTreeMap<Method, MethodStatus> {
        self.read().store.status()
    }

    pub fn any_used(&self) -> bool {
        self.read().store.any_used()
    }

    /// Example marketing copy for the current profile, or the no-data
    /// message while no method has run yet.
    pub fn render_example_copy(&self) -> String {
        let state = self.read();
        if !state.store.any_used() {
            return render::NO_DATA_MESSAGE.to_string();
        }
        render::render(&state.profile)
    }

    /// Re-run the merge with full bookkeeping for inspection.
    pub fn explain(&self) -> MergeReport {
        let state = self.read();
        let mut report = merge::explain(&state.store);
        report.adjusted = state.adjustments.apply(&mut report.profile);
        report
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for BrandSession {
    fn default() -> Self {
        Self::new()
    }
}
