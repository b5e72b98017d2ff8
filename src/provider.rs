//! Identity and social-stat provider
//!
//! The game derives its ammunition, score multiplier and daily play quota
//! from a player's social-graph identity. The engine consumes the
//! [`StatsProvider`] contract; [`SimulatedGraphProvider`] is the shipped
//! implementation, deriving pseudo-random but deterministic stats from a
//! hash of the handle so runs are reproducible. Derived values persist in
//! an injected [`KvStore`] so repeat sessions agree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::KvStore;

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub handle: String,
    pub authenticated: bool,
    /// Milliseconds since the Unix epoch, host-supplied
    pub created_at: u64,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// No handle could be obtained. Fatal to startup.
    #[error("no identifier provided")]
    NoIdentifier,
    /// A stat fetch failed. Callers recover with documented defaults.
    #[error("stat fetch failed: {0}")]
    StatsFetch(String),
    /// Best-effort session recording failed. Callers log and move on.
    #[error("could not record session: {0}")]
    RecordSession(String),
}

/// Daily play allowance for a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaStatus {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

/// Supplies the identity handle during authentication. Hosts plug in an
/// interactive prompt, a stored preference, or a test stub.
#[allow(async_fn_in_trait)]
pub trait CredentialResolver {
    async fn resolve_handle(&mut self) -> Option<String>;
}

/// A fixed handle (or none). Covers stored-preference hosts and tests.
#[derive(Debug, Clone)]
pub struct StaticResolver(pub Option<String>);

impl CredentialResolver for StaticResolver {
    async fn resolve_handle(&mut self) -> Option<String> {
        self.0.clone()
    }
}

/// Contract the game consumes at startup. Calls are attempted once; there
/// is no retry policy.
#[allow(async_fn_in_trait)]
pub trait StatsProvider {
    async fn authenticate(&mut self) -> Result<Session, ProviderError>;

    /// Ammunition seed count. Callers fall back to their configured
    /// default on any failure.
    async fn ammunition_seed(&mut self, session: &Session) -> Result<u32, ProviderError>;

    /// Declared interest categories. Non-empty on success; callers fall
    /// back to a single baseline tag on failure.
    async fn interest_tags(&mut self, session: &Session) -> Result<Vec<String>, ProviderError>;

    fn daily_quota(&self, session: &Session) -> QuotaStatus;

    /// Consume one unit of today's quota. Best-effort.
    fn record_session(&mut self, session: &Session) -> Result<(), ProviderError>;
}

/// Baseline tag used when no categories can be fetched
pub const BASELINE_TAG: &str = "social";

/// Score multiplier from interest diversity: 1.0 base plus 0.2 per
/// category, bonus capped at 1.0.
pub fn multiplier_from_tags(tags: &[String]) -> f32 {
    1.0 + (tags.len() as f32 * 0.2).min(1.0)
}

/// Categories the simulated graph draws from
const CATEGORIES: [&str; 10] = [
    "social",
    "tech",
    "creative",
    "business",
    "art",
    "music",
    "gaming",
    "education",
    "health",
    "food",
];

/// Games allowed per handle per calendar day
pub const DAILY_LIMIT: u32 = 10;

/// Deterministic stand-in for a real social-graph service.
///
/// `day_stamp` and `now_ms` are injected rather than read from a clock so
/// the whole stat pipeline stays reproducible under test.
pub struct SimulatedGraphProvider<R, S> {
    resolver: R,
    store: S,
    day_stamp: String,
    now_ms: u64,
}

impl<R: CredentialResolver, S: KvStore> SimulatedGraphProvider<R, S> {
    pub fn new(resolver: R, store: S, day_stamp: impl Into<String>, now_ms: u64) -> Self {
        Self {
            resolver,
            store,
            day_stamp: day_stamp.into(),
            now_ms,
        }
    }

    fn quota_key(&self, handle: &str) -> String {
        format!("daily_plays_{}_{}", handle, self.day_stamp)
    }

    fn plays_today(&self, handle: &str) -> u32 {
        self.store
            .get(&self.quota_key(handle))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

impl<R: CredentialResolver, S: KvStore> StatsProvider for SimulatedGraphProvider<R, S> {
    async fn authenticate(&mut self) -> Result<Session, ProviderError> {
        let stored = self.store.get("handle");
        let handle = match stored {
            Some(h) if !h.trim().is_empty() => h,
            _ => self
                .resolver
                .resolve_handle()
                .await
                .ok_or(ProviderError::NoIdentifier)?,
        };

        let handle = handle.trim().to_string();
        if handle.is_empty() {
            return Err(ProviderError::NoIdentifier);
        }

        if let Err(err) = self.store.put("handle", &handle) {
            log::warn!("could not remember handle: {err}");
        }

        Ok(Session {
            handle,
            authenticated: true,
            created_at: self.now_ms,
        })
    }

    async fn ammunition_seed(&mut self, session: &Session) -> Result<u32, ProviderError> {
        let key = format!("likes_count_{}", session.handle);
        if let Some(cached) = self.store.get(&key).and_then(|v| v.parse().ok()) {
            return Ok(cached);
        }

        // 50 to 1049, stable per handle
        let count = handle_hash(&session.handle) % 1000 + 50;
        if let Err(err) = self.store.put(&key, &count.to_string()) {
            log::warn!("could not persist ammunition seed: {err}");
        }
        Ok(count)
    }

    async fn interest_tags(&mut self, session: &Session) -> Result<Vec<String>, ProviderError> {
        let key = format!("lexicons_{}", session.handle);
        if let Some(cached) = self
            .store
            .get(&key)
            .and_then(|v| serde_json::from_str::<Vec<String>>(&v).ok())
        {
            if !cached.is_empty() {
                return Ok(cached);
            }
        }

        let hash = handle_hash(&session.handle);
        let count = hash % 4 + 1;
        let mut tags: Vec<String> = Vec::new();
        for i in 0..count {
            let tag = CATEGORIES[(hash.wrapping_add(i) % CATEGORIES.len() as u32) as usize];
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        if tags.is_empty() {
            tags.push(BASELINE_TAG.to_string());
        }

        match serde_json::to_string(&tags) {
            Ok(json) => {
                if let Err(err) = self.store.put(&key, &json) {
                    log::warn!("could not persist interest tags: {err}");
                }
            }
            Err(err) => return Err(ProviderError::StatsFetch(err.to_string())),
        }
        Ok(tags)
    }

    fn daily_quota(&self, session: &Session) -> QuotaStatus {
        let used = self.plays_today(&session.handle);
        QuotaStatus {
            used,
            limit: DAILY_LIMIT,
            remaining: DAILY_LIMIT.saturating_sub(used),
        }
    }

    fn record_session(&mut self, session: &Session) -> Result<(), ProviderError> {
        let used = self.plays_today(&session.handle) + 1;
        self.store
            .put(&self.quota_key(&session.handle), &used.to_string())
            .map_err(|err| ProviderError::RecordSession(err.to_string()))
    }
}

/// Deterministic 32-bit hash of a handle (djb2-style fold)
fn handle_hash(handle: &str) -> u32 {
    let mut hash: i32 = 0;
    for byte in handle.bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(byte as i32);
    }
    hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StoreError};

    fn provider(
        handle: Option<&str>,
        store: MemoryStore,
    ) -> SimulatedGraphProvider<StaticResolver, MemoryStore> {
        SimulatedGraphProvider::new(
            StaticResolver(handle.map(str::to_string)),
            store,
            "2026-08-06",
            1_000,
        )
    }

    #[test]
    fn multiplier_mapping_is_exact() {
        let tags = |n: usize| vec!["tag".to_string(); n];
        assert_eq!(multiplier_from_tags(&tags(1)), 1.2);
        assert_eq!(multiplier_from_tags(&tags(2)), 1.4);
        assert_eq!(multiplier_from_tags(&tags(5)), 2.0);
        // Bonus is capped past five categories
        assert_eq!(multiplier_from_tags(&tags(9)), 2.0);
    }

    #[test]
    fn authenticate_requires_a_handle() {
        let mut p = provider(None, MemoryStore::new());
        assert!(matches!(
            pollster::block_on(p.authenticate()),
            Err(ProviderError::NoIdentifier)
        ));

        let mut p = provider(Some("   "), MemoryStore::new());
        assert!(matches!(
            pollster::block_on(p.authenticate()),
            Err(ProviderError::NoIdentifier)
        ));
    }

    #[test]
    fn authenticate_prefers_the_stored_handle() {
        let mut store = MemoryStore::new();
        store.put("handle", "stored.example.social").unwrap();
        let mut p = provider(Some("resolver.example.social"), store);

        let session = pollster::block_on(p.authenticate()).unwrap();
        assert_eq!(session.handle, "stored.example.social");
        assert!(session.authenticated);
        assert_eq!(session.created_at, 1_000);
    }

    #[test]
    fn stats_are_deterministic_per_handle() {
        let mut a = provider(Some("alice.example.social"), MemoryStore::new());
        let mut b = provider(Some("alice.example.social"), MemoryStore::new());

        let sa = pollster::block_on(a.authenticate()).unwrap();
        let sb = pollster::block_on(b.authenticate()).unwrap();

        let ammo_a = pollster::block_on(a.ammunition_seed(&sa)).unwrap();
        let ammo_b = pollster::block_on(b.ammunition_seed(&sb)).unwrap();
        assert_eq!(ammo_a, ammo_b);
        assert!((50..=1049).contains(&ammo_a));

        let tags_a = pollster::block_on(a.interest_tags(&sa)).unwrap();
        let tags_b = pollster::block_on(b.interest_tags(&sb)).unwrap();
        assert_eq!(tags_a, tags_b);
        assert!(!tags_a.is_empty());
        assert!(tags_a.len() <= 4);

        // Cached on the second fetch through the same store
        let again = pollster::block_on(a.ammunition_seed(&sa)).unwrap();
        assert_eq!(again, ammo_a);
    }

    #[test]
    fn quota_counts_recorded_sessions() {
        let mut p = provider(Some("alice.example.social"), MemoryStore::new());
        let session = pollster::block_on(p.authenticate()).unwrap();

        let quota = p.daily_quota(&session);
        assert_eq!((quota.used, quota.limit, quota.remaining), (0, 10, 10));

        for _ in 0..3 {
            p.record_session(&session).unwrap();
        }
        let quota = p.daily_quota(&session);
        assert_eq!((quota.used, quota.remaining), (3, 7));
    }

    #[test]
    fn record_session_reports_write_failures() {
        /// Store that accepts nothing
        #[derive(Default)]
        struct FailingStore;
        impl KvStore for FailingStore {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn put(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
                Err(StoreError("disk full".into()))
            }
        }

        let mut p = SimulatedGraphProvider::new(
            StaticResolver(Some("alice.example.social".into())),
            FailingStore,
            "2026-08-06",
            0,
        );
        let session = pollster::block_on(p.authenticate()).unwrap();
        assert!(matches!(
            p.record_session(&session),
            Err(ProviderError::RecordSession(_))
        ));
        // A failed write leaves the quota untouched
        assert_eq!(p.daily_quota(&session).used, 0);
    }
}
