//! In-memory memo of parsed recordings
//!
//! Entries are keyed by [`SessionRequest::cache_key`], so two requests that
//! differ only in event-name case share one parsed recording.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::SessionRecording;
use crate::types::{SessionRequest, SessionType};

type CacheKey = (i32, String, SessionType);

/// Parsed recordings shared between loads
#[derive(Debug, Default)]
pub struct RecordingCache {
    /// When disabled every lookup misses and inserts are dropped
    enabled: bool,
    entries: RwLock<HashMap<CacheKey, Arc<SessionRecording>>>,
}

impl RecordingCache {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, entries: RwLock::new(HashMap::new()) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cached recording for `request`, if any.
    pub async fn get(&self, request: &SessionRequest) -> Option<Arc<SessionRecording>> {
        if !self.enabled {
            return None;
        }
        let found = self.entries.read().await.get(&request.cache_key()).cloned();
        if found.is_some() {
            debug!(%request, "Using cached session recording");
        }
        found
    }

    pub async fn insert(&self, request: &SessionRequest, recording: Arc<SessionRecording>) {
        if !self.enabled {
            return;
        }
        self.entries.write().await.insert(request.cache_key(), recording);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shares_entries_across_event_name_case() {
        let cache = RecordingCache::new(true);
        let request = SessionRequest::new(2023, "Monaco Grand Prix", SessionType::Qualifying);
        cache.insert(&request, Arc::new(SessionRecording::default())).await;

        let other = SessionRequest::new(2023, "MONACO GRAND PRIX", SessionType::Qualifying);
        assert!(cache.get(&other).await.is_some());
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn disabled_cache_never_hits() {
        let cache = RecordingCache::new(false);
        let request = SessionRequest::new(2023, "Monaco Grand Prix", SessionType::Race);
        cache.insert(&request, Arc::new(SessionRecording::default())).await;

        assert!(cache.get(&request).await.is_none());
        assert!(cache.is_empty().await);
    }
}
