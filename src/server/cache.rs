// TTL cache for feedback responses
//
// Keyed by a digest of the (prompt, chain config) composite so a changed
// criterion or model misses. Expired entries are dropped on lookup; there
// is no other invalidation policy.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::chain::{ChainConfig, Feedback};

struct CacheEntry {
    feedback: Feedback,
    inserted: Instant,
}

/// Shared response cache — clone freely (it's an Arc inside)
#[derive(Clone)]
pub struct FeedbackCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl FeedbackCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: DashMap::new(),
                ttl,
            }),
        }
    }

    /// Cache key: SHA-256 over the serialized prompt + config + key
    /// composite, so one caller's result never answers for another's
    /// credential.
    pub fn key(prompt: &str, config: &ChainConfig, api_key: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        hasher.update(b"\x00");
        // ChainConfig serialization is deterministic (struct field order)
        hasher.update(serde_json::to_vec(config).unwrap_or_default());
        hasher.update(b"\x00");
        hasher.update(api_key.unwrap_or_default().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<Feedback> {
        let entry = self.inner.entries.get(key)?;
        if entry.inserted.elapsed() >= self.inner.ttl {
            drop(entry);
            self.inner.entries.remove(key);
            return None;
        }
        Some(entry.feedback.clone())
    }

    pub fn insert(&self, key: String, feedback: Feedback) {
        self.inner.entries.insert(
            key,
            CacheEntry {
                feedback,
                inserted: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::FeedbackCriteria;

    fn config(use_llm: bool) -> ChainConfig {
        ChainConfig::new(FeedbackCriteria::default(), use_llm, Some("gpt-4".to_string()))
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = FeedbackCache::new(Duration::from_secs(300));
        let key = FeedbackCache::key("explain quantum computing", &config(true), None);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), Feedback { score: 75, ..Default::default() });
        assert_eq!(cache.get(&key).unwrap().score, 75);
    }

    #[test]
    fn test_expired_entry_evicted() {
        let cache = FeedbackCache::new(Duration::ZERO);
        let key = FeedbackCache::key("p", &config(true), None);
        cache.insert(key.clone(), Feedback::default());

        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_config_changes_key() {
        let with_llm = FeedbackCache::key("same prompt", &config(true), None);
        let without_llm = FeedbackCache::key("same prompt", &config(false), None);
        assert_ne!(with_llm, without_llm);

        let other_prompt = FeedbackCache::key("other prompt", &config(true), None);
        assert_ne!(with_llm, other_prompt);
    }

    #[test]
    fn test_api_key_changes_key() {
        let user_a = FeedbackCache::key("same prompt", &config(true), Some("sk-user-a"));
        let user_b = FeedbackCache::key("same prompt", &config(true), Some("sk-user-b"));
        assert_ne!(user_a, user_b);
    }
}
