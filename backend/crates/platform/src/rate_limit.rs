//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions and the in-memory fixed-window store.
//!
//! The scheme is a classic fixed window: each key gets a deadline set at
//! first touch, a counter that increments until the deadline passes, and a
//! fresh window afterwards. A client can therefore burst up to
//! `2 * max_requests - 1` requests across one window boundary pair; that is
//! accepted behavior for this endpoint class, not a defect.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Shared identity for callers with no determinable client identifier.
///
/// All unidentifiable callers count against one window together.
pub const ANON_KEY: &str = "anon";

/// Table size at which expired entries are swept before inserting new keys.
const SWEEP_THRESHOLD: usize = 1024;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(300),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Build from `RATE_LIMIT_MAX` / `RATE_LIMIT_WINDOW` (seconds),
    /// falling back to the defaults for missing or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_requests = std::env::var("RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_requests);
        let window = std::env::var("RATE_LIMIT_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.window);
        Self {
            max_requests,
            window,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    /// True if this request must be rejected
    pub limited: bool,
    /// Requests left in the current window after this check
    pub remaining: u32,
    /// Epoch-ms timestamp when the window resets
    pub reset_at_ms: i64,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets (at least 1 while limited)
    pub fn retry_after_secs(&self, now_ms: i64) -> i64 {
        ((self.reset_at_ms - now_ms).max(0) + 999) / 1000
    }
}

/// Read-only rate limit snapshot
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count this request against `key`'s window and decide whether to
    /// reject it. Missing/empty keys share the [`ANON_KEY`] identity.
    async fn check(&self, key: Option<&str>) -> RateLimitDecision;

    /// Read-only snapshot for `key`; never mutates or creates an entry.
    /// Unseen (or expired) keys report full quota with `reset_at_ms = 0`.
    async fn info(&self, key: Option<&str>) -> RateLimitStatus;
}

/// Per-key window state
#[derive(Debug)]
struct RateLimitEntry {
    count: u32,
    window_reset_at_ms: i64,
}

/// In-memory fixed-window rate limit store
///
/// The whole table sits behind one mutex, making each increment-and-compare
/// atomic per key: two concurrent checks for the same key can never both
/// pass when the true post-increment count exceeds the quota. The lock is
/// never held across an await point.
pub struct MemoryRateLimitStore {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl MemoryRateLimitStore {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check against an explicit clock. Production goes through the
    /// [`RateLimitStore`] impl; tests drive this directly.
    pub fn check_at(&self, key: Option<&str>, now_ms: i64) -> RateLimitDecision {
        let key = normalize_key(key);
        let max = self.config.max_requests;
        let mut entries = self.entries.lock().expect("rate limit table lock poisoned");

        match entries.get_mut(key) {
            Some(entry) if entry.window_reset_at_ms > now_ms => {
                // Active window: increment unconditionally so the reported
                // reset stays stable until the window actually elapses.
                entry.count = entry.count.saturating_add(1);
                let reset_at_ms = entry.window_reset_at_ms;
                if entry.count > max {
                    tracing::warn!(key, count = entry.count, max, "Rate limit exceeded");
                    RateLimitDecision {
                        limited: true,
                        remaining: 0,
                        reset_at_ms,
                    }
                } else {
                    RateLimitDecision {
                        limited: false,
                        remaining: max - entry.count,
                        reset_at_ms,
                    }
                }
            }
            _ => {
                // Unseen key or expired window: fresh entry.
                if entries.len() >= SWEEP_THRESHOLD {
                    entries.retain(|_, e| e.window_reset_at_ms > now_ms);
                }
                let reset_at_ms = now_ms + self.config.window_ms();
                entries.insert(
                    key.to_string(),
                    RateLimitEntry {
                        count: 1,
                        window_reset_at_ms: reset_at_ms,
                    },
                );
                RateLimitDecision {
                    limited: false,
                    remaining: max.saturating_sub(1),
                    reset_at_ms,
                }
            }
        }
    }

    /// Snapshot against an explicit clock; see [`RateLimitStore::info`].
    pub fn info_at(&self, key: Option<&str>, now_ms: i64) -> RateLimitStatus {
        let key = normalize_key(key);
        let max = self.config.max_requests;
        let entries = self.entries.lock().expect("rate limit table lock poisoned");

        match entries.get(key) {
            Some(entry) if entry.window_reset_at_ms > now_ms => RateLimitStatus {
                remaining: max.saturating_sub(entry.count),
                reset_at_ms: entry.window_reset_at_ms,
            },
            _ => RateLimitStatus {
                remaining: max,
                reset_at_ms: 0,
            },
        }
    }

    /// Number of tracked keys (live and expired)
    pub fn tracked_keys(&self) -> usize {
        self.entries
            .lock()
            .expect("rate limit table lock poisoned")
            .len()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check(&self, key: Option<&str>) -> RateLimitDecision {
        self.check_at(key, now_ms())
    }

    async fn info(&self, key: Option<&str>) -> RateLimitStatus {
        self.info_at(key, now_ms())
    }
}

fn normalize_key(key: Option<&str>) -> &str {
    match key {
        Some(k) if !k.is_empty() => k,
        _ => ANON_KEY,
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
