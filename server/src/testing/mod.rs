use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::auth::{Principal, TimeSource, TokenService};
use crate::posts::InMemoryPostRepository;
use crate::state::AppState;

pub const TEST_USERNAME: &str = "alice";
pub const TEST_PASSWORD: &str = "s3cret";
pub const TEST_SECRET: &[u8] = b"test-secret-key-that-is-long-enough";

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now_secs: AtomicU64,
}

impl ManualTimeSource {
    #[must_use]
    pub const fn new(now_secs: u64) -> Self {
        Self {
            now_secs: AtomicU64::new(now_secs),
        }
    }

    pub fn set(&self, now_secs: u64) {
        self.now_secs.store(now_secs, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now_secs.fetch_add(by.as_secs(), Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_secs(&self) -> u64 {
        self.now_secs.load(Ordering::SeqCst)
    }
}

/// Application state for principal `alice`/`s3cret` whose token service reads `clock`.
#[must_use]
#[allow(clippy::disallowed_methods)]
pub fn new_test_state(ttl: Duration, clock: Arc<ManualTimeSource>) -> AppState {
    #[allow(clippy::expect_used)]
    let tokens = TokenService::with_time_source(TEST_SECRET, ttl, clock)
        .expect("test secret is non-empty");
    #[allow(clippy::expect_used)]
    let principal = Principal::new(TEST_USERNAME).expect("test username is non-empty");

    AppState::new(
        principal,
        TEST_PASSWORD.to_string(),
        Arc::new(tokens),
        Arc::new(InMemoryPostRepository::new()),
    )
}
