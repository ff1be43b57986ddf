mod report_tests;
mod support;

use crate::core::cached_client::CachedSplitwiseClient;
use crate::core::policy::CachePolicy;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use std::sync::Arc;
use support::{FakeUpstream, ManualClock, RecordingStore};

pub struct TestHarness {
    pub client: CachedSplitwiseClient<FakeUpstream, RecordingStore, InMemoryLogging>,
    pub upstream: FakeUpstream,
    pub store: RecordingStore,
    pub logging: InMemoryLogging,
    pub clock: Arc<ManualClock>,
}

pub fn create_test_client(policy: CachePolicy) -> TestHarness {
    let upstream = FakeUpstream::new();
    let store = RecordingStore::new();
    let logging = InMemoryLogging::new();
    let clock = Arc::new(ManualClock::new());
    let client = CachedSplitwiseClient::new(upstream.clone(), store.clone(), logging.clone(), policy)
        .with_clock(clock.clone());
    TestHarness {
        client,
        upstream,
        store,
        logging,
        clock,
    }
}
