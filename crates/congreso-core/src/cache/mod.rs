// ── Keyed stale-while-revalidate store ──
//
// One entry per key, each backed by a `watch` channel that every
// subscriber of the key reads from. Requests run as spawned tasks and
// write their outcome back into the entry; whichever request resolves
// last determines the final state.

mod fetcher;
mod policy;
mod resource;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

pub use fetcher::{FetchOutcome, Fetcher};
pub use policy::{FetchPolicy, RevalidateSignal};
pub use resource::{CachedResource, ClassifiedError, Subscription};

/// Shared, cloneable cache of keyed GET results.
///
/// Create one per process (or per test) and hand clones to every consumer.
pub struct CacheStore<F: Fetcher> {
    inner: Arc<StoreInner<F>>,
}

impl<F: Fetcher> Clone for CacheStore<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StoreInner<F: Fetcher> {
    fetcher: F,
    default_policy: FetchPolicy,
    entries: DashMap<String, Arc<Entry<F::Payload>>>,
}

#[derive(Default)]
struct Timing {
    last_started: Option<Instant>,
    in_flight: usize,
    /// A request has answered with content or a not-found. Failures do
    /// not count: a key that only ever failed still has nothing to show.
    has_answer: bool,
}

struct Entry<T> {
    key: String,
    policy: FetchPolicy,
    state: watch::Sender<CachedResource<T>>,
    timing: Mutex<Timing>,
}

impl<T> Entry<T> {
    fn new(key: &str, policy: FetchPolicy) -> Self {
        let (state, _) = watch::channel(CachedResource::pending(key));
        Self {
            key: key.to_owned(),
            policy,
            state,
            timing: Mutex::new(Timing::default()),
        }
    }

    fn timing(&self) -> MutexGuard<'_, Timing> {
        self.timing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a request start. Unless `force`, nothing starts while a
    /// request is in flight or the last one began inside the dedupe window.
    fn try_begin(&self, now: Instant, force: bool) -> bool {
        let mut timing = self.timing();
        if !force {
            if timing.in_flight > 0 {
                return false;
            }
            if let Some(started) = timing.last_started {
                if now.duration_since(started) < self.policy.dedupe_window {
                    return false;
                }
            }
        }
        timing.last_started = Some(now);
        timing.in_flight += 1;
        let loading = !timing.has_answer;
        self.state.send_modify(|r| {
            r.is_validating = true;
            r.is_loading = loading;
        });
        true
    }

    fn finish(&self, outcome: Result<FetchOutcome<T>, ClassifiedError>) {
        let mut timing = self.timing();
        timing.in_flight = timing.in_flight.saturating_sub(1);
        if outcome.is_ok() {
            timing.has_answer = true;
        }
        let still_validating = timing.in_flight > 0;
        self.state.send_modify(|r| {
            match outcome {
                Ok(FetchOutcome::Found(payload)) => {
                    r.data = Some(Arc::new(payload));
                    r.error = None;
                }
                Ok(FetchOutcome::NotFound) => {
                    r.data = None;
                    r.error = None;
                }
                Err(err) => r.error = Some(err),
            }
            r.is_loading = false;
            r.is_validating = still_validating;
            r.is_resolved = true;
        });
    }

    /// No subscriber can observe a request for this key any more and a
    /// new subscriber would refetch anyway.
    fn is_idle(&self, now: Instant) -> bool {
        let timing = self.timing();
        timing.in_flight == 0
            && timing
                .last_started
                .is_none_or(|started| now.duration_since(started) >= self.policy.dedupe_window)
    }
}

impl<F: Fetcher> CacheStore<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_policy(fetcher, FetchPolicy::default())
    }

    /// Create a store whose `subscribe` uses `policy`.
    pub fn with_policy(fetcher: F, policy: FetchPolicy) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                fetcher,
                default_policy: policy,
                entries: DashMap::new(),
            }),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    pub fn default_policy(&self) -> FetchPolicy {
        self.inner.default_policy
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Subscribe to `key` with the store's default policy.
    pub fn subscribe(&self, key: &str) -> Subscription<F::Payload> {
        self.subscribe_with(key, self.inner.default_policy)
    }

    /// Subscribe to `key`, creating its resource with `policy` if needed.
    ///
    /// A fresh or in-flight resource is returned as-is. A missing one starts
    /// a request and reports `is_loading`. A stale one keeps its data and
    /// revalidates in the background.
    pub fn subscribe_with(&self, key: &str, policy: FetchPolicy) -> Subscription<F::Payload> {
        self.evict_idle();
        let now = Instant::now();

        let (entry, started) = match self.inner.entries.entry(key.to_owned()) {
            MapEntry::Occupied(occupied) => {
                let entry = Arc::clone(occupied.get());
                let started = entry.try_begin(now, false);
                (entry, started)
            }
            MapEntry::Vacant(vacant) => {
                let entry = Arc::new(Entry::new(key, policy));
                let started = entry.try_begin(now, false);
                vacant.insert(Arc::clone(&entry));
                (entry, started)
            }
        };

        let subscription = Subscription::new(entry.state.subscribe());
        if started {
            debug!(key, "fetching");
            self.spawn_request(entry);
        } else {
            trace!(key, "cache hit");
        }
        subscription
    }

    /// Start a fresh request for `key` regardless of freshness.
    ///
    /// A key nobody has subscribed to yet is created with the store's
    /// default policy; use [`revalidate_with`](Self::revalidate_with) to
    /// pick another one.
    pub fn revalidate(&self, key: &str) {
        self.revalidate_with(key, self.inner.default_policy);
    }

    /// Like [`revalidate`](Self::revalidate), creating a missing key with
    /// `policy`. An existing key keeps the policy it was created with.
    pub fn revalidate_with(&self, key: &str, policy: FetchPolicy) {
        let entry = Arc::clone(
            self.inner
                .entries
                .entry(key.to_owned())
                .or_insert_with(|| Arc::new(Entry::new(key, policy)))
                .value(),
        );
        if entry.try_begin(Instant::now(), true) {
            debug!(key, "revalidating");
            self.spawn_request(entry);
        }
    }

    /// Current state of `key`, without subscribing.
    pub fn get(&self, key: &str) -> Option<CachedResource<F::Payload>> {
        self.inner
            .entries
            .get(key)
            .map(|entry| entry.state.borrow().clone())
    }

    /// Revalidate every subscribed key whose policy reacts to `signal`.
    ///
    /// Returns how many keys were revalidated.
    pub fn notify(&self, signal: RevalidateSignal) -> usize {
        let live: Vec<_> = self
            .inner
            .entries
            .iter()
            .filter(|entry| entry.policy.reacts_to(signal) && entry.state.receiver_count() > 0)
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let now = Instant::now();
        for entry in &live {
            if entry.try_begin(now, true) {
                self.spawn_request(Arc::clone(entry));
            }
        }
        debug!(%signal, keys = live.len(), "revalidate signal");
        live.len()
    }

    /// Drop resources nobody subscribes to once their window has passed.
    pub fn evict_idle(&self) {
        let now = Instant::now();
        self.inner.entries.retain(|key, entry| {
            let keep = entry.state.receiver_count() > 0 || !entry.is_idle(now);
            if !keep {
                trace!(%key, "evicting idle resource");
            }
            keep
        });
    }

    // ── Request execution ────────────────────────────────────────────

    fn spawn_request(&self, entry: Arc<Entry<F::Payload>>) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.fetch_with_retry(&entry).await;
            entry.finish(outcome);
        });
    }
}

impl<F: Fetcher> StoreInner<F> {
    async fn fetch_with_retry(
        &self,
        entry: &Entry<F::Payload>,
    ) -> Result<FetchOutcome<F::Payload>, ClassifiedError> {
        let policy = entry.policy;
        let mut retries = 0;
        loop {
            match self.fetcher.fetch(&entry.key).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) if retries < policy.retry_count => {
                    retries += 1;
                    debug!(
                        key = %entry.key,
                        status = err.status,
                        retry = retries,
                        "request failed, retrying in {:?}",
                        policy.retry_delay
                    );
                    tokio::time::sleep(policy.retry_delay).await;
                }
                Err(err) => {
                    warn!(key = %entry.key, status = err.status, "request failed: {err}");
                    return Err(err);
                }
            }
        }
    }
}
