// ── Fetch policy ──
//
// Per-call-site knobs for deduplication, retry, and revalidation triggers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a key is fetched and kept fresh.
///
/// The policy is fixed when a key's resource is first created; later
/// subscribers with a different policy share the original one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchPolicy {
    /// Requests for a key started within this window are shared.
    pub dedupe_window: Duration,
    /// Extra attempts after a failed one. `0` means a single attempt.
    pub retry_count: u32,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
    /// Revalidate live keys when the host regains focus.
    pub revalidate_on_focus: bool,
    /// Revalidate live keys when connectivity comes back.
    pub revalidate_on_reconnect: bool,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            dedupe_window: Duration::from_secs(60),
            retry_count: 3,
            retry_delay: Duration::from_secs(5),
            revalidate_on_focus: false,
            revalidate_on_reconnect: true,
        }
    }
}

impl FetchPolicy {
    /// Policy used by page sections: a failed section stays failed until
    /// someone revalidates it.
    pub fn section() -> Self {
        Self {
            retry_count: 0,
            ..Self::default()
        }
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_dedupe_window(mut self, dedupe_window: Duration) -> Self {
        self.dedupe_window = dedupe_window;
        self
    }

    /// Whether `signal` should trigger a revalidation under this policy.
    pub fn reacts_to(&self, signal: RevalidateSignal) -> bool {
        match signal {
            RevalidateSignal::Focus => self.revalidate_on_focus,
            RevalidateSignal::Reconnect => self.revalidate_on_reconnect,
        }
    }
}

/// Environment events that may trigger a revalidation of live keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RevalidateSignal {
    Focus,
    Reconnect,
}
