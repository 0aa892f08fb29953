// congreso-core: cache, carousel engine, and content model between
// congreso-api and the front ends (CLI/TUI/proxy).

pub mod cache;
pub mod carousel;
pub mod content;
pub mod countdown;
pub mod error;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{
    CacheStore, CachedResource, ClassifiedError, FetchOutcome, FetchPolicy, Fetcher,
    RevalidateSignal, Subscription,
};
pub use carousel::{
    AutoplayTimer, Breakpoints, Carousel, CarouselError, CarouselOptions, ItemsPerView, Mode,
    ViewportTier,
};
pub use content::ContentService;
pub use countdown::{TimeLeft, parse_event_date};
pub use error::CoreError;
