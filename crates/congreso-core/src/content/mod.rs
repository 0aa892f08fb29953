// ── Content service ──
//
// Facade over the CMS client and the cache store. Interactive consumers
// subscribe through the cache; one-shot consumers (page rendering, the
// CLI) use the server-side helpers, which swallow failures into `None`.

pub mod model;
pub mod normalize;

use congreso_api::{CmsClient, TransportConfig, endpoints};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::cache::{CacheStore, FetchPolicy, Subscription};
use crate::error::CoreError;

pub use model::{
    Country, Footer, GlobalSeo, HeroSection, NavItem, Palette, SiteConfig, Speaker,
    SpeakersSection, Workshop,
};

/// Typed access to the congress site's content.
#[derive(Clone)]
pub struct ContentService {
    cache: CacheStore<CmsClient>,
}

impl ContentService {
    pub fn new(client: CmsClient, policy: FetchPolicy) -> Self {
        Self {
            cache: CacheStore::with_policy(client, policy),
        }
    }

    /// Build the HTTP client and wrap it.
    pub fn connect(
        base_url: Url,
        transport: &TransportConfig,
        policy: FetchPolicy,
    ) -> Result<Self, CoreError> {
        let client = CmsClient::new(base_url, transport)?;
        Ok(Self::new(client, policy))
    }

    pub fn cache(&self) -> &CacheStore<CmsClient> {
        &self.cache
    }

    pub fn client(&self) -> &CmsClient {
        self.cache.fetcher()
    }

    pub fn base_url(&self) -> &Url {
        self.client().base_url()
    }

    /// The configured policy with retries disabled, as page sections use.
    pub fn section_policy(&self) -> FetchPolicy {
        self.cache.default_policy().with_retry_count(0)
    }

    // ── Cached access ────────────────────────────────────────────────

    pub fn subscribe(&self, key: &str) -> Subscription<Value> {
        self.cache.subscribe(key)
    }

    pub fn subscribe_section(&self, key: &str) -> Subscription<Value> {
        self.cache.subscribe_with(key, self.section_policy())
    }

    /// Force a refetch of a section key, creating it with the section
    /// policy if nothing subscribed yet.
    pub fn revalidate_section(&self, key: &str) {
        self.cache.revalidate_with(key, self.section_policy());
    }

    // ── One-shot access ──────────────────────────────────────────────

    /// GET `key` once, bypassing the cache.
    ///
    /// Any failure yields `None`. Not-found is silent; everything else is
    /// logged.
    pub async fn fetch_server_side(&self, key: &str) -> Option<Value> {
        match self.client().get_json(key).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                debug!(key, "content not configured");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "server-side fetch failed");
                None
            }
        }
    }

    pub async fn hero(&self) -> Option<HeroSection> {
        let json = self.fetch_server_side(endpoints::HOME_HERO).await?;
        normalize::hero(&json, self.base_url())
    }

    pub async fn global_seo(&self) -> Option<GlobalSeo> {
        let json = self.fetch_server_side(endpoints::SEO_SETTINGS).await?;
        normalize::global_seo(&json, self.base_url())
    }

    pub async fn logo_url(&self) -> Option<String> {
        let json = self.fetch_server_side(endpoints::HOME_GENERAL).await?;
        normalize::logo_url(&json, self.base_url())
    }

    pub async fn site_config(&self) -> Option<SiteConfig> {
        let json = self.fetch_server_side(endpoints::CONFIGURATION).await?;
        normalize::site_config(&json, self.base_url())
    }

    /// Speakers heading and list, fetched concurrently. `None` only when
    /// neither is available.
    pub async fn speakers(&self) -> Option<SpeakersSection> {
        let (section, list) = tokio::join!(
            self.fetch_server_side(endpoints::SPEAKERS_SECTION),
            self.fetch_server_side(endpoints::SPEAKERS),
        );
        if section.is_none() && list.is_none() {
            return None;
        }
        Some(normalize::speakers(
            section.as_ref(),
            list.as_ref(),
            self.base_url(),
        ))
    }

    pub async fn workshops(&self) -> Option<Vec<Workshop>> {
        let json = self.fetch_server_side(endpoints::WORKSHOPS).await?;
        Some(normalize::workshops(&json, self.base_url()))
    }
}
