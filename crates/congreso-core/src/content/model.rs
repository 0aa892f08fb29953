// ── Content model ──
//
// Display-ready shapes for the site's sections. Media fields hold absolute
// URLs; missing text fields are empty strings.

use serde::Serialize;

/// Hero block at the top of the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeroSection {
    pub enabled: bool,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub featured_url: String,
    pub next_edition_title: String,
    /// Event start as sent by the CMS (ISO 8601).
    pub event_date: String,
    pub background_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSeo {
    pub site_description: String,
    pub site_keywords: String,
    pub canonical_domain: String,
    pub google_analytics_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub default_og_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub main: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub copy_text: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub mail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub link: String,
    pub children: Vec<NavItem>,
}

/// Site-wide settings: name, colors, navigation and footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub colors: Palette,
    pub footer: Option<Footer>,
    pub navigation: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub avatar_url: Option<String>,
    pub country: Option<Country>,
}

/// Speakers block: heading plus the speaker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakersSection {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub background_url: Option<String>,
    pub speakers: Vec<Speaker>,
}

impl Default for SpeakersSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            background_url: None,
            speakers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Workshop {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub document_url: Option<String>,
    pub document_name: Option<String>,
}
