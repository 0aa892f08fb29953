// ── Strapi payload normalizers ──
//
// The CMS answers in two shapes depending on its version: entries wrapped
// as `data.attributes.X` or flat as `data.X`. Relations come either as
// `{ data: { attributes: {...} } }` or inline. Everything here accepts
// both and never fails; absent fields become empty values.

use congreso_api::media_url;
use serde_json::Value;
use url::Url;

use super::model::{
    Country, Footer, GlobalSeo, HeroSection, NavItem, Palette, SiteConfig, Speaker,
    SpeakersSection, Workshop,
};

// ── Shape helpers ────────────────────────────────────────────────────

/// `v.attributes` when it is an object, otherwise `v`.
fn attrs(v: &Value) -> &Value {
    match v.get("attributes") {
        Some(a) if a.is_object() => a,
        _ => v,
    }
}

/// The entry under `data`, unwrapped from `attributes`.
fn entry(json: &Value) -> Option<&Value> {
    json.get("data").filter(|d| !d.is_null()).map(attrs)
}

/// A relation field, unwrapped from `{ data: { attributes } }` if needed.
fn relation<'a>(v: &'a Value, key: &str) -> Option<&'a Value> {
    let field = v.get(key).filter(|f| !f.is_null())?;
    match field.get("data") {
        Some(Value::Null) => None,
        Some(data) => Some(attrs(data)),
        None => Some(field),
    }
}

fn opt_text(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn text(v: &Value, key: &str) -> String {
    opt_text(v, key).unwrap_or_default()
}

fn flag(v: &Value, key: &str, default: bool) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Absolute URL of a media relation, if it has a non-empty `url`.
fn media(v: &Value, key: &str, base: &Url) -> Option<String> {
    relation(v, key)
        .and_then(|m| opt_text(m, "url"))
        .map(|path| media_url(base, &path))
}

// ── Sections ─────────────────────────────────────────────────────────

/// Hero block from the `HomeSection` component of the home page.
pub fn hero(json: &Value, base: &Url) -> Option<HeroSection> {
    let section = entry(json)?.get("HomeSection").filter(|s| s.is_object())?;
    Some(HeroSection {
        enabled: flag(section, "habilitado", true),
        title: text(section, "titulo"),
        subtitle: opt_text(section, "sub_titulo"),
        description: text(section, "descripcion"),
        featured_url: media(section, "destacado", base).unwrap_or_default(),
        next_edition_title: text(section, "ProximaEdicion"),
        event_date: text(section, "FechaEvento"),
        background_url: media(section, "imageBackground", base).unwrap_or_default(),
    })
}

pub fn global_seo(json: &Value, base: &Url) -> Option<GlobalSeo> {
    let data = entry(json)?;
    Some(GlobalSeo {
        site_description: text(data, "site_description"),
        site_keywords: text(data, "site_keywords"),
        canonical_domain: text(data, "canonical_domain"),
        google_analytics_id: opt_text(data, "google_analytics_id"),
        google_tag_manager_id: opt_text(data, "google_tag_manager_id"),
        facebook_pixel_id: opt_text(data, "facebook_pixel_id"),
        default_og_image: media(data, "default_og_image", base),
    })
}

/// Congress logo from the `HomeGeneral` component.
pub fn logo_url(json: &Value, base: &Url) -> Option<String> {
    let general = entry(json)?.get("HomeGeneral")?;
    media(general, "logoCongreso", base)
}

pub fn site_config(json: &Value, base: &Url) -> Option<SiteConfig> {
    let data = entry(json)?;

    let footer = relation(data, "footer").map(|f| Footer {
        copy_text: opt_text(f, "copy_text"),
        facebook: opt_text(f, "social_facebook"),
        instagram: opt_text(f, "social_instagram"),
        twitter: opt_text(f, "social_twitter"),
        mail: opt_text(f, "social_mail"),
    });

    let navigation = relation(data, "main_navigation")
        .map(|nav| nav_items(nav, "items"))
        .unwrap_or_default();

    Some(SiteConfig {
        name: text(data, "nombre"),
        description: opt_text(data, "descripcion"),
        logo_url: media(data, "logo", base),
        colors: Palette {
            main: opt_text(data, "color_main"),
            secondary: opt_text(data, "color_secondary"),
            text: opt_text(data, "color_text"),
            accent: opt_text(data, "color_accent"),
        },
        footer,
        navigation,
    })
}

fn nav_items(v: &Value, key: &str) -> Vec<NavItem> {
    v.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| NavItem {
                    label: text(item, "label"),
                    link: text(item, "link"),
                    children: nav_items(item, "sub_items"),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Speakers block from the section heading and the speaker list.
///
/// Either payload may be missing; the heading falls back to empty text and
/// the list to no speakers.
pub fn speakers(section: Option<&Value>, list: Option<&Value>, base: &Url) -> SpeakersSection {
    let heading = section
        .and_then(entry)
        .and_then(|d| d.get("DisertantesSection"))
        .filter(|s| s.is_object());

    let speakers: Vec<Speaker> = list
        .and_then(|l| l.get("data"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|item| speaker(attrs(item), base)).collect())
        .unwrap_or_default();

    let Some(heading) = heading else {
        return SpeakersSection {
            speakers,
            ..SpeakersSection::default()
        };
    };

    SpeakersSection {
        enabled: flag(heading, "DisertantesHabilitados", true),
        title: text(heading, "Seccion"),
        subtitle: text(heading, "Subtitulo"),
        description: text(heading, "Descripcion"),
        background_url: media(heading, "imageBackground", base),
        speakers,
    }
}

fn speaker(v: &Value, base: &Url) -> Speaker {
    Speaker {
        name: text(v, "nombre"),
        subtitle: text(v, "subtitulo"),
        description: text(v, "descripcion"),
        avatar_url: media(v, "avatar", base),
        country: relation(v, "pai").map(|p| Country {
            name: text(p, "nombre"),
            code: text(p, "codigo"),
        }),
    }
}

pub fn workshops(json: &Value, base: &Url) -> Vec<Workshop> {
    let Some(items) = json.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            let a = attrs(item);
            let document = relation(a, "documento");
            Workshop {
                id: item.get("id").and_then(Value::as_u64).unwrap_or_default(),
                title: text(a, "title"),
                image_url: media(a, "featured_image", base),
                document_url: document
                    .and_then(|d| opt_text(d, "url"))
                    .map(|path| media_url(base, &path)),
                document_name: document.and_then(|d| opt_text(d, "name")),
            }
        })
        .collect()
}
