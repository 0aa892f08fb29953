//! `congreso content ...`: normalized site sections.

use std::sync::Arc;

use serde_json::Value;
use tabled::Tabled;

use congreso_api::endpoints;
use congreso_core::ContentService;
use congreso_core::content::{GlobalSeo, HeroSection, SiteConfig, Speaker, Workshop, normalize};

use crate::cli::{ContentArgs, ContentCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Ctx;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SpeakerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    subtitle: String,
    #[tabled(rename = "Country")]
    country: String,
}

fn speaker_row(s: &Speaker) -> SpeakerRow {
    SpeakerRow {
        name: s.name.clone(),
        subtitle: s.subtitle.clone(),
        country: s.country.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
    }
}

#[derive(Tabled)]
struct WorkshopRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Document")]
    document: String,
}

fn workshop_row(w: &Workshop) -> WorkshopRow {
    WorkshopRow {
        id: w.id,
        title: w.title.clone(),
        document: w.document_name.clone().unwrap_or_default(),
    }
}

// ── Detail views ─────────────────────────────────────────────────────

fn hero_detail(h: &HeroSection) -> String {
    output::detail_lines(&[
        ("Title", h.title.clone()),
        ("Subtitle", h.subtitle.clone().unwrap_or_default()),
        ("Description", h.description.clone()),
        ("Next edition", h.next_edition_title.clone()),
        ("Event date", h.event_date.clone()),
        ("Featured", h.featured_url.clone()),
        ("Background", h.background_url.clone()),
        ("Enabled", h.enabled.to_string()),
    ])
}

fn seo_detail(s: &GlobalSeo) -> String {
    output::detail_lines(&[
        ("Description", s.site_description.clone()),
        ("Keywords", s.site_keywords.clone()),
        ("Domain", s.canonical_domain.clone()),
        ("Analytics", s.google_analytics_id.clone().unwrap_or_default()),
        ("Tag manager", s.google_tag_manager_id.clone().unwrap_or_default()),
        ("Pixel", s.facebook_pixel_id.clone().unwrap_or_default()),
        ("OG image", s.default_og_image.clone().unwrap_or_default()),
    ])
}

fn config_detail(c: &SiteConfig) -> String {
    let nav = c
        .navigation
        .iter()
        .map(|item| {
            if item.children.is_empty() {
                item.label.clone()
            } else {
                format!("{} ({})", item.label, item.children.len())
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    output::detail_lines(&[
        ("Name", c.name.clone()),
        ("Description", c.description.clone().unwrap_or_default()),
        ("Logo", c.logo_url.clone().unwrap_or_default()),
        ("Main color", c.colors.main.clone().unwrap_or_default()),
        ("Secondary", c.colors.secondary.clone().unwrap_or_default()),
        ("Navigation", nav),
        (
            "Footer",
            c.footer
                .as_ref()
                .and_then(|f| f.copy_text.clone())
                .unwrap_or_default(),
        ),
    ])
}

// ── Loading ──────────────────────────────────────────────────────────

/// Resolve one section key through the cache, without retries.
async fn load(service: &ContentService, key: &str) -> Result<Arc<Value>, CliError> {
    let resource = service.subscribe_section(key).resolved().await;
    if let Some(err) = resource.error {
        return Err(err.into());
    }
    resource.data.ok_or_else(|| CliError::NotFound { key: key.into() })
}

fn unexpected(what: &str) -> CliError {
    CliError::InvalidContent {
        message: format!("{what} response has no data"),
    }
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(args: ContentArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let service = config::content_service(&ctx.config)?;
    let base = service.base_url().clone();

    let rendered = match args.command {
        ContentCommand::Hero => {
            let json = load(&service, endpoints::HOME_HERO).await?;
            let hero = normalize::hero(&json, &base).ok_or_else(|| unexpected("hero"))?;
            output::render_single(ctx.format, &hero, hero_detail, |h| h.title.clone())?
        }

        ContentCommand::Seo => {
            let json = load(&service, endpoints::SEO_SETTINGS).await?;
            let seo = normalize::global_seo(&json, &base).ok_or_else(|| unexpected("SEO"))?;
            output::render_single(ctx.format, &seo, seo_detail, |s| {
                s.canonical_domain.clone()
            })?
        }

        ContentCommand::Config => {
            let json = load(&service, endpoints::CONFIGURATION).await?;
            let cfg = normalize::site_config(&json, &base)
                .ok_or_else(|| unexpected("configuration"))?;
            output::render_single(ctx.format, &cfg, config_detail, |c| c.name.clone())?
        }

        ContentCommand::Logo => {
            let json = load(&service, endpoints::HOME_GENERAL).await?;
            let url = normalize::logo_url(&json, &base).ok_or_else(|| CliError::NotFound {
                key: endpoints::HOME_GENERAL.into(),
            })?;
            output::render_single(ctx.format, &url, String::clone, String::clone)?
        }

        ContentCommand::Speakers => {
            let (section, list) = tokio::join!(
                load(&service, endpoints::SPEAKERS_SECTION),
                load(&service, endpoints::SPEAKERS),
            );
            // Either half may be missing; both missing is reported.
            let (section, list) = match (section, list) {
                (Err(e), Err(_)) => return Err(e),
                (s, l) => (s.ok(), l.ok()),
            };
            let speakers = normalize::speakers(section.as_deref(), list.as_deref(), &base);
            if !speakers.enabled {
                ctx.status(true, "speakers section is disabled");
                return Ok(());
            }
            output::render_list(
                ctx.format,
                &speakers.speakers,
                speaker_row,
                |s| s.name.clone(),
            )?
        }

        ContentCommand::Workshops => {
            let json = load(&service, endpoints::WORKSHOPS).await?;
            let workshops = normalize::workshops(&json, &base);
            output::render_list(ctx.format, &workshops, workshop_row, |w| {
                w.title.clone()
            })?
        }
    };

    ctx.print(&rendered);
    Ok(())
}
