//! `congreso countdown`: time left until the congress opens.

use chrono::Utc;

use congreso_api::endpoints;
use congreso_core::{TimeLeft, parse_event_date};

use crate::cli::CountdownArgs;
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn handle(args: CountdownArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let raw = match args.date {
        Some(date) => date,
        None => {
            let service = config::content_service(&ctx.config)?;
            let hero = service.hero().await.ok_or_else(|| CliError::NotFound {
                key: endpoints::HOME_HERO.into(),
            })?;
            if hero.event_date.is_empty() {
                return Err(CliError::InvalidContent {
                    message: "hero block has no event date".into(),
                });
            }
            hero.event_date
        }
    };

    let target = parse_event_date(&raw)?;
    let left = TimeLeft::until(target, Utc::now());
    tracing::debug!(%target, %left, "countdown");

    let rendered = output::render_single(
        ctx.format,
        &left,
        |t| {
            let pairs: Vec<(&str, String)> = t
                .parts()
                .iter()
                .map(|(value, label)| (*label, value.to_string()))
                .collect();
            output::detail_lines(&pairs)
        },
        ToString::to_string,
    )?;
    ctx.print(&rendered);
    if left.is_zero() {
        ctx.status(true, "the congress has started");
    }
    Ok(())
}
