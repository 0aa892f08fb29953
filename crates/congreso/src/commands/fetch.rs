//! `congreso fetch <KEY>`: one key through the cache, printed as raw JSON.

use crate::cli::{FetchArgs, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn handle(args: FetchArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let service = config::content_service(&ctx.config)?;
    let mut policy = service.cache().default_policy();
    if let Some(retries) = args.retries {
        policy = policy.with_retry_count(retries);
    }

    tracing::debug!(key = %args.key, retries = policy.retry_count, "fetching");
    let mut subscription = service.cache().subscribe_with(&args.key, policy);
    let resource = subscription.resolved().await;

    if let Some(err) = resource.error {
        return Err(err.into());
    }
    let Some(data) = resource.data else {
        return Err(CliError::NotFound { key: args.key });
    };

    // Raw CMS payloads have no table shape; tables fall back to JSON.
    let rendered = match ctx.format {
        OutputFormat::Table | OutputFormat::Json => output::render_json(&*data, false)?,
        OutputFormat::JsonCompact | OutputFormat::Plain => output::render_json(&*data, true)?,
        OutputFormat::Yaml => output::render_yaml(&*data)?,
    };
    ctx.print(&rendered);
    ctx.status(true, &format!("fetched {}", args.key));
    Ok(())
}
