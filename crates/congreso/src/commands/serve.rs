//! `congreso serve`: run the same-origin CMS proxy until Ctrl-C.

use tokio_util::sync::CancellationToken;

use congreso_api::CmsClient;
use congreso_proxy::ProxyState;

use crate::cli::ServeArgs;
use crate::error::CliError;

use super::Ctx;

pub async fn handle(args: ServeArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let mut proxy = ctx.config.proxy.clone();
    if let Some(bind) = args.bind {
        proxy.bind = bind;
    }
    let addr = proxy.bind_addr()?;

    let backend = &ctx.config.backend;
    let base = backend.base_url()?;
    let client = CmsClient::new(base.clone(), &backend.transport())
        .map_err(congreso_core::CoreError::from)?;
    let router = congreso_proxy::router(ProxyState::new(client));

    let listener = congreso_proxy::bind(addr).await?;
    let local = listener.local_addr()?;
    ctx.status(
        true,
        &format!("proxying http://{local}/api/strapi/* to {base}"),
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            return;
        }
        tracing::info!("shutdown requested");
        on_signal.cancel();
    });

    congreso_proxy::serve(listener, router, cancel).await?;
    Ok(())
}
