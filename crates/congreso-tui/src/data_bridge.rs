//! Data bridge: cache subscriptions in, `Action::ResourceUpdated` out.
//!
//! Holds one section subscription per content key the screens render, so
//! the keys stay live in the cache for as long as the TUI runs. Every
//! state change of a key (loading, resolved, failed) is forwarded.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use congreso_core::ContentService;

use crate::action::Action;
use crate::screen::ScreenId;

/// Subscribe to every screen's keys and forward updates until cancelled
/// or until the action channel closes.
pub async fn spawn_data_bridge(
    service: ContentService,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let keys: Vec<&'static str> = ScreenId::ALL
        .iter()
        .flat_map(|id| id.content_keys().iter().copied())
        .collect();

    let mut subscriptions: Vec<_> = keys
        .iter()
        .map(|key| service.subscribe_section(key))
        .collect();
    info!(keys = subscriptions.len(), "data bridge subscribed");

    // Snapshots first so screens leave their empty state immediately
    for sub in &subscriptions {
        if action_tx.send(Action::ResourceUpdated(sub.current())).is_err() {
            return;
        }
    }

    loop {
        let changes = subscriptions.iter_mut().map(|sub| Box::pin(sub.changed()));

        let update = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            (update, _, _) = futures::future::select_all(changes) => update,
        };

        let Some(resource) = update else {
            debug!("cache dropped, data bridge exiting");
            break;
        };
        debug!(
            key = %resource.key,
            loading = resource.is_validating,
            failed = resource.error.is_some(),
            "resource changed"
        );
        if action_tx.send(Action::ResourceUpdated(resource)).is_err() {
            break;
        }
    }

    debug!("data bridge stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use congreso_api::{TransportConfig, endpoints};
    use congreso_core::FetchPolicy;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn forwards_resolved_resources() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/talleres"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": [{ "id": 1, "title": "Vacunas" }] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let service = ContentService::connect(
            server.uri().parse().unwrap(),
            &TransportConfig::default(),
            FetchPolicy::default(),
        )
        .unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(service, tx, cancel.clone()));

        let resolved = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match rx.recv().await {
                    Some(Action::ResourceUpdated(r))
                        if r.key == endpoints::WORKSHOPS && r.data.is_some() =>
                    {
                        return r;
                    }
                    Some(_) => {}
                    None => panic!("bridge closed the channel"),
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(resolved.data.unwrap()["data"][0]["title"], "Vacunas");

        cancel.cancel();
        bridge.await.unwrap();
    }

    #[tokio::test]
    async fn stops_when_receiver_is_gone() {
        let service = ContentService::connect(
            "http://127.0.0.1:9".parse().unwrap(),
            &TransportConfig::default(),
            FetchPolicy::section(),
        )
        .unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        tokio::time::timeout(
            Duration::from_secs(5),
            spawn_data_bridge(service, tx, CancellationToken::new()),
        )
        .await
        .unwrap();
    }
}
