//! Concurrent resolution of detail records
//!
//! Fans out one detail request per selected entry, bounded by a concurrency
//! limit. The batch is fail-fast: the first unrecovered error aborts the
//! whole resolution, dropping the requests still in flight. No partial
//! result ever escapes this module.

use crate::client::CatalogClient;
use crate::error::{Error, Result};
use crate::projector;
use crate::types::{CatalogEntry, DetailRecord};
use futures::stream::{self, StreamExt, TryStreamExt};

/// Resolve every selected entry into a validated [`DetailRecord`].
///
/// Output order matches `selected`, regardless of the completion order of
/// the concurrent requests. Each request is retried per the client's policy;
/// a response that fails schema validation is fatal immediately.
pub async fn resolve(
    client: &CatalogClient,
    selected: &[CatalogEntry],
    concurrency: usize,
) -> Result<Vec<DetailRecord>> {
    if selected.is_empty() {
        return Ok(Vec::new());
    }
    let concurrency = concurrency.max(1);

    // try_collect returns on the first error and drops the stream, which
    // cancels the in-flight requests of the batch.
    let mut indexed: Vec<(usize, DetailRecord)> = stream::iter(selected.iter().enumerate())
        .map(|(position, entry)| async move {
            tracing::info!(name = %entry.name, "resolving detail record");
            let raw = client.fetch_detail(&entry.url).await?;
            let record = projector::project(raw)?;
            Ok::<_, Error>((position, record))
        })
        .buffer_unordered(concurrency)
        .try_collect()
        .await?;

    indexed.sort_by_key(|(position, _)| *position);
    let resolved: Vec<DetailRecord> = indexed.into_iter().map(|(_, record)| record).collect();

    debug_assert_eq!(resolved.len(), selected.len());
    tracing::info!(resolved = resolved.len(), "detail resolution complete");
    Ok(resolved)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, RetryConfig};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> CatalogClient {
        CatalogClient::new(ClientConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
            retry: RetryConfig {
                max_attempts: 1,
                initial_delay: Duration::from_millis(10),
                max_delay: Duration::from_millis(50),
                backoff_multiplier: 2.0,
                jitter: false,
            },
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn entry(i: usize) -> CatalogEntry {
        CatalogEntry {
            index: format!("monster-{i}"),
            name: format!("Monster {i}"),
            url: format!("/monsters/monster-{i}"),
        }
    }

    fn detail_body(i: usize) -> serde_json::Value {
        serde_json::json!({
            "name": format!("Monster {i}"),
            "hit_points": 10 + i,
            "armor_class": 12,
            "actions": [{"name": "Slam", "desc": "Melee attack."}],
        })
    }

    async fn mount_detail(server: &MockServer, i: usize, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/monsters/monster-{i}")))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn resolves_in_selection_order_despite_completion_order() {
        let server = MockServer::start().await;

        // The first entry responds slowest, so completion order is inverted.
        for i in 0..3 {
            let delay = Duration::from_millis(200 - (i as u64) * 80);
            mount_detail(
                &server,
                i,
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .set_body_json(detail_body(i)),
            )
            .await;
        }

        let client = test_client(&server.uri());
        let selected: Vec<CatalogEntry> = (0..3).map(entry).collect();
        let resolved = resolve(&client, &selected, 3).await.unwrap();

        assert_eq!(resolved.len(), 3);
        for (i, record) in resolved.iter().enumerate() {
            assert_eq!(record.name, format!("Monster {i}"));
        }
    }

    #[tokio::test]
    async fn one_permanent_failure_aborts_the_whole_batch() {
        let server = MockServer::start().await;

        for i in 0..4 {
            mount_detail(
                &server,
                i,
                ResponseTemplate::new(200).set_body_json(detail_body(i)),
            )
            .await;
        }
        mount_detail(&server, 4, ResponseTemplate::new(404)).await;

        let client = test_client(&server.uri());
        let selected: Vec<CatalogEntry> = (0..5).map(entry).collect();
        let result = resolve(&client, &selected, 5).await;

        assert!(matches!(result, Err(Error::Permanent { .. })));
    }

    #[tokio::test]
    async fn schema_violation_in_one_detail_is_fatal() {
        let server = MockServer::start().await;

        mount_detail(
            &server,
            0,
            ResponseTemplate::new(200).set_body_json(detail_body(0)),
        )
        .await;
        // Missing hit_points and armor_class.
        mount_detail(
            &server,
            1,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Broken"})),
        )
        .await;

        let client = test_client(&server.uri());
        let selected: Vec<CatalogEntry> = (0..2).map(entry).collect();
        let result = resolve(&client, &selected, 2).await;

        assert!(matches!(result, Err(Error::SchemaValidation(_))));
    }

    #[tokio::test]
    async fn empty_selection_resolves_to_empty_result() {
        let client = test_client("http://127.0.0.1:9");
        let resolved = resolve(&client, &[], 5).await.unwrap();
        assert!(resolved.is_empty());
    }
}
