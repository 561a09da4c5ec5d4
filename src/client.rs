//! HTTP client for the remote catalog service
//!
//! Wraps outbound calls with a per-request timeout and routes every request
//! through the shared retry policy. Responses are classified at the HTTP
//! boundary: 5xx is transient, 4xx is permanent. A body that does not parse
//! as the agreed schema is a contract violation.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::retry::fetch_with_retry;
use crate::types::{CatalogEntry, ListResponse, RawDetail};
use serde::de::DeserializeOwned;
use url::Url;

/// Client for the remote catalog service
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    retry: crate::config::RetryConfig,
}

impl CatalogClient {
    /// Build a client from an explicit configuration.
    ///
    /// Fails with [`Error::Config`] when the base URL does not parse or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL {:?}: {e}", config.base_url),
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            retry: config.retry,
        })
    }

    /// Fetch the catalog window, truncated to the first `limit` entries.
    ///
    /// The upstream list endpoint returns its full catalog in one response;
    /// this pipeline only keeps a bounded window of it.
    pub async fn fetch_list(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
        if limit == 0 {
            return Err(Error::Config {
                message: "list limit must be at least 1".to_string(),
            });
        }

        let url = self.endpoint("monsters")?;
        let response: ListResponse = self.get_json(url).await?;

        let mut entries = response.results;
        tracing::info!(
            upstream_total = response.count,
            fetched = entries.len(),
            limit = limit,
            "fetched catalog list"
        );
        entries.truncate(limit);
        Ok(entries)
    }

    /// Fetch the raw detail record behind a catalog entry's reference URI
    pub async fn fetch_detail(&self, reference: &str) -> Result<RawDetail> {
        let url = self.resolve_reference(reference)?;
        self.get_json(url).await
    }

    /// Join a path segment onto the base URL
    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| Error::Config {
            message: format!("invalid endpoint URL {joined:?}: {e}"),
        })
    }

    /// Resolve a reference URI from the list endpoint.
    ///
    /// Absolute references are used verbatim; relative ones (the service
    /// emits paths like `/api/2014/monsters/goblin`) resolve against the
    /// service origin.
    fn resolve_reference(&self, reference: &str) -> Result<Url> {
        match Url::parse(reference) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base_url.join(reference).map_err(|e| Error::Permanent {
                    message: format!("malformed reference URI {reference:?}: {e}"),
                })
            }
            Err(e) => Err(Error::Permanent {
                message: format!("malformed reference URI {reference:?}: {e}"),
            }),
        }
    }

    /// GET a URL and parse the JSON body, with retries for transient failures
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        fetch_with_retry(&self.retry, || {
            let http = self.http.clone();
            let url = url.clone();
            async move {
                tracing::debug!(url = %url, "sending request");
                let response = http.get(url.clone()).send().await?;
                let status = response.status();

                if status.is_server_error() {
                    return Err(Error::Transient {
                        message: format!("HTTP {status} from {url}"),
                    });
                }
                if status.is_client_error() {
                    return Err(Error::Permanent {
                        message: format!("HTTP {status} from {url}"),
                    });
                }

                response.json::<T>().await.map_err(|e| {
                    if e.is_timeout() {
                        Error::Transient {
                            message: format!("timed out reading body from {url}: {e}"),
                        }
                    } else {
                        Error::SchemaValidation(format!("invalid response body from {url}: {e}"))
                    }
                })
            }
        })
        .await
    }
}
