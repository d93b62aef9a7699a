//! HTTP fragments client
//!
//! Retrieves every page of a triple pattern fragment from each start fragment.
//! Requests race against two cancellation sources: the iterator's own token
//! and the shared abort registry.

use std::sync::Arc;
use std::time::Duration;

use oxrdf::Triple;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tokio_util::sync::CancellationToken;

use super::fragment::{FragmentPage, FragmentPattern, parse_page};
use crate::config::HttpConfig;
use crate::engine::{AbortRegistry, EngineError, QueryLogger};

const FRAGMENT_ACCEPT: &str = "application/trig;q=1.0,text/turtle;q=0.5";

#[derive(Debug)]
struct ClientInner {
    http: Client,
    start_fragments: Vec<String>,
    abort: AbortRegistry,
    logger: QueryLogger,
    page_limit: usize,
}

/// Cheap-to-clone handle; clones share the HTTP connection pool
#[derive(Debug, Clone)]
pub struct HttpFragmentsClient {
    inner: Arc<ClientInner>,
}

impl HttpFragmentsClient {
    pub fn new(
        start_fragments: Vec<String>,
        config: &HttpConfig,
        abort: AbortRegistry,
        logger: QueryLogger,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            inner: Arc::new(ClientInner {
                http,
                start_fragments,
                abort,
                logger,
                page_limit: config.page_limit,
            }),
        }
    }

    pub fn start_fragments(&self) -> &[String] {
        &self.inner.start_fragments
    }

    /// All triples of the fragment, across start fragments and pages
    pub async fn fetch_all(
        &self,
        pattern: &FragmentPattern,
        cancel_token: &CancellationToken,
    ) -> Result<Vec<Triple>, EngineError> {
        let mut triples = Vec::new();
        for start_fragment in &self.inner.start_fragments {
            let mut next = Some(pattern.url(start_fragment)?.to_string());
            let mut pages = 0;
            while let Some(url) = next.take() {
                if pages == self.inner.page_limit {
                    self.inner.logger.warning(format!(
                        "Stopped after {} pages of {}",
                        pages, start_fragment
                    ));
                    break;
                }
                let page = self.fetch_page(&url, cancel_token).await?;
                triples.extend(page.triples.into_iter().filter(|t| pattern.matches(t)));
                next = page.next_page;
                pages += 1;
            }
        }
        Ok(triples)
    }

    async fn fetch_page(
        &self,
        url: &str,
        cancel_token: &CancellationToken,
    ) -> Result<FragmentPage, EngineError> {
        let abort_token = self.inner.abort.register();

        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => Err(EngineError::Cancelled),
            _ = abort_token.cancelled() => {
                log::debug!("Request for {} aborted", url);
                Err(EngineError::Cancelled)
            }
            result = self.get(url) => result,
        }
    }

    async fn get(&self, url: &str) -> Result<FragmentPage, EngineError> {
        let http_error = |message: String| EngineError::Http {
            url: url.to_string(),
            message,
        };

        self.inner.logger.info(format!("GET {}", url));
        let response = self
            .inner
            .http
            .get(url)
            .header(ACCEPT, FRAGMENT_ACCEPT)
            .send()
            .await
            .map_err(|e| http_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(http_error(format!("HTTP {}", response.status().as_u16())));
        }

        // Relative links resolve against the final URL after redirects
        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| http_error(e.to_string()))?;

        parse_page(&final_url, &body)
    }
}
