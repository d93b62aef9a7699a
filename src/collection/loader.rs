//! Query collection loader
//!
//! Fetches a query collection on a background thread so the UI keeps running.
//! `http(s)` locations are downloaded with reqwest on a single-threaded tokio
//! runtime; anything else is read as a local file.

use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::time::Duration;

use bytes::BytesMut;
use futures::StreamExt;
use reqwest::header::ACCEPT;

use crate::error::LdfqError;
use crate::widget::QueryCollection;

/// Collections larger than this are rejected
pub const MAX_COLLECTION_BYTES: usize = 8 * 1024 * 1024;

pub struct CollectionLoader {
    location: String,
    rx: Option<Receiver<Result<QueryCollection, LdfqError>>>,
}

impl CollectionLoader {
    /// Start fetching the collection at `location`
    pub fn spawn_fetch(location: String, timeout: Duration) -> Self {
        let (tx, rx) = channel();

        let target = location.clone();
        std::thread::spawn(move || {
            let result = if is_remote(&target) {
                fetch_remote(&target, timeout)
            } else {
                read_local(Path::new(&target))
            };
            let _ = tx.send(result);
        });

        Self {
            location,
            rx: Some(rx),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Poll for completion without blocking
    pub fn poll(&mut self) -> Option<Result<QueryCollection, LdfqError>> {
        let rx = self.rx.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LdfqError::Io(
                "Collection loader thread disconnected".to_string(),
            )),
        };

        self.rx = None;
        Some(result)
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn read_local(path: &Path) -> Result<QueryCollection, LdfqError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(QueryCollection::from_json(&contents)?)
}

fn fetch_remote(url: &str, timeout: Duration) -> Result<QueryCollection, LdfqError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let body = runtime.block_on(download(url, timeout))?;
    Ok(serde_json::from_slice(&body)?)
}

async fn download(url: &str, timeout: Duration) -> Result<BytesMut, LdfqError> {
    let fetch_error = |message: String| LdfqError::Fetch {
        url: url.to_string(),
        message,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;
    let response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP {}", response.status().as_u16())));
    }

    let mut body = BytesMut::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| fetch_error(e.to_string()))?;
        if body.len() + chunk.len() > MAX_COLLECTION_BYTES {
            return Err(fetch_error(format!(
                "collection exceeds {} bytes",
                MAX_COLLECTION_BYTES
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;
