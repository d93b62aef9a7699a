//! Triple Pattern Fragments query engine
//!
//! Parses the query with `spargebra`, plans it into a list of triple patterns
//! and evaluates it on a background thread with a single-threaded tokio
//! runtime. Results flow back to the UI thread over a channel.

mod client;
mod evaluator;
mod fragment;
mod plan;

pub use client::HttpFragmentsClient;
pub use fragment::FragmentPattern;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};

use tokio_util::sync::CancellationToken;

use plan::QueryPlan;

use super::{
    AbortAll, AbortRegistry, EngineContext, EngineError, IteratorEvent, QueryEngine,
    ResultsIterator,
};
use crate::config::HttpConfig;

#[derive(Debug, Clone, Default)]
pub struct LdfEngine {
    http: HttpConfig,
    abort: AbortRegistry,
}

impl LdfEngine {
    pub fn new(http: HttpConfig) -> Self {
        Self {
            http,
            abort: AbortRegistry::new(),
        }
    }

    /// Capability that aborts every request made by this engine's clients
    pub fn abort_handle(&self) -> Arc<dyn AbortAll> {
        Arc::new(self.abort.clone())
    }
}

impl QueryEngine for LdfEngine {
    type Client = HttpFragmentsClient;

    fn fragments_client(
        &self,
        start_fragments: Vec<String>,
        context: &EngineContext,
    ) -> HttpFragmentsClient {
        HttpFragmentsClient::new(
            start_fragments,
            &self.http,
            self.abort.clone(),
            context.logger.clone(),
        )
    }

    fn sparql_iterator(
        &self,
        query: &str,
        client: HttpFragmentsClient,
        context: &EngineContext,
    ) -> Result<ResultsIterator, EngineError> {
        let parsed = plan::parse_query(query, &context.prefixes)?;
        let plan = plan::plan_query(&parsed)?;
        let query_type = plan.query_type();

        let (tx, rx) = channel();
        let cancel_token = CancellationToken::new();
        spawn_evaluation(plan, client, tx, cancel_token.clone());

        Ok(ResultsIterator::new(query_type, rx, cancel_token))
    }
}

/// Evaluate `plan` on a dedicated thread, reporting through `events`
///
/// The thread ends with exactly one `End` or `Error` event unless the
/// iterator was detached, in which case nobody is listening anyway.
fn spawn_evaluation(
    plan: QueryPlan,
    client: HttpFragmentsClient,
    events: Sender<IteratorEvent>,
    cancel_token: CancellationToken,
) {
    std::thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| EngineError::Other(format!("Failed to start runtime: {}", e)))?;
            runtime.block_on(evaluator::evaluate(&plan, &client, &events, &cancel_token))
        }));

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                log::error!("Query evaluation panicked: {}", message);
                Err(EngineError::Other(format!("Query engine crashed: {}", message)))
            }
        };

        match outcome {
            Ok(()) => {
                let _ = events.send(IteratorEvent::End);
            }
            Err(EngineError::Cancelled) => {
                log::debug!("Query evaluation cancelled");
            }
            Err(e) => {
                log::debug!("Query evaluation failed: {}", e);
                let _ = events.send(IteratorEvent::Error(e));
            }
        }
    });
}
