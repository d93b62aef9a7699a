//! Query engine collaborators
//!
//! The widget controller never talks to the network or parses SPARQL itself.
//! It reaches the outside world through the types in this module:
//!
//! - [`QueryEngine`] builds a fragments client and a [`ResultsIterator`]
//! - [`ResultsIterator`] pushes [`IteratorEvent`]s over a channel
//! - [`AbortAll`] is the optional "abort every in-flight request" capability
//! - [`QueryLogger`] forwards leveled records into the log pane
//! - [`TripleWriter`] streams triples out as Turtle chunks
//!
//! [`LdfEngine`] is the Triple Pattern Fragments implementation used by the binary.

mod abort;
mod iterator;
pub mod ldf;
mod logger;
mod turtle;

pub use abort::{AbortAll, AbortRegistry};
pub use iterator::{
    IteratorEvent, QueryResult, QueryType, ResultsIterator, Solution, format_term,
};
pub use ldf::LdfEngine;
pub use logger::{LogRecord, QueryLogger};
pub use turtle::TripleWriter;

use std::collections::BTreeMap;

use thiserror::Error;

/// Shared settings handed to both the fragments client and the iterator
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub prefixes: BTreeMap<String, String>,
    pub logger: QueryLogger,
}

/// Builds fragments clients and query iterators
///
/// Construction of the iterator may fail synchronously (for instance on a
/// malformed query); everything after that is reported through the
/// iterator's event channel.
pub trait QueryEngine {
    type Client;

    fn fragments_client(&self, start_fragments: Vec<String>, context: &EngineContext)
    -> Self::Client;

    fn sparql_iterator(
        &self,
        query: &str,
        client: Self::Client,
        context: &EngineContext,
    ) -> Result<ResultsIterator, EngineError>;
}

/// Errors raised while building or running a query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{0}")]
    Syntax(String),

    #[error("Unsupported SPARQL feature: {0}")]
    Unsupported(String),

    #[error("No valid start fragment given")]
    NoStartFragments,

    #[error("Could not retrieve {url}: {message}")]
    Http { url: String, message: String },

    #[error("Could not parse fragment {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Query execution cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}
