//! Push-based results iterator
//!
//! The producing side (usually a worker thread) sends [`IteratorEvent`]s over a
//! `std::sync::mpsc` channel. The consuming side holds a [`ResultsIterator`] and
//! drains it from the UI loop. Detaching drops the receiver, so events that
//! arrive afterwards are never observed.

use std::fmt;
use std::sync::mpsc::{Receiver, TryRecvError};

use oxrdf::vocab::xsd;
use oxrdf::{Term, Triple};
use tokio_util::sync::CancellationToken;

use super::EngineError;

/// Declared form of a SPARQL query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Construct,
    Describe,
    Ask,
    Other(String),
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Select => write!(f, "SELECT"),
            QueryType::Construct => write!(f, "CONSTRUCT"),
            QueryType::Describe => write!(f, "DESCRIBE"),
            QueryType::Ask => write!(f, "ASK"),
            QueryType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// One SELECT row: variable name (with leading `?`) to optional bound value
pub type Solution = Vec<(String, Option<Term>)>;

/// A single item produced by a results iterator
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Bindings(Solution),
    Triple(Triple),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IteratorEvent {
    Data(QueryResult),
    End,
    Error(EngineError),
}

pub struct ResultsIterator {
    query_type: QueryType,
    events: Option<Receiver<IteratorEvent>>,
    cancel_token: CancellationToken,
}

impl ResultsIterator {
    pub fn new(
        query_type: QueryType,
        events: Receiver<IteratorEvent>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            query_type,
            events: Some(events),
            cancel_token,
        }
    }

    pub fn query_type(&self) -> &QueryType {
        &self.query_type
    }

    /// Next pending event, or `None` if nothing is queued or the iterator is detached
    ///
    /// A producer that goes away without sending `End` or `Error` is reported
    /// as an error once, after which the iterator is detached.
    pub fn try_next_event(&mut self) -> Option<IteratorEvent> {
        let rx = self.events.as_ref()?;
        match rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.detach();
                Some(IteratorEvent::Error(EngineError::Other(
                    "Results iterator disconnected unexpectedly".to_string(),
                )))
            }
        }
    }

    /// Remove all listeners and ask the producer to stop
    pub fn detach(&mut self) {
        self.events = None;
        self.cancel_token.cancel();
    }

    pub fn is_detached(&self) -> bool {
        self.events.is_none()
    }
}

/// Formats a term the way result rows show it: IRIs bare, literals quoted
pub fn format_term(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => format!("_:{}", node.as_str()),
        Term::Literal(literal) => {
            if let Some(language) = literal.language() {
                format!("\"{}\"@{}", literal.value(), language)
            } else if literal.datatype() == xsd::STRING {
                format!("\"{}\"", literal.value())
            } else {
                format!("\"{}\"^^{}", literal.value(), literal.datatype().as_str())
            }
        }
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "iterator_tests.rs"]
mod iterator_tests;
