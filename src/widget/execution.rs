//! Query execution lifecycle
//!
//! At most one execution is active. Starting a new one detaches the previous
//! iterator, and every way an execution ends (completion, iterator error,
//! construction failure, user stop) goes through `stop_execution`.

use super::controller::{QueryController, WidgetEvent};
use super::pane::TextPane;
use crate::engine::{
    EngineContext, EngineError, IteratorEvent, QueryEngine, QueryResult, QueryType,
    ResultsIterator, TripleWriter, format_term,
};

pub const NO_RESULTS: &str = "(This query has no results.)";

/// Upper bound on events handled per poll, so a fast producer cannot starve the UI
const MAX_EVENTS_PER_POLL: usize = 512;

/// Separators accepted between start fragment URLs
fn is_fragment_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',' | ';')
}

/// The `http(s)` URLs in the fragment field
pub fn parse_start_fragments(field: &str) -> Vec<String> {
    field
        .split(is_fragment_separator)
        .filter(|token| token.starts_with("http://") || token.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// Writes one kind of result into the results pane
pub(super) enum ResultRenderer {
    Select { count: usize },
    Graph(TripleWriter),
    Ask,
    Unsupported,
}

impl ResultRenderer {
    fn for_query_type(query_type: &QueryType, writer: impl FnOnce() -> TripleWriter) -> Self {
        match query_type {
            QueryType::Select => ResultRenderer::Select { count: 0 },
            QueryType::Construct | QueryType::Describe => ResultRenderer::Graph(writer()),
            QueryType::Ask => ResultRenderer::Ask,
            QueryType::Other(_) => ResultRenderer::Unsupported,
        }
    }

    fn on_data(&mut self, result: QueryResult, results: &mut TextPane) {
        match (self, result) {
            (ResultRenderer::Select { count }, QueryResult::Bindings(row)) => {
                *count += 1;
                let lines: Vec<String> = row
                    .iter()
                    .filter_map(|(name, value)| {
                        value
                            .as_ref()
                            .map(|term| format!("{}: {}", name, format_term(term)))
                    })
                    .collect();
                results.append_text([lines.join("\n"), "\n\n".to_string()]);
            }
            (ResultRenderer::Graph(writer), QueryResult::Triple(triple)) => {
                if let Err(e) = writer.add_triple(&triple) {
                    log::error!("Could not serialize triple: {}", e);
                }
                if let Some(chunk) = writer.take_chunk() {
                    results.append_text([chunk]);
                }
            }
            (ResultRenderer::Ask, QueryResult::Boolean(exists)) => {
                results.append_text([exists]);
            }
            (ResultRenderer::Unsupported, _) => {}
            (_, result) => log::debug!("Ignoring result of unexpected shape: {:?}", result),
        }
    }

    fn on_end(&mut self, results: &mut TextPane) {
        match self {
            ResultRenderer::Select { count: 0 } => results.append_text([NO_RESULTS]),
            ResultRenderer::Graph(writer) => match writer.end() {
                Ok(Some(chunk)) => results.append_text([chunk]),
                Ok(None) => {}
                Err(e) => log::error!("Could not finish Turtle output: {}", e),
            },
            _ => {}
        }
    }
}

/// The active results iterator and how its output is rendered
pub(super) struct Execution {
    iterator: ResultsIterator,
    renderer: ResultRenderer,
}

impl<E: QueryEngine> QueryController<E> {
    /// Start executing the current query against the fragment field's URLs
    pub fn execute(&mut self) {
        if let Some(mut previous) = self.execution.take() {
            log::debug!("Replacing active execution");
            previous.iterator.detach();
        }
        self.execution_id += 1;
        self.discard_pending_logs();
        self.log.clear();
        self.results.clear();
        self.events.push(WidgetEvent::ExecutionStarted);

        let start_fragments = parse_start_fragments(self.fragments.value());
        let context = EngineContext {
            prefixes: self.settings.prefixes.clone(),
            logger: self.logger.for_execution(self.execution_id),
        };
        let client = self.engine.fragments_client(start_fragments, &context);

        let iterator = match self
            .engine
            .sparql_iterator(&self.query_text, client, &context)
        {
            Ok(iterator) => iterator,
            Err(e) => return self.stop_execution(Some(e)),
        };

        let query_type = iterator.query_type().clone();
        log::debug!("Executing {} query", query_type);
        let renderer = ResultRenderer::for_query_type(&query_type, || {
            TripleWriter::new(&self.settings.prefixes)
        });
        if let QueryType::Other(_) = query_type {
            self.log
                .append_text([format!("Unsupported query type: {}", query_type)]);
        }

        self.execution = Some(Execution { iterator, renderer });
    }

    /// End the active execution, showing `error` in place of the results
    ///
    /// Safe to call when nothing is running.
    pub fn stop_execution(&mut self, error: Option<EngineError>) {
        if let Some(mut execution) = self.execution.take() {
            execution.iterator.detach();
        }
        if let Some(abort) = &self.abort_hook {
            abort.abort_all();
        }
        if let Some(error) = error {
            let message = error.to_string();
            if !message.is_empty() {
                self.results.set_text(message);
            }
        }
    }

    /// Render the events the active iterator produced, in order
    pub(super) fn poll_execution(&mut self) -> bool {
        let mut handled = 0;
        while handled < MAX_EVENTS_PER_POLL {
            let Some(execution) = self.execution.as_mut() else {
                break;
            };
            let Some(event) = execution.iterator.try_next_event() else {
                break;
            };
            handled += 1;

            match event {
                IteratorEvent::Data(result) => {
                    execution.renderer.on_data(result, &mut self.results);
                }
                IteratorEvent::End => {
                    execution.renderer.on_end(&mut self.results);
                    self.stop_execution(None);
                }
                IteratorEvent::Error(e) => self.stop_execution(Some(e)),
            }
        }
        handled > 0
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod execution_tests;
