use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use log::LevelFilter;

use super::execution::Execution;
use super::options::{QueryRecord, StartFragment, WidgetOptions};
use super::pane::TextPane;
use super::selection::Selection;
use crate::collection::CollectionLoader;
use crate::engine::{AbortAll, LogRecord, QueryEngine, QueryLogger};

/// Notifications for whoever hosts the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The active query set changed to the given key
    QuerySetChanged(String),
    /// A query collection could not be fetched or parsed
    CollectionLoadFailed(String),
    /// A new execution cleared the panes
    ExecutionStarted,
}

/// Settings fixed for the lifetime of a controller
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub prefixes: BTreeMap<String, String>,
    pub fetch_timeout: Duration,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            prefixes: crate::config::default_prefixes(),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// The query widget: options, pickers, editor text, panes and one execution
pub struct QueryController<E: QueryEngine> {
    pub(super) engine: E,
    pub(super) abort_hook: Option<Arc<dyn AbortAll>>,
    pub(super) settings: WidgetSettings,
    pub(super) options: WidgetOptions,
    pub(super) fragments: Selection<StartFragment>,
    pub(super) queries: Selection<QueryRecord>,
    pub(super) query_text: String,
    pub(super) query_edited: bool,
    /// Bumped whenever the query text changes programmatically
    pub(super) query_revision: u64,
    pub(super) query_set: Option<String>,
    pub(super) collection_loader: Option<CollectionLoader>,
    pub(super) results: TextPane,
    pub(super) log: TextPane,
    pub(super) execution: Option<Execution>,
    pub(super) logger: QueryLogger,
    /// Id of the latest execution; its engine logger tags records with it
    pub(super) execution_id: u64,
    log_rx: Receiver<LogRecord>,
    pub(super) events: Vec<WidgetEvent>,
}

impl<E: QueryEngine> QueryController<E> {
    /// Create the widget and apply every option as if initializing
    pub fn new(
        engine: E,
        options: WidgetOptions,
        abort_hook: Option<Arc<dyn AbortAll>>,
        settings: WidgetSettings,
    ) -> Self {
        let (logger, log_rx) = QueryLogger::channel(LevelFilter::Info);

        let mut controller = Self {
            engine,
            abort_hook,
            settings,
            options: WidgetOptions::default(),
            fragments: Selection::new(false),
            queries: Selection::new(true),
            query_text: String::new(),
            query_edited: false,
            query_revision: 0,
            query_set: None,
            collection_loader: None,
            results: TextPane::new(),
            log: TextPane::new(),
            execution: None,
            logger,
            execution_id: 0,
            log_rx,
            events: Vec::new(),
        };

        for value in options.into_values() {
            controller.set_option(value, true);
        }
        controller
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn fragment_picker(&self) -> &Selection<StartFragment> {
        &self.fragments
    }

    pub fn fragment_picker_mut(&mut self) -> &mut Selection<StartFragment> {
        &mut self.fragments
    }

    pub fn query_picker(&self) -> &Selection<QueryRecord> {
        &self.queries
    }

    pub fn query_picker_mut(&mut self) -> &mut Selection<QueryRecord> {
        &mut self.queries
    }

    /// Text the next execution runs
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn query_revision(&self) -> u64 {
        self.query_revision
    }

    pub fn is_query_edited(&self) -> bool {
        self.query_edited
    }

    pub fn active_query_set(&self) -> Option<&str> {
        self.query_set.as_deref()
    }

    pub fn results(&self) -> &TextPane {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut TextPane {
        &mut self.results
    }

    pub fn log(&self) -> &TextPane {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut TextPane {
        &mut self.log
    }

    pub fn logger(&self) -> &QueryLogger {
        &self.logger
    }

    pub fn is_running(&self) -> bool {
        self.execution.is_some()
    }

    pub fn is_loading_collection(&self) -> bool {
        self.collection_loader.is_some()
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }

    /// A start fragment was picked or typed into the fragment field
    pub fn select_start_fragment(&mut self, url: &str) {
        self.set_option(super::OptionValue::StartFragment(url.to_string()), false);
    }

    /// A query was picked from the query picker
    pub fn select_query(&mut self, sparql: &str) {
        self.queries.set_value(sparql);
        self.load_picked_query();
    }

    /// The query picker's change handling: load its value into the editor
    pub(super) fn load_picked_query(&mut self) {
        let picked = self.queries.value();
        if picked.is_empty() {
            return;
        }
        self.query_text = picked.to_string();
        self.options.query = Some(self.query_text.clone());
        self.query_edited = false;
        self.query_revision += 1;
    }

    /// The user changed the query text
    pub fn edit_query(&mut self, text: &str) {
        if self.query_text == text {
            return;
        }
        self.query_text = text.to_string();
        self.options.query = Some(self.query_text.clone());
        self.query_edited = true;
    }

    /// Process everything that arrived since the last call
    ///
    /// Returns `true` if anything visible changed.
    pub fn poll(&mut self) -> bool {
        let collection = self.poll_collection();
        let logs = self.poll_logs();
        let execution = self.poll_execution();
        collection || logs || execution
    }

    fn poll_logs(&mut self) -> bool {
        let mut changed = false;
        while let Ok(record) = self.log_rx.try_recv() {
            if record.execution.is_some_and(|id| id != self.execution_id) {
                continue;
            }
            self.log.append_text([format!("{}\n", record.message.trim())]);
            changed = true;
        }
        changed
    }

    /// Drop records queued before the log pane was reset
    pub(super) fn discard_pending_logs(&mut self) {
        let discarded = self.log_rx.try_iter().count();
        if discarded > 0 {
            log::debug!("Discarded {} stale log records", discarded);
        }
    }

    fn poll_collection(&mut self) -> bool {
        let Some(loader) = self.collection_loader.as_mut() else {
            return false;
        };
        let Some(result) = loader.poll() else {
            return false;
        };
        let location = loader.location().to_string();
        self.collection_loader = None;

        match result {
            Ok(collection) => {
                log::debug!("Query collection {} loaded", location);
                self.set_option(
                    super::OptionValue::QueryCollection(super::QueryCollectionSource::Loaded(
                        collection,
                    )),
                    false,
                );
            }
            Err(e) => {
                let message = format!("Could not load query collection {}: {}", location, e);
                log::error!("{}", message);
                self.log.append_text([message.as_str(), "\n"]);
                self.events.push(WidgetEvent::CollectionLoadFailed(message));
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
