//! Shared test utilities for ldfq
//!
//! This module provides a scripted query engine and helpers used across
//! multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{Sender, channel};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio_util::sync::CancellationToken;

    use crate::engine::{
        AbortAll, EngineContext, EngineError, IteratorEvent, QueryEngine, QueryLogger,
        QueryType, ResultsIterator,
    };
    use crate::app::App;
    use crate::config::Config;
    use crate::widget::{QueryController, WidgetOptions, WidgetSettings};

    /// Producer side of a scripted results iterator
    pub struct FakeRun {
        pub events: Sender<IteratorEvent>,
        pub cancel_token: CancellationToken,
    }

    /// What the controller asked the engine for
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FakeCall {
        pub start_fragments: Vec<String>,
        pub query: String,
    }

    enum Prepared {
        Run(ResultsIterator),
        Failure(EngineError),
    }

    /// Engine that hands out iterators prepared by the test
    #[derive(Default)]
    pub struct FakeEngine {
        prepared: RefCell<VecDeque<Prepared>>,
        calls: RefCell<Vec<FakeCall>>,
        loggers: RefCell<Vec<QueryLogger>>,
    }

    impl FakeEngine {
        /// Queue an iterator of the given type and return its producer side
        pub fn prepare(&self, query_type: QueryType) -> FakeRun {
            let (tx, rx) = channel();
            let cancel_token = CancellationToken::new();
            let iterator = ResultsIterator::new(query_type, rx, cancel_token.clone());
            self.prepared.borrow_mut().push_back(Prepared::Run(iterator));
            FakeRun {
                events: tx,
                cancel_token,
            }
        }

        /// Queue a synchronous construction failure
        pub fn prepare_failure(&self, error: EngineError) {
            self.prepared
                .borrow_mut()
                .push_back(Prepared::Failure(error));
        }

        pub fn calls(&self) -> Vec<FakeCall> {
            self.calls.borrow().clone()
        }

        /// The logger the controller handed to the `n`th iterator
        pub fn context_logger(&self, n: usize) -> QueryLogger {
            self.loggers.borrow()[n].clone()
        }
    }

    impl QueryEngine for FakeEngine {
        type Client = Vec<String>;

        fn fragments_client(
            &self,
            start_fragments: Vec<String>,
            _context: &EngineContext,
        ) -> Vec<String> {
            start_fragments
        }

        fn sparql_iterator(
            &self,
            query: &str,
            client: Vec<String>,
            context: &EngineContext,
        ) -> Result<ResultsIterator, EngineError> {
            self.loggers.borrow_mut().push(context.logger.clone());
            self.calls.borrow_mut().push(FakeCall {
                start_fragments: client,
                query: query.to_string(),
            });
            match self.prepared.borrow_mut().pop_front() {
                Some(Prepared::Run(iterator)) => Ok(iterator),
                Some(Prepared::Failure(error)) => Err(error),
                None => Err(EngineError::Other("no iterator prepared".to_string())),
            }
        }
    }

    /// Counts `abort_all` calls
    #[derive(Debug, Default)]
    pub struct FakeAbort {
        calls: AtomicUsize,
    }

    impl FakeAbort {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AbortAll for FakeAbort {
        fn abort_all(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Controller over a fake engine, without an abort hook
    pub fn test_controller(options: WidgetOptions) -> QueryController<FakeEngine> {
        QueryController::new(
            FakeEngine::default(),
            options,
            None,
            WidgetSettings::default(),
        )
    }

    /// Controller over a fake engine with a counting abort hook
    pub fn test_controller_with_abort(
        options: WidgetOptions,
    ) -> (QueryController<FakeEngine>, Arc<FakeAbort>) {
        let abort = Arc::new(FakeAbort::default());
        let controller = QueryController::new(
            FakeEngine::default(),
            options,
            Some(abort.clone() as Arc<dyn AbortAll>),
            WidgetSettings::default(),
        );
        (controller, abort)
    }

    /// App over a fake engine with default config
    pub fn test_app(options: WidgetOptions) -> App<FakeEngine> {
        App::new(test_controller(options), &Config::default())
    }

    /// Helper to create a KeyEvent without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Helper to create a KeyEvent with specific modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }
}
