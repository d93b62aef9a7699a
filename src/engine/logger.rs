//! Leveled logger shared by the controller and the engine
//!
//! Records at or above the configured level are mirrored to the `log` facade
//! and forwarded over a channel so the widget can print them into its log pane.
//! Loggers handed to an execution tag their records with its id, so output of
//! a replaced execution can be told apart from the current one.

use std::sync::mpsc::{Receiver, Sender, channel};

use log::{Level, LevelFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    /// Execution that produced the record; `None` for the widget itself
    pub execution: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct QueryLogger {
    level: LevelFilter,
    tx: Sender<LogRecord>,
    execution: Option<u64>,
}

impl QueryLogger {
    /// Create a logger together with the receiving end of its records
    pub fn channel(level: LevelFilter) -> (Self, Receiver<LogRecord>) {
        let (tx, rx) = channel();
        (
            Self {
                level,
                tx,
                execution: None,
            },
            rx,
        )
    }

    /// A logger on the same channel whose records belong to execution `id`
    pub fn for_execution(&self, id: u64) -> Self {
        Self {
            execution: Some(id),
            ..self.clone()
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn set_level(&mut self, level: LevelFilter) {
        self.level = level;
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        if level > self.level {
            return;
        }
        let message = message.into();
        log::log!(level, "{}", message);
        // The widget may already be gone; nothing else to do then
        let _ = self.tx.send(LogRecord {
            level,
            message,
            execution: self.execution,
        });
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }
}
