//! Query widget controller
//!
//! Holds the widget options and reacts to changes by cascading dependent
//! updates: a new start fragment list selects its first entry, a selected
//! start fragment loads its query set, a new query list loads its first query
//! unless the user edited the query text. Executions stream their results
//! into the results pane; progress goes to the log pane.

mod controller;
mod execution;
pub mod markup;
mod options;
mod pane;
mod query_sets;
mod selection;
mod setter;

pub use controller::{QueryController, WidgetEvent, WidgetSettings};
pub use execution::{NO_RESULTS, parse_start_fragments};
pub use options::{
    CollectionFragment, OptionKey, OptionValue, QueryCollection, QueryCollectionSource,
    QueryRecord, StartFragment, WidgetOptions,
};
pub use pane::TextPane;
pub use query_sets::DEFAULT_QUERY_SET;
pub use selection::{ComboOption, Selection};
