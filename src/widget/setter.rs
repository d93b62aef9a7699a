//! Option setter with cascading updates

use super::controller::QueryController;
use super::options::{OptionValue, QueryCollectionSource, StartFragment};
use crate::collection::CollectionLoader;
use crate::engine::QueryEngine;

impl<E: QueryEngine> QueryController<E> {
    /// Store an option and apply what depends on it
    ///
    /// Outside initialization, setting an option to the value it already holds
    /// does nothing at all.
    pub fn set_option(&mut self, value: OptionValue, initializing: bool) {
        if !initializing && self.options.holds(&value) {
            return;
        }
        log::debug!("Setting option {:?}", value.key());
        self.options.store(value.clone());

        match value {
            OptionValue::StartFragment(url) => {
                // The picker's change notification re-enters with an equal value
                self.fragments.set_value(&url);
                self.load_query_set(&url);
            }
            OptionValue::StartFragments(list) => {
                let first = list.first().map(|fragment| fragment.url.clone());
                self.fragments.set_options(list);
                if let Some(url) = first {
                    self.set_option(OptionValue::StartFragment(url), false);
                }
            }
            OptionValue::Query(query) => {
                self.queries.set_value(&query);
                self.load_picked_query();
            }
            OptionValue::Queries(list) => {
                let first = list.first().map(|query| query.sparql.clone());
                self.queries.set_options(list);
                // Never clobber a manual edit
                if !self.query_edited
                    && let Some(sparql) = first
                {
                    self.set_option(OptionValue::Query(sparql), false);
                }
            }
            OptionValue::QueryCollection(QueryCollectionSource::Location(location)) => {
                log::debug!("Fetching query collection {}", location);
                self.collection_loader = Some(CollectionLoader::spawn_fetch(
                    location,
                    self.settings.fetch_timeout,
                ));
            }
            OptionValue::QueryCollection(QueryCollectionSource::Loaded(collection)) => {
                let start_fragments = collection
                    .start_fragments
                    .iter()
                    .map(StartFragment::from)
                    .collect();
                self.set_option(OptionValue::StartFragments(start_fragments), false);
                // Unchanged start fragments do not cascade into a query set load
                if let Some(url) = self.options.start_fragment.clone() {
                    self.load_query_set(&url);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "setter_tests.rs"]
mod setter_tests;
