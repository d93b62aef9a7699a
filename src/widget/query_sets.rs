//! Query set selection for the current start fragment

use super::controller::{QueryController, WidgetEvent};
use super::options::OptionValue;
use crate::engine::QueryEngine;

pub const DEFAULT_QUERY_SET: &str = "default";

impl<E: QueryEngine> QueryController<E> {
    /// Switch to the query set the collection assigns to `start_fragment_url`
    ///
    /// The first collection entry with this URL and an existing query set
    /// wins; otherwise the `default` set is used. Loading the set that is
    /// already active does nothing.
    pub fn load_query_set(&mut self, start_fragment_url: &str) {
        let Some(collection) = self.options.loaded_collection() else {
            return;
        };
        let Some(query_sets) = collection.query_sets.as_ref() else {
            return;
        };

        let key = collection
            .start_fragments
            .iter()
            .filter(|fragment| fragment.url == start_fragment_url)
            .find_map(|fragment| {
                fragment
                    .query_set
                    .as_ref()
                    .filter(|key| query_sets.contains_key(*key))
            })
            .map_or(DEFAULT_QUERY_SET, String::as_str)
            .to_string();

        if self.query_set.as_deref() == Some(key.as_str()) {
            return;
        }
        let queries = query_sets.get(&key).cloned().unwrap_or_default();

        log::debug!("Switching to query set {}", key);
        self.query_set = Some(key.clone());
        self.set_option(OptionValue::Queries(queries), false);
        self.events.push(WidgetEvent::QuerySetChanged(key));
    }
}

#[cfg(test)]
#[path = "query_sets_tests.rs"]
mod query_sets_tests;
