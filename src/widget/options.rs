//! Widget option types
//!
//! The set of options is closed: every option is a variant of [`OptionValue`]
//! and is applied through `QueryController::set_option`.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::selection::ComboOption;

/// A selectable Linked Data Fragments endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartFragment {
    pub url: String,
    #[serde(default)]
    pub name: String,
}

impl StartFragment {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

impl ComboOption for StartFragment {
    fn value(&self) -> &str {
        &self.url
    }

    fn label(&self) -> &str {
        if self.name.is_empty() { &self.url } else { &self.name }
    }
}

/// A predefined query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryRecord {
    pub sparql: String,
    #[serde(default)]
    pub name: String,
}

impl QueryRecord {
    pub fn new(sparql: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sparql: sparql.into(),
            name: name.into(),
        }
    }
}

impl ComboOption for QueryRecord {
    fn value(&self) -> &str {
        &self.sparql
    }

    fn label(&self) -> &str {
        if self.name.is_empty() { &self.sparql } else { &self.name }
    }
}

/// Start fragment entry of a query collection, pointing at its query set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFragment {
    pub url: String,
    #[serde(default)]
    pub name: String,
    pub query_set: Option<String>,
}

impl From<&CollectionFragment> for StartFragment {
    fn from(fragment: &CollectionFragment) -> Self {
        StartFragment::new(fragment.url.clone(), fragment.name.clone())
    }
}

/// Start fragments plus the query sets they refer to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCollection {
    #[serde(default)]
    pub start_fragments: Vec<CollectionFragment>,
    pub query_sets: Option<BTreeMap<String, Vec<QueryRecord>>>,
}

impl QueryCollection {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A query collection is either loaded or still to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCollectionSource {
    /// URL (or local path) to fetch asynchronously
    Location(String),
    Loaded(QueryCollection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    StartFragment,
    StartFragments,
    Query,
    Queries,
    QueryCollection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    StartFragment(String),
    StartFragments(Vec<StartFragment>),
    Query(String),
    Queries(Vec<QueryRecord>),
    QueryCollection(QueryCollectionSource),
}

impl OptionValue {
    pub fn key(&self) -> OptionKey {
        match self {
            OptionValue::StartFragment(_) => OptionKey::StartFragment,
            OptionValue::StartFragments(_) => OptionKey::StartFragments,
            OptionValue::Query(_) => OptionKey::Query,
            OptionValue::Queries(_) => OptionKey::Queries,
            OptionValue::QueryCollection(_) => OptionKey::QueryCollection,
        }
    }
}

/// The options record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetOptions {
    pub start_fragment: Option<String>,
    pub start_fragments: Vec<StartFragment>,
    pub query: Option<String>,
    pub queries: Vec<QueryRecord>,
    pub query_collection: Option<QueryCollectionSource>,
}

impl WidgetOptions {
    /// Current value stored for `key`, if any
    pub fn get(&self, key: OptionKey) -> Option<OptionValue> {
        match key {
            OptionKey::StartFragment => self.start_fragment.clone().map(OptionValue::StartFragment),
            OptionKey::StartFragments => {
                Some(OptionValue::StartFragments(self.start_fragments.clone()))
            }
            OptionKey::Query => self.query.clone().map(OptionValue::Query),
            OptionKey::Queries => Some(OptionValue::Queries(self.queries.clone())),
            OptionKey::QueryCollection => self
                .query_collection
                .clone()
                .map(OptionValue::QueryCollection),
        }
    }

    /// Whether `value` equals what is stored for its key
    pub fn holds(&self, value: &OptionValue) -> bool {
        match value {
            OptionValue::StartFragment(url) => self.start_fragment.as_ref() == Some(url),
            OptionValue::StartFragments(list) => self.start_fragments == *list,
            OptionValue::Query(query) => self.query.as_ref() == Some(query),
            OptionValue::Queries(list) => self.queries == *list,
            OptionValue::QueryCollection(source) => self.query_collection.as_ref() == Some(source),
        }
    }

    pub fn store(&mut self, value: OptionValue) {
        match value {
            OptionValue::StartFragment(url) => self.start_fragment = Some(url),
            OptionValue::StartFragments(list) => self.start_fragments = list,
            OptionValue::Query(query) => self.query = Some(query),
            OptionValue::Queries(list) => self.queries = list,
            OptionValue::QueryCollection(source) => self.query_collection = Some(source),
        }
    }

    /// Values in the order they are applied when the widget is created
    pub fn into_values(self) -> Vec<OptionValue> {
        let mut values = vec![
            OptionValue::StartFragments(self.start_fragments),
            OptionValue::Queries(self.queries),
        ];
        values.extend(self.start_fragment.map(OptionValue::StartFragment));
        values.extend(self.query.map(OptionValue::Query));
        values.extend(self.query_collection.map(OptionValue::QueryCollection));
        values
    }

    /// The loaded query collection, if there is one
    pub fn loaded_collection(&self) -> Option<&QueryCollection> {
        match &self.query_collection {
            Some(QueryCollectionSource::Loaded(collection)) => Some(collection),
            _ => None,
        }
    }
}
