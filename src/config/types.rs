// Configuration type definitions

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::widget::{QueryRecord, StartFragment};

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    System,
    Osc52,
}

/// Clipboard configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub backend: ClipboardBackend,
}

/// Default widget options, overridden by command-line arguments
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub start_fragments: Vec<StartFragment>,
    #[serde(default)]
    pub queries: Vec<QueryRecord>,
    pub start_fragment: Option<String>,
    pub query: Option<String>,
    /// URL or local path of a query collection document
    pub collection: Option<String>,
}

/// Fragment retrieval settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of pages followed for a single triple pattern
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_limit() -> usize {
    100
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: default_timeout_secs(),
            page_limit: default_page_limit(),
        }
    }
}

/// Prefixes used when writing Turtle output and passed to the query engine
pub fn default_prefixes() -> BTreeMap<String, String> {
    [
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("owl", "http://www.w3.org/2002/07/owl#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
        ("dc", "http://purl.org/dc/terms/"),
        ("foaf", "http://xmlns.com/foaf/0.1/"),
        ("dbpedia", "http://dbpedia.org/resource/"),
        ("dbpedia-owl", "http://dbpedia.org/ontology/"),
        ("dbpprop", "http://dbpedia.org/property/"),
        ("hydra", "http://www.w3.org/ns/hydra/core#"),
        ("void", "http://rdfs.org/ns/void#"),
    ]
    .into_iter()
    .map(|(name, iri)| (name.to_string(), iri.to_string()))
    .collect()
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_prefixes")]
    pub prefixes: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clipboard: ClipboardConfig::default(),
            query: QueryConfig::default(),
            http: HttpConfig::default(),
            prefixes: default_prefixes(),
        }
    }
}
