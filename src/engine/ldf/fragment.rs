//! Triple pattern fragment requests and responses

use oxrdf::{GraphName, NamedNode, Quad, Subject, Term, Triple};
use oxttl::TriGParser;
use reqwest::Url;

use crate::engine::{EngineError, format_term};

const HYDRA_NEXT: &str = "http://www.w3.org/ns/hydra/core#next";
const HYDRA_NEXT_PAGE: &str = "http://www.w3.org/ns/hydra/core#nextPage";

/// A triple pattern with every position either bound or left open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentPattern {
    pub subject: Option<Term>,
    pub predicate: Option<NamedNode>,
    pub object: Option<Term>,
}

impl FragmentPattern {
    /// Whether a data triple lies inside this fragment
    pub fn matches(&self, triple: &Triple) -> bool {
        let subject = Term::from(triple.subject.clone());
        self.subject.as_ref().is_none_or(|s| *s == subject)
            && self.predicate.as_ref().is_none_or(|p| *p == triple.predicate)
            && self.object.as_ref().is_none_or(|o| *o == triple.object)
    }

    /// URL of the first page of this fragment on the given start fragment
    ///
    /// Bound positions are passed as `subject`, `predicate` and `object` query
    /// parameters in their explicit representation. Blank nodes cannot be
    /// looked up and are left open.
    pub fn url(&self, start_fragment: &str) -> Result<Url, EngineError> {
        let mut url = Url::parse(start_fragment).map_err(|e| EngineError::Http {
            url: start_fragment.to_string(),
            message: e.to_string(),
        })?;

        let bound = |term: &Option<Term>| match term {
            Some(Term::BlankNode(_)) | None => None,
            Some(term) => Some(format_term(term)),
        };
        let params: Vec<(&str, String)> = [
            ("subject", bound(&self.subject)),
            (
                "predicate",
                self.predicate.as_ref().map(|p| p.as_str().to_string()),
            ),
            ("object", bound(&self.object)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

/// One parsed page of a fragment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentPage {
    pub triples: Vec<Triple>,
    pub next_page: Option<String>,
}

/// Split a TriG (or Turtle) response into data triples and the next-page link
///
/// When the response uses named graphs, every default-graph quad is data and
/// `hydra:next` is only looked up in the named (metadata) graphs. A plain
/// Turtle response has no such separation: triples about the page itself are
/// taken as controls and everything else as data.
pub fn parse_page(url: &str, body: &[u8]) -> Result<FragmentPage, EngineError> {
    let parse_error = |message: String| EngineError::Parse {
        url: url.to_string(),
        message,
    };

    let parser = TriGParser::new()
        .with_base_iri(url)
        .map_err(|e| parse_error(e.to_string()))?;
    let quads = parser
        .for_reader(body)
        .collect::<Result<Vec<Quad>, _>>()
        .map_err(|e| parse_error(e.to_string()))?;

    let has_metadata_graph = quads
        .iter()
        .any(|quad| quad.graph_name != GraphName::DefaultGraph);
    let is_control = |quad: &Quad| {
        if has_metadata_graph {
            quad.graph_name != GraphName::DefaultGraph
        } else {
            describes_page(quad, url)
        }
    };

    let mut page = FragmentPage::default();
    for quad in quads {
        if !is_control(&quad) {
            page.triples.push(Triple::from(quad));
            continue;
        }
        if !is_next_link(&quad) {
            continue;
        }
        if let Term::NamedNode(next) = &quad.object {
            page.next_page = Some(next.as_str().to_string());
        }
    }
    Ok(page)
}

fn is_next_link(quad: &Quad) -> bool {
    let predicate = quad.predicate.as_str();
    predicate == HYDRA_NEXT || predicate == HYDRA_NEXT_PAGE
}

/// Subject is the page or one of its fragment identifiers (`<page#metadata>`)
fn describes_page(quad: &Quad, url: &str) -> bool {
    let Subject::NamedNode(subject) = &quad.subject else {
        return false;
    };
    let iri = subject.as_str();
    iri.split_once('#').map_or(iri, |(document, _)| document) == url
}

#[cfg(test)]
#[path = "fragment_tests.rs"]
mod fragment_tests;
