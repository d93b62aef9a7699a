//! Query planning
//!
//! Lowers a parsed SPARQL query into the flat form the evaluator runs: an
//! ordered list of triple patterns plus solution modifiers. Only basic graph
//! patterns (and joins of them) are supported.

use std::collections::BTreeMap;

use oxrdf::{NamedNode, Term};
use spargebra::Query;
use spargebra::algebra::{Expression, GraphPattern};
use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};

use crate::engine::{EngineError, QueryType};

/// What to do with each solution of the pattern
#[derive(Debug, Clone, PartialEq)]
pub enum QueryForm {
    Select,
    Construct(Vec<TriplePattern>),
    Describe,
    Ask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub form: QueryForm,
    pub patterns: Vec<TriplePattern>,
    /// Constant bindings introduced by BIND of an IRI (used by `DESCRIBE <iri>`)
    pub constants: BTreeMap<String, Term>,
    /// Projected variable names, in output order
    pub projection: Vec<String>,
    pub distinct: bool,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl QueryPlan {
    pub fn query_type(&self) -> QueryType {
        match self.form {
            QueryForm::Select => QueryType::Select,
            QueryForm::Construct(_) => QueryType::Construct,
            QueryForm::Describe => QueryType::Describe,
            QueryForm::Ask => QueryType::Ask,
        }
    }
}

/// Parse `query`, declaring any known prefix it uses but does not declare
pub fn parse_query(
    query: &str,
    prefixes: &BTreeMap<String, String>,
) -> Result<Query, EngineError> {
    let text = with_prefix_declarations(query, prefixes);
    Query::parse(&text, None).map_err(|e| EngineError::Syntax(e.to_string()))
}

fn with_prefix_declarations(query: &str, prefixes: &BTreeMap<String, String>) -> String {
    let lowercase = query.to_lowercase();
    let mut header = String::new();
    for (name, iri) in prefixes {
        let used = query.contains(&format!("{}:", name));
        let declared = lowercase.contains(&format!("prefix {}:", name.to_lowercase()));
        if used && !declared {
            header.push_str(&format!("PREFIX {}: <{}>\n", name, iri));
        }
    }
    if header.is_empty() {
        query.to_string()
    } else {
        header + query
    }
}

/// Build the evaluation plan for a parsed query
pub fn plan_query(query: &Query) -> Result<QueryPlan, EngineError> {
    let (form, pattern) = match query {
        Query::Select { pattern, .. } => (QueryForm::Select, pattern),
        Query::Construct {
            template, pattern, ..
        } => (QueryForm::Construct(template.clone()), pattern),
        Query::Describe { pattern, .. } => (QueryForm::Describe, pattern),
        Query::Ask { pattern, .. } => (QueryForm::Ask, pattern),
    };

    let mut plan = QueryPlan {
        form,
        patterns: Vec::new(),
        constants: BTreeMap::new(),
        projection: Vec::new(),
        distinct: false,
        offset: 0,
        limit: None,
    };
    let mut projection = None;
    lower(pattern, &mut plan, &mut projection)?;

    plan.projection = match projection {
        Some(variables) => variables,
        None => pattern_variables(&plan.patterns),
    };
    // Patterns with fewer free positions narrow the search fastest
    plan.patterns.sort_by_key(free_positions);
    Ok(plan)
}

fn lower(
    pattern: &GraphPattern,
    plan: &mut QueryPlan,
    projection: &mut Option<Vec<String>>,
) -> Result<(), EngineError> {
    match pattern {
        GraphPattern::Bgp { patterns } => {
            plan.patterns.extend(patterns.iter().cloned());
            Ok(())
        }
        GraphPattern::Join { left, right } => {
            lower(left, plan, projection)?;
            lower(right, plan, projection)
        }
        GraphPattern::Project { inner, variables } => {
            if projection.is_none() {
                *projection = Some(variables.iter().map(|v| v.as_str().to_string()).collect());
            }
            lower(inner, plan, projection)
        }
        GraphPattern::Distinct { inner } | GraphPattern::Reduced { inner } => {
            plan.distinct = true;
            lower(inner, plan, projection)
        }
        GraphPattern::Slice {
            inner,
            start,
            length,
        } => {
            plan.offset = *start;
            plan.limit = *length;
            lower(inner, plan, projection)
        }
        GraphPattern::Extend {
            inner,
            variable,
            expression: Expression::NamedNode(node),
        } => {
            plan.constants
                .insert(variable.as_str().to_string(), Term::from(node.clone()));
            lower(inner, plan, projection)
        }
        other => Err(EngineError::Unsupported(feature_name(other).to_string())),
    }
}

fn feature_name(pattern: &GraphPattern) -> &'static str {
    match pattern {
        GraphPattern::Filter { .. } => "FILTER",
        GraphPattern::Union { .. } => "UNION",
        GraphPattern::LeftJoin { .. } => "OPTIONAL",
        GraphPattern::Minus { .. } => "MINUS",
        GraphPattern::Values { .. } => "VALUES",
        GraphPattern::OrderBy { .. } => "ORDER BY",
        GraphPattern::Group { .. } => "GROUP BY",
        GraphPattern::Graph { .. } => "GRAPH",
        GraphPattern::Service { .. } => "SERVICE",
        GraphPattern::Path { .. } => "property paths",
        GraphPattern::Extend { .. } => "BIND",
        _ => "graph pattern",
    }
}

/// Variable names appearing in the patterns, in order of first appearance
fn pattern_variables(patterns: &[TriplePattern]) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();
    for pattern in patterns {
        let names = [
            term_variable(&pattern.subject),
            match &pattern.predicate {
                NamedNodePattern::Variable(v) => Some(v.as_str()),
                NamedNodePattern::NamedNode(_) => None,
            },
            term_variable(&pattern.object),
        ];
        for name in names.into_iter().flatten() {
            if !variables.iter().any(|known| known == name) {
                variables.push(name.to_string());
            }
        }
    }
    variables
}

fn term_variable(term: &TermPattern) -> Option<&str> {
    match term {
        TermPattern::Variable(v) => Some(v.as_str()),
        _ => None,
    }
}

fn free_positions(pattern: &TriplePattern) -> usize {
    let free_term = |term: &TermPattern| {
        matches!(term, TermPattern::Variable(_) | TermPattern::BlankNode(_))
    };
    usize::from(free_term(&pattern.subject))
        + usize::from(matches!(pattern.predicate, NamedNodePattern::Variable(_)))
        + usize::from(free_term(&pattern.object))
}

/// The IRI a bound term refers to, if it is one
pub fn as_named_node(term: &Term) -> Option<&NamedNode> {
    match term {
        Term::NamedNode(node) => Some(node),
        _ => None,
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod plan_tests;
