//! Basic graph pattern evaluation over triple pattern fragments
//!
//! Solutions are produced depth-first: each pattern is bound with the current
//! partial solution, its fragment is fetched, and every matching triple
//! extends the solution before the next pattern is visited. Results are sent
//! as soon as a solution is complete.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::mpsc::Sender;

use oxrdf::{BlankNode, NamedNode, Subject, Term, Triple};
use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};
use tokio_util::sync::CancellationToken;

use super::client::HttpFragmentsClient;
use super::fragment::FragmentPattern;
use super::plan::{QueryForm, QueryPlan, as_named_node};
use crate::engine::{EngineError, IteratorEvent, QueryResult};

/// Partial solution keyed by variable name; blank nodes use a `_:` prefix
type Binding = BTreeMap<String, Term>;

/// Run the plan, sending results until done, cancelled or failed
pub async fn evaluate(
    plan: &QueryPlan,
    client: &HttpFragmentsClient,
    events: &Sender<IteratorEvent>,
    cancel_token: &CancellationToken,
) -> Result<(), EngineError> {
    if client.start_fragments().is_empty() {
        return Err(EngineError::NoStartFragments);
    }

    let mut sink = SolutionSink::new(plan, events);
    if plan.limit == Some(0) {
        sink.finish();
        return Ok(());
    }
    let mut stack: Vec<(usize, Binding)> = vec![(0, plan.constants.clone())];

    while let Some((depth, binding)) = stack.pop() {
        if cancel_token.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        if depth == plan.patterns.len() {
            if sink.accept(&binding, client, cancel_token).await? {
                break;
            }
            continue;
        }

        let pattern = &plan.patterns[depth];
        let request = bind_pattern(pattern, &binding);
        let triples = client.fetch_all(&request, cancel_token).await?;
        for triple in triples.iter().rev() {
            if let Some(extended) = extend_binding(pattern, &binding, triple) {
                stack.push((depth + 1, extended));
            }
        }
    }

    sink.finish();
    Ok(())
}

/// Applies solution modifiers and turns solutions into results
struct SolutionSink<'a> {
    plan: &'a QueryPlan,
    events: &'a Sender<IteratorEvent>,
    seen: HashSet<Vec<Option<Term>>>,
    described: HashSet<NamedNode>,
    skipped: usize,
    emitted: usize,
}

impl<'a> SolutionSink<'a> {
    fn new(plan: &'a QueryPlan, events: &'a Sender<IteratorEvent>) -> Self {
        Self {
            plan,
            events,
            seen: HashSet::new(),
            described: HashSet::new(),
            skipped: 0,
            emitted: 0,
        }
    }

    /// Handle one complete solution; `true` once no more are needed
    async fn accept(
        &mut self,
        binding: &Binding,
        client: &HttpFragmentsClient,
        cancel_token: &CancellationToken,
    ) -> Result<bool, EngineError> {
        let row: Vec<Option<Term>> = self
            .plan
            .projection
            .iter()
            .map(|name| binding.get(name).cloned())
            .collect();

        if self.plan.distinct && !self.seen.insert(row.clone()) {
            return Ok(false);
        }
        if self.skipped < self.plan.offset {
            self.skipped += 1;
            return Ok(false);
        }
        if self.plan.limit.is_some_and(|limit| self.emitted >= limit) {
            return Ok(true);
        }

        match &self.plan.form {
            QueryForm::Select => {
                let solution = self
                    .plan
                    .projection
                    .iter()
                    .map(|name| format!("?{}", name))
                    .zip(row)
                    .collect();
                self.send(QueryResult::Bindings(solution));
            }
            QueryForm::Construct(template) => {
                for triple in instantiate_template(template, binding, self.emitted) {
                    self.send(QueryResult::Triple(triple));
                }
            }
            QueryForm::Describe => {
                for resource in row.iter().flatten().filter_map(as_named_node) {
                    if !self.described.insert(resource.clone()) {
                        continue;
                    }
                    let request = FragmentPattern {
                        subject: Some(Term::from(resource.clone())),
                        ..FragmentPattern::default()
                    };
                    for triple in client.fetch_all(&request, cancel_token).await? {
                        self.send(QueryResult::Triple(triple));
                    }
                }
            }
            QueryForm::Ask => {
                self.send(QueryResult::Boolean(true));
                self.emitted += 1;
                return Ok(true);
            }
        }

        self.emitted += 1;
        Ok(self.plan.limit.is_some_and(|limit| self.emitted >= limit))
    }

    /// ASK without any solution still answers
    fn finish(&mut self) {
        if self.plan.form == QueryForm::Ask && self.emitted == 0 {
            self.send(QueryResult::Boolean(false));
        }
    }

    fn send(&self, result: QueryResult) {
        // A closed channel means the iterator was detached; cancellation follows
        let _ = self.events.send(IteratorEvent::Data(result));
    }
}

fn variable_key(term: &TermPattern) -> Option<String> {
    match term {
        TermPattern::Variable(v) => Some(v.as_str().to_string()),
        TermPattern::BlankNode(b) => Some(format!("_:{}", b.as_str())),
        _ => None,
    }
}

fn resolve_term(term: &TermPattern, binding: &Binding) -> Option<Term> {
    match term {
        TermPattern::NamedNode(n) => Some(Term::from(n.clone())),
        TermPattern::Literal(l) => Some(Term::from(l.clone())),
        other => variable_key(other).and_then(|key| binding.get(&key).cloned()),
    }
}

fn resolve_predicate(predicate: &NamedNodePattern, binding: &Binding) -> Option<Term> {
    match predicate {
        NamedNodePattern::NamedNode(n) => Some(Term::from(n.clone())),
        NamedNodePattern::Variable(v) => binding.get(v.as_str()).cloned(),
    }
}

/// The fragment to request for `pattern` under the current solution
pub fn bind_pattern(pattern: &TriplePattern, binding: &Binding) -> FragmentPattern {
    FragmentPattern {
        subject: resolve_term(&pattern.subject, binding),
        predicate: resolve_predicate(&pattern.predicate, binding).and_then(|term| match term {
            Term::NamedNode(n) => Some(n),
            _ => None,
        }),
        object: resolve_term(&pattern.object, binding),
    }
}

/// Extend `binding` with the variables `triple` assigns, if it is compatible
pub fn extend_binding(
    pattern: &TriplePattern,
    binding: &Binding,
    triple: &Triple,
) -> Option<Binding> {
    let mut extended = binding.clone();
    let positions = [
        (
            variable_key(&pattern.subject),
            resolve_term(&pattern.subject, binding),
            Term::from(triple.subject.clone()),
        ),
        (
            match &pattern.predicate {
                NamedNodePattern::Variable(v) => Some(v.as_str().to_string()),
                NamedNodePattern::NamedNode(_) => None,
            },
            resolve_predicate(&pattern.predicate, binding),
            Term::from(triple.predicate.clone()),
        ),
        (
            variable_key(&pattern.object),
            resolve_term(&pattern.object, binding),
            triple.object.clone(),
        ),
    ];

    for (key, expected, actual) in positions {
        match (key, expected) {
            // Bound before this pattern, or a constant
            (_, Some(expected)) => {
                if expected != actual {
                    return None;
                }
            }
            // The same variable may occur twice in one pattern
            (Some(key), None) => match extended.get(&key) {
                Some(existing) if *existing != actual => return None,
                Some(_) => {}
                None => {
                    extended.insert(key, actual);
                }
            },
            (None, None) => return None,
        }
    }
    Some(extended)
}

/// Template triples for one solution; template blank nodes are fresh per solution
fn instantiate_template(
    template: &[TriplePattern],
    binding: &Binding,
    solution_index: usize,
) -> Vec<Triple> {
    let mut fresh: HashMap<String, BlankNode> = HashMap::new();
    let mut term_for = |term: &TermPattern| -> Option<Term> {
        match term {
            TermPattern::BlankNode(b) => Some(Term::from(
                fresh
                    .entry(b.as_str().to_string())
                    .or_insert_with(|| {
                        BlankNode::new_unchecked(format!("{}_{}", b.as_str(), solution_index))
                    })
                    .clone(),
            )),
            other => resolve_term(other, binding),
        }
    };

    template
        .iter()
        .filter_map(|pattern| {
            let subject = match term_for(&pattern.subject)? {
                Term::NamedNode(n) => Subject::from(n),
                Term::BlankNode(b) => Subject::from(b),
                _ => return None,
            };
            let predicate = match resolve_predicate(&pattern.predicate, binding)? {
                Term::NamedNode(n) => n,
                _ => return None,
            };
            let object = term_for(&pattern.object)?;
            Some(Triple::new(subject, predicate, object))
        })
        .collect()
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod evaluator_tests;
