use super::*;
use crate::config::HttpConfig;
use crate::engine::ldf::plan::{parse_query, plan_query};
use crate::engine::{AbortRegistry, QueryLogger, format_term};
use log::LevelFilter;
use oxrdf::Literal;
use reqwest::Url;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::thread;

fn plan_for(query: &str) -> QueryPlan {
    plan_query(&parse_query(query, &BTreeMap::new()).unwrap()).unwrap()
}

fn iri(value: &str) -> NamedNode {
    NamedNode::new(value).unwrap()
}

fn knows(subject: &str, object: &str) -> Triple {
    Triple::new(
        iri(subject),
        iri("http://xmlns.com/foaf/0.1/knows"),
        iri(object),
    )
}

#[test]
fn test_bind_pattern_uses_current_solution() {
    let plan = plan_for("SELECT * { ?a <http://xmlns.com/foaf/0.1/knows> ?b }");
    let mut binding = Binding::new();
    binding.insert("a".to_string(), Term::from(iri("http://example.org/alice")));

    let request = bind_pattern(&plan.patterns[0], &binding);

    assert_eq!(
        request.subject,
        Some(Term::from(iri("http://example.org/alice")))
    );
    assert_eq!(
        request.predicate,
        Some(iri("http://xmlns.com/foaf/0.1/knows"))
    );
    assert_eq!(request.object, None);
}

#[test]
fn test_extend_binding_assigns_free_variables() {
    let plan = plan_for("SELECT * { ?a <http://xmlns.com/foaf/0.1/knows> ?b }");

    let extended = extend_binding(
        &plan.patterns[0],
        &Binding::new(),
        &knows("http://example.org/alice", "http://example.org/bob"),
    )
    .unwrap();

    assert_eq!(
        extended.get("b"),
        Some(&Term::from(iri("http://example.org/bob")))
    );
}

#[test]
fn test_extend_binding_rejects_conflicting_values() {
    let plan = plan_for("SELECT * { ?a <http://xmlns.com/foaf/0.1/knows> ?b }");
    let mut binding = Binding::new();
    binding.insert("b".to_string(), Term::from(iri("http://example.org/carol")));

    let extended = extend_binding(
        &plan.patterns[0],
        &binding,
        &knows("http://example.org/alice", "http://example.org/bob"),
    );

    assert!(extended.is_none());
}

#[test]
fn test_repeated_variable_must_match_itself() {
    let plan = plan_for("SELECT * { ?x <http://xmlns.com/foaf/0.1/knows> ?x }");

    let loop_triple = knows("http://example.org/narcissus", "http://example.org/narcissus");
    let other = knows("http://example.org/alice", "http://example.org/bob");

    assert!(extend_binding(&plan.patterns[0], &Binding::new(), &loop_triple).is_some());
    assert!(extend_binding(&plan.patterns[0], &Binding::new(), &other).is_none());
}

#[test]
fn test_template_skips_unbound_and_literal_subjects() {
    let plan = plan_for(
        "CONSTRUCT { ?o <http://example.org/p> ?s . ?s <http://example.org/q> ?missing } WHERE { ?s <http://example.org/name> ?o }",
    );
    let QueryForm::Construct(template) = &plan.form else {
        panic!("expected CONSTRUCT");
    };
    let mut binding = Binding::new();
    binding.insert("s".to_string(), Term::from(iri("http://example.org/alice")));
    binding.insert(
        "o".to_string(),
        Term::from(Literal::new_simple_literal("Alice")),
    );

    let triples = instantiate_template(template, &binding, 0);

    assert!(triples.is_empty());
}

#[test]
fn test_template_blank_nodes_are_fresh_per_solution() {
    let plan = plan_for(
        "CONSTRUCT { _:n <http://example.org/of> ?s } WHERE { ?s <http://example.org/name> ?o }",
    );
    let QueryForm::Construct(template) = &plan.form else {
        panic!("expected CONSTRUCT");
    };
    let mut binding = Binding::new();
    binding.insert("s".to_string(), Term::from(iri("http://example.org/alice")));

    let first = instantiate_template(template, &binding, 0);
    let second = instantiate_template(template, &binding, 1);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_ne!(first[0].subject, second[0].subject);
}

#[test]
fn test_evaluate_without_start_fragments_fails() {
    let plan = plan_for("SELECT * { ?s ?p ?o }");
    let (logger, _log_rx) = QueryLogger::channel(LevelFilter::Info);
    let client = HttpFragmentsClient::new(
        Vec::new(),
        &HttpConfig::default(),
        AbortRegistry::new(),
        logger,
    );
    let (tx, _rx) = channel();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let result = runtime.block_on(evaluate(&plan, &client, &tx, &CancellationToken::new()));

    assert_eq!(result, Err(EngineError::NoStartFragments));
}

const FOAF: &str = "PREFIX foaf: <http://xmlns.com/foaf/0.1/> PREFIX ex: <http://example.org/>";
const HYDRA_NEXT_IRI: &str = "http://www.w3.org/ns/hydra/core#next";

fn social_graph() -> Vec<Triple> {
    vec![
        knows("http://example.org/alice", "http://example.org/bob"),
        knows("http://example.org/alice", "http://example.org/carol"),
        knows("http://example.org/bob", "http://example.org/carol"),
        Triple::new(
            iri("http://example.org/bob"),
            iri("http://xmlns.com/foaf/0.1/name"),
            Literal::new_simple_literal("Bob"),
        ),
        knows("http://example.org/carol", "http://example.org/dave"),
    ]
}

/// Local triple pattern fragments interface over a fixed dataset
struct FragmentServer {
    url: String,
    requests: Arc<AtomicUsize>,
}

impl FragmentServer {
    fn start(dataset: Vec<Triple>, page_size: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&requests);
        let server_origin = origin.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut header = String::new();
                while reader.read_line(&mut header).unwrap() > 2 {
                    header.clear();
                }

                let target = request_line.split_whitespace().nth(1).unwrap_or("/");
                let url = Url::parse(&format!("{}{}", server_origin, target)).unwrap();
                let body = fragment_page(&url, &dataset, page_size);
                let _ = write!(
                    stream,
                    "HTTP/1.1 200 OK\r\nContent-Type: application/trig\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
            }
        });

        Self {
            url: format!("{}/dataset", origin),
            requests,
        }
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// TriG page: matching triples in the default graph, `hydra:next` in a metadata graph
fn fragment_page(url: &Url, dataset: &[Triple], page_size: usize) -> String {
    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };
    let (subject, predicate, object) = (param("subject"), param("predicate"), param("object"));
    let page: usize = param("page").and_then(|p| p.parse().ok()).unwrap_or(1);

    let matching: Vec<&Triple> = dataset
        .iter()
        .filter(|t| {
            subject
                .as_ref()
                .is_none_or(|s| *s == format_term(&Term::from(t.subject.clone())))
                && predicate.as_ref().is_none_or(|p| p == t.predicate.as_str())
                && object.as_ref().is_none_or(|o| *o == format_term(&t.object))
        })
        .collect();

    let mut body = String::new();
    for triple in matching.iter().skip((page - 1) * page_size).take(page_size) {
        body.push_str(&format!("{} .\n", triple));
    }
    if matching.len() > page * page_size {
        let mut next = url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        next.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("page", &(page + 1).to_string());
        body.push_str(&format!(
            "<#metadata> {{ <{}> <{}> <{}> . }}\n",
            url, HYDRA_NEXT_IRI, next
        ));
    }
    body
}

struct Evaluation {
    outcome: Result<(), EngineError>,
    results: Vec<QueryResult>,
    log: Vec<String>,
}

impl Evaluation {
    fn rows(&self) -> Vec<Vec<String>> {
        self.results
            .iter()
            .map(|result| match result {
                QueryResult::Bindings(solution) => solution
                    .iter()
                    .map(|(_, value)| value.as_ref().map(format_term).unwrap_or_default())
                    .collect(),
                other => panic!("expected bindings, got {:?}", other),
            })
            .collect()
    }
}

fn evaluate_on(server: &FragmentServer, query: &str, page_limit: usize) -> Evaluation {
    let plan = plan_for(&format!("{} {}", FOAF, query));
    let (logger, log_rx) = QueryLogger::channel(LevelFilter::Info);
    let config = HttpConfig {
        timeout_secs: 5,
        page_limit,
    };
    let client = HttpFragmentsClient::new(
        vec![server.url.clone()],
        &config,
        AbortRegistry::new(),
        logger,
    );
    let (tx, rx) = channel();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let outcome = runtime.block_on(evaluate(&plan, &client, &tx, &CancellationToken::new()));

    let results = rx
        .try_iter()
        .map(|event| match event {
            IteratorEvent::Data(result) => result,
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    let log = log_rx.try_iter().map(|record| record.message).collect();
    Evaluation {
        outcome,
        results,
        log,
    }
}

fn ex(name: &str) -> String {
    format!("http://example.org/{}", name)
}

#[test]
fn test_join_binds_shared_variable_across_fragments() {
    let server = FragmentServer::start(social_graph(), 100);

    let evaluation = evaluate_on(
        &server,
        "SELECT ?a ?c { ?a foaf:knows ?b . ?b foaf:knows ?c }",
        10,
    );

    assert_eq!(evaluation.outcome, Ok(()));
    assert_eq!(
        evaluation.rows(),
        vec![
            vec![ex("alice"), ex("carol")],
            vec![ex("alice"), ex("dave")],
            vec![ex("bob"), ex("dave")],
        ]
    );
}

#[test]
fn test_next_links_are_followed_across_pages() {
    let server = FragmentServer::start(social_graph(), 1);

    let evaluation = evaluate_on(&server, "SELECT ?s ?o { ?s foaf:knows ?o }", 10);

    assert_eq!(evaluation.outcome, Ok(()));
    assert_eq!(evaluation.rows().len(), 4);
    assert_eq!(server.requests(), 4);
    assert!(evaluation.log.iter().all(|line| !line.starts_with("Stopped")));
}

#[test]
fn test_page_limit_stops_paging_with_warning() {
    let server = FragmentServer::start(social_graph(), 1);

    let evaluation = evaluate_on(&server, "SELECT ?s ?o { ?s foaf:knows ?o }", 2);

    assert_eq!(evaluation.outcome, Ok(()));
    assert_eq!(evaluation.rows().len(), 2);
    assert_eq!(server.requests(), 2);
    assert!(
        evaluation
            .log
            .contains(&format!("Stopped after 2 pages of {}", server.url))
    );
}

#[test]
fn test_distinct_drops_repeated_rows() {
    let server = FragmentServer::start(social_graph(), 100);

    let evaluation = evaluate_on(&server, "SELECT DISTINCT ?a { ?a foaf:knows ?b }", 10);

    assert_eq!(
        evaluation.rows(),
        vec![vec![ex("alice")], vec![ex("bob")], vec![ex("carol")]]
    );
}

#[test]
fn test_offset_and_limit_slice_the_solutions() {
    let server = FragmentServer::start(social_graph(), 100);

    let evaluation = evaluate_on(
        &server,
        "SELECT ?s ?o { ?s foaf:knows ?o } OFFSET 1 LIMIT 2",
        10,
    );

    assert_eq!(
        evaluation.rows(),
        vec![
            vec![ex("alice"), ex("carol")],
            vec![ex("bob"), ex("carol")],
        ]
    );
}

#[test]
fn test_limit_zero_returns_nothing_without_requests() {
    let server = FragmentServer::start(social_graph(), 100);

    let select = evaluate_on(&server, "SELECT ?s { ?s foaf:knows ?o } LIMIT 0", 10);
    let construct = evaluate_on(
        &server,
        "CONSTRUCT { ?o foaf:knows ?s } WHERE { ?s foaf:knows ?o } LIMIT 0",
        10,
    );

    assert_eq!(select.outcome, Ok(()));
    assert!(select.results.is_empty());
    assert_eq!(construct.outcome, Ok(()));
    assert!(construct.results.is_empty());
    assert_eq!(server.requests(), 0);
}

#[test]
fn test_construct_limit_counts_solutions() {
    let server = FragmentServer::start(social_graph(), 100);

    let evaluation = evaluate_on(
        &server,
        "CONSTRUCT { ?o ex:knownBy ?s } WHERE { ?s foaf:knows ?o } LIMIT 1",
        10,
    );

    assert_eq!(
        evaluation.results,
        vec![QueryResult::Triple(Triple::new(
            iri(&ex("bob")),
            iri(&ex("knownBy")),
            iri(&ex("alice")),
        ))]
    );
}

#[test]
fn test_ask_answers_both_ways() {
    let server = FragmentServer::start(social_graph(), 100);

    let yes = evaluate_on(&server, "ASK { ex:alice foaf:knows ex:bob }", 10);
    let no = evaluate_on(&server, "ASK { ex:alice foaf:knows ex:dave }", 10);

    assert_eq!(yes.results, vec![QueryResult::Boolean(true)]);
    assert_eq!(no.results, vec![QueryResult::Boolean(false)]);
}

#[test]
fn test_describe_fetches_triples_about_each_solution() {
    let server = FragmentServer::start(social_graph(), 100);

    let evaluation = evaluate_on(
        &server,
        "DESCRIBE ?b WHERE { ?a foaf:knows ?b . ?b foaf:knows ex:carol }",
        10,
    );

    let QueryResult::Triple(first) = &evaluation.results[0] else {
        panic!("expected triples");
    };
    assert_eq!(evaluation.outcome, Ok(()));
    assert_eq!(first, &knows(&ex("bob"), &ex("carol")));
    assert_eq!(evaluation.results.len(), 2);
}
