use decaygraph::dot::{DotParser, DotStyle, NodeShape, parse_dot_file, parse_dot_str, to_dot, to_dot_with_style, write_dot};
use decaygraph::model::{
    DecayGraph, EventGroup, IdentityLookup, NO_PARENT, ParticleRecord, build_decay_graph,
};
use decaygraph::parser::ByteParser;
use decaygraph::parser::parsing_error::ParsingErrorType;
use std::path::Path;

fn lookup() -> IdentityLookup {
    [
        ("2212", "p+"),
        ("22", "gamma"),
        ("111", "pi0"),
        ("3", "quote \" and \\ backslash"),
    ]
    .into_iter()
    .collect()
}

fn sample_graph() -> DecayGraph {
    let group = EventGroup::with_records(
        0,
        vec![
            ParticleRecord::new(0, 0, 2212, NO_PARENT, 4),
            ParticleRecord::new(0, 1, 22, 0, 1),
            ParticleRecord::new(0, 2, 111, 0, 2),
            ParticleRecord::new(0, 3, 22, 2, 1),
            ParticleRecord::new(0, 4, 22, 2, 1),
        ],
    );
    build_decay_graph(&group, &lookup()).unwrap()
}

// --- TESTS WRITING ---
#[test]
fn test_exact_output_format() {
    let expected = "digraph \"Event 0\" {\n\
                    \x20   0 [label=\"p+\", shape=circle];\n\
                    \x20   1 [label=\"gamma\", shape=circle];\n\
                    \x20   2 [label=\"pi0\", shape=circle];\n\
                    \x20   3 [label=\"gamma\", shape=circle];\n\
                    \x20   4 [label=\"gamma\", shape=circle];\n\
                    \x20   0 -> 1;\n\
                    \x20   0 -> 2;\n\
                    \x20   2 -> 3;\n\
                    \x20   2 -> 4;\n\
                    }\n";
    assert_eq!(to_dot(&sample_graph()), expected);
}

#[test]
fn test_shape_is_applied_to_every_node() {
    let style = DotStyle::default().with_node_shape(NodeShape::Box);
    let dot = to_dot_with_style(&sample_graph(), &style);

    assert_eq!(dot.matches("shape=box").count(), 5);
    assert!(!dot.contains("shape=circle"));
}

#[test]
fn test_write_dot_matches_to_dot() {
    let graph = sample_graph();
    let mut buffer = Vec::new();
    write_dot(&mut buffer, &graph, &DotStyle::default()).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), to_dot(&graph));
}

#[test]
fn test_special_characters_are_escaped() {
    let group = EventGroup::with_records(0, vec![ParticleRecord::new(0, 0, 3, NO_PARENT, 0)]);
    let graph = build_decay_graph(&group, &lookup()).unwrap();
    let dot = to_dot(&graph);

    assert!(dot.contains(r#"label="quote \" and \\ backslash""#), "{dot}");
}

// --- TESTS ROUND TRIP ---
#[test]
fn test_round_trip_preserves_graph() {
    let graph = sample_graph();
    let parsed = parse_dot_str(to_dot(&graph)).unwrap();

    assert_eq!(parsed.title(), graph.title());
    assert_eq!(parsed.nodes(), graph.nodes());
    assert_eq!(parsed.edges(), graph.edges());
}

#[test]
fn test_round_trip_with_escapes_and_other_shape() {
    let group = EventGroup::with_records(
        12,
        vec![
            ParticleRecord::new(12, 7, 3, NO_PARENT, 0),
            ParticleRecord::new(12, 2, 22, 7, 0),
        ],
    );
    let graph = build_decay_graph(&group, &lookup()).unwrap();
    let style = DotStyle::default().with_node_shape(NodeShape::Plaintext);
    let parsed = parse_dot_str(to_dot_with_style(&graph, &style)).unwrap();

    assert_eq!(parsed, graph);
}

#[test]
fn test_round_trip_of_empty_graph() {
    let graph = build_decay_graph(&EventGroup::new(3), &lookup()).unwrap();
    let parsed = parse_dot_str(to_dot(&graph)).unwrap();

    assert_eq!(parsed.title(), "Event 3");
    assert!(parsed.is_empty());
}

// --- TESTS PARSING HAND-WRITTEN DOT ---
#[test]
fn test_parse_common_syntax_variants() {
    let dot = r#"
        /* produced by hand */
        STRICT DiGraph decay {
            rankdir = LR
            node [shape=ellipse; fontsize=10]
            edge [color="gray"]
            # proton
            0 [label=p]
            1 [ label = "gamma" , color=red ]
            2 [label="pi0"] [style=filled];
            0 -> 2 -> 3 [weight=2]; // chain with implicit node 3
            0->1
        }
    "#;
    let graph = parse_dot_str(dot).unwrap();

    assert_eq!(graph.title(), "decay");
    let ids: Vec<usize> = graph.nodes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(graph.label(0), Some("p"));
    assert_eq!(graph.label(1), Some("gamma"));
    assert_eq!(graph.label(2), Some("pi0"));
    assert_eq!(graph.label(3), Some("3"));

    let edges: Vec<(usize, usize)> = graph.edges().iter().map(|e| (e.parent, e.child)).collect();
    assert_eq!(edges, vec![(0, 2), (2, 3), (0, 1)]);
}

#[test]
fn test_parse_untitled_undirected_graph() {
    let graph = parse_dot_str("graph { 0 -- 1; 1 -- 2 }").unwrap();

    assert_eq!(graph.title(), "");
    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 2);
}

#[test]
fn test_repeated_node_statement_updates_label() {
    let graph = parse_dot_str("digraph { 0 -> 1; 1 [label=gamma]; 1 [label=\"e-\"] }").unwrap();

    assert_eq!(graph.num_nodes(), 2);
    assert_eq!(graph.label(1), Some("e-"));
}

#[test]
fn test_parse_dot_file() {
    let path = Path::new("tests").join("fixtures").join("event_0.dot");
    let graph = parse_dot_file(path).unwrap();

    assert_eq!(graph.title(), "Event 0");
    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.children(0), vec![1, 2]);
    assert_eq!(graph.label(3), Some("gamma"));
}

// --- TESTS PARSING ERRORS ---
fn parse_error_kind(dot: &str) -> ParsingErrorType {
    parse_dot_str(dot).unwrap_err().kind().clone()
}

#[test]
fn test_missing_header_is_error() {
    assert!(matches!(
        parse_error_kind("0 -> 1;"),
        ParsingErrorType::InvalidGraphHeader(_)
    ));
}

#[test]
fn test_non_numeric_node_id_is_error() {
    assert!(matches!(
        parse_error_kind("digraph { a -> b }"),
        ParsingErrorType::InvalidNodeId(id) if id == "a"
    ));
}

#[test]
fn test_wrong_edge_operator_is_error() {
    assert!(matches!(
        parse_error_kind("digraph { 0 -- 1 }"),
        ParsingErrorType::InvalidStatement(_)
    ));
}

#[test]
fn test_subgraph_is_error() {
    assert!(matches!(
        parse_error_kind("digraph { subgraph cluster_0 { 0 } }"),
        ParsingErrorType::InvalidStatement(_)
    ));
}

#[test]
fn test_unterminated_input_is_error() {
    assert!(matches!(
        parse_error_kind("digraph { 0 -> 1;"),
        ParsingErrorType::UnexpectedEOF
    ));
    assert!(matches!(
        parse_error_kind("digraph { 0 [label=\"gamma] }"),
        ParsingErrorType::UnclosedString
    ));
    assert!(matches!(
        parse_error_kind("digraph { /* 0 -> 1 }"),
        ParsingErrorType::UnclosedComment
    ));
}

#[test]
fn test_declared_nodes_only() {
    let mut parser = ByteParser::for_str("digraph { 0 [label=p]; 0 -> 1 }");
    let err = DotParser::new()
        .with_declared_nodes_only()
        .parse_str(&mut parser)
        .unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidStatement(_)));

    let mut parser = ByteParser::for_str("digraph { 0 [label=p]; 1 [label=q]; 0 -> 1 }");
    let graph = DotParser::new()
        .with_declared_nodes_only()
        .parse_str(&mut parser)
        .unwrap();
    assert_eq!(graph.num_edges(), 1);
}
