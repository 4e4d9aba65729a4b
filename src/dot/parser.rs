//! Structs and logic to parse DOT graph descriptions back into decay graphs.
//!
//! This module provides the [DotParser] struct, which reads the DOT subset
//! produced by the [writer](crate::dot::writer) as well as hand-written or
//! tool-generated graphs using the common constructs.

use crate::dot::defs::{
    DIGRAPH, DIRECTED_EDGE_OP, EDGE, GRAPH, LABEL_ATTR, NODE, STRICT, UNDIRECTED_EDGE_OP,
};
use crate::model::{DecayGraph, ParticleIndex};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// DOT PARSER
// =#========================================================================$=
/// Parser (configuration) for a single DOT graph with particle-index node ids.
///
/// # Supported syntax
/// * `[strict] (digraph | graph) [id] { ... }`, keywords case-insensitive
/// * identifiers: bare words, numerals, or double-quoted strings with `\"` escapes
/// * node statements `id [attr=value, ...]`; the `label` attribute becomes
///   the node label, other attributes are ignored
/// * edge statements `a -> b -> c [attrs]` (`--` in undirected graphs)
/// * default-attribute statements `graph|node|edge [...]` and graph
///   attributes `id = id`, both ignored
/// * comments `// ...`, `/* ... */` and `# ...`; optional `;` separators
///
/// Subgraphs, ports and HTML strings are rejected. Node identifiers must be
/// non-negative integers (particle indices).
///
/// # Configuration
/// * [`with_declared_nodes_only()`](Self::with_declared_nodes_only)
///     - Edges may only connect nodes declared by an earlier node statement.
///       By default, as in DOT, nodes first seen in an edge are created with
///       their identifier as label.
///
/// # Example
/// ```
/// use decaygraph::dot::DotParser;
/// use decaygraph::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("digraph \"Event 1\" { 0 [label=\"t\"]; 1 [label=\"W+\"]; 0 -> 1 }");
/// let graph = DotParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(graph.title(), "Event 1");
/// assert_eq!(graph.label(1), Some("W+"));
/// assert_eq!(graph.children(0), vec![1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotParser {
    declared_nodes_only: bool,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl DotParser {
    /// Creates a new [DotParser] with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires every edge endpoint to be declared by a preceding node statement.
    pub fn with_declared_nodes_only(mut self) -> Self {
        self.declared_nodes_only = true;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl DotParser {
    /// Parses a single DOT graph from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at (whitespace before) the graph
    ///
    /// # Returns
    /// * `Ok(DecayGraph)` - The parsed graph, nodes and edges in text order
    /// * `Err(ParsingError)` - If the text is not a supported DOT graph
    pub fn parse_str<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<DecayGraph, ParsingError> {
        parser.skip_comment_and_whitespace()?;

        if consume_keyword(parser, STRICT) {
            parser.skip_comment_and_whitespace()?;
        }
        let directed = if consume_keyword(parser, DIGRAPH) {
            true
        } else if consume_keyword(parser, GRAPH) {
            false
        } else {
            return Err(ParsingError::invalid_graph_header(
                parser,
                "expected 'digraph' or 'graph'".to_string(),
            ));
        };
        parser.skip_comment_and_whitespace()?;

        let title = if parser.peek() == Some(b'{') {
            String::new()
        } else {
            parse_id(parser)?
        };
        parser.skip_comment_and_whitespace()?;

        if !parser.consume_if(b'{') {
            return Err(ParsingError::invalid_graph_header(
                parser,
                "expected '{' after graph id".to_string(),
            ));
        }

        let mut graph = DecayGraph::new(title);
        loop {
            parser.skip_comment_and_whitespace()?;
            match parser.peek() {
                None => return Err(ParsingError::unexpected_eof(parser)),
                Some(b'}') => {
                    parser.next_byte();
                    break;
                }
                Some(b';') => {
                    parser.next_byte();
                }
                Some(_) => self.parse_statement(parser, &mut graph, directed)?,
            }
        }

        Ok(graph)
    }
}

// ============================================================================
// Statements (private)
// ============================================================================
impl DotParser {
    fn parse_statement<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        graph: &mut DecayGraph,
        directed: bool,
    ) -> Result<(), ParsingError> {
        let quoted = parser.peek() == Some(b'"');
        let first = parse_id(parser)?;

        if !quoted {
            if [GRAPH, NODE, EDGE].iter().any(|k| k.eq_ignore_ascii_case(&first)) {
                parse_attr_lists(parser)?;
                return Ok(());
            }
            if first.eq_ignore_ascii_case("subgraph") {
                return Err(ParsingError::invalid_statement(
                    parser,
                    "subgraphs are not supported".to_string(),
                ));
            }
        }
        parser.skip_comment_and_whitespace()?;

        // Graph attribute `id = id`
        if parser.consume_if(b'=') {
            parser.skip_comment_and_whitespace()?;
            parse_id(parser)?;
            return Ok(());
        }

        let id = to_node_id(parser, first)?;
        if peek_is_edge_op(parser) {
            self.parse_edge_chain(parser, graph, directed, id)
        } else {
            let label = parse_attr_lists(parser)?
                .into_iter()
                .rev()
                .find(|(key, _)| key == LABEL_ATTR)
                .map(|(_, value)| value);
            match label {
                Some(label) => graph.set_label(id, label),
                None => {
                    graph.add_node(id, id.to_string());
                }
            }
            Ok(())
        }
    }

    fn parse_edge_chain<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        graph: &mut DecayGraph,
        directed: bool,
        first: ParticleIndex,
    ) -> Result<(), ParsingError> {
        let expected_op = if directed { DIRECTED_EDGE_OP } else { UNDIRECTED_EDGE_OP };

        let mut chain = vec![first];
        while peek_is_edge_op(parser) {
            if !parser.consume_if_sequence(expected_op) {
                return Err(ParsingError::invalid_statement(
                    parser,
                    "edge operator does not match graph kind".to_string(),
                ));
            }
            parser.skip_comment_and_whitespace()?;
            let id = parse_id(parser)?;
            chain.push(to_node_id(parser, id)?);
            parser.skip_comment_and_whitespace()?;
        }
        parse_attr_lists(parser)?;

        for &id in &chain {
            if !graph.contains_node(id) {
                if self.declared_nodes_only {
                    return Err(ParsingError::invalid_statement(
                        parser,
                        format!("edge references undeclared node {id}"),
                    ));
                }
                graph.add_node(id, id.to_string());
            }
        }
        for pair in chain.windows(2) {
            graph.add_edge(pair[0], pair[1]);
        }

        Ok(())
    }
}

// ============================================================================
// Tokens (private)
// ============================================================================
/// Consumes `keyword` if it appears as a whole word (case-insensitive).
fn consume_keyword<B: ByteSource>(parser: &mut ByteParser<B>, keyword: &str) -> bool {
    if !parser.peek_is_word(keyword) {
        return false;
    }
    let start = parser.position();
    if parser.parse_unquoted_word().eq_ignore_ascii_case(keyword) {
        true
    } else {
        parser.set_position(start);
        false
    }
}

fn peek_is_edge_op<B: ByteSource>(parser: &ByteParser<B>) -> bool {
    parser.peek_is_sequence(DIRECTED_EDGE_OP) || parser.peek_is_sequence(UNDIRECTED_EDGE_OP)
}

/// Parses a quoted or bare identifier at the current position.
fn parse_id<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<String, ParsingError> {
    match parser.peek() {
        None => Err(ParsingError::unexpected_eof(parser)),
        Some(b'"') => parser.parse_quoted_string(),
        Some(b'<') => Err(ParsingError::invalid_statement(
            parser,
            "HTML strings are not supported".to_string(),
        )),
        Some(_) => {
            let word = parser.parse_unquoted_word();
            if word.is_empty() {
                Err(ParsingError::invalid_statement(parser, "expected identifier".to_string()))
            } else {
                Ok(word)
            }
        }
    }
}

fn to_node_id<B: ByteSource>(
    parser: &ByteParser<B>,
    id: String,
) -> Result<ParticleIndex, ParsingError> {
    id.parse::<ParticleIndex>()
        .map_err(|_| ParsingError::invalid_node_id(parser, id))
}

/// Parses zero or more `[key=value, ...]` lists following a statement.
fn parse_attr_lists<B: ByteSource>(
    parser: &mut ByteParser<B>,
) -> Result<Vec<(String, String)>, ParsingError> {
    let mut attributes = Vec::new();
    loop {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b'[') {
            break;
        }
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b']') {
                break;
            }
            let key = parse_id(parser)?;
            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b'=') {
                return Err(ParsingError::invalid_statement(
                    parser,
                    format!("expected '=' after attribute '{key}'"),
                ));
            }
            parser.skip_comment_and_whitespace()?;
            let value = parse_id(parser)?;
            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b',') {
                parser.consume_if(b';');
            }
            attributes.push((key, value));
        }
    }
    Ok(attributes)
}
