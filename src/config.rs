//! Run configuration.

use crate::dot::NodeShape;
use crate::output::{DEFAULT_OUTPUT_PATTERN, DEFAULT_RENDERER, OutputFormat};
use std::path::{Path, PathBuf};

/// Default upper bound on the number of events processed
pub const DEFAULT_MAX_EVENTS: usize = 2;

/// Default location of the gzip-compressed identity table
pub const DEFAULT_LOOKUP_PATH: &str = "pdgnames.json.gz";

// =#========================================================================#=
// RUN CONFIG
// =#========================================================================#=
/// All parameters of one run of the [pipeline](crate::pipeline::run).
///
/// Only the input path is required; everything else starts at its default
/// and can be changed with the `with_*` methods:
/// - `max_events`: [DEFAULT_MAX_EVENTS]
/// - `output_pattern`: [DEFAULT_OUTPUT_PATTERN]
/// - `format`: [OutputFormat::Png]
/// - `lookup_path`: [DEFAULT_LOOKUP_PATH]
/// - `renderer`: [DEFAULT_RENDERER]
/// - `node_shape`: [NodeShape::Circle]
///
/// # Example
/// ```
/// use decaygraph::config::RunConfig;
/// use decaygraph::output::OutputFormat;
///
/// let config = RunConfig::new("events.lhe")
///     .with_max_events(10)
///     .with_format(OutputFormat::Svg)
///     .with_output_pattern("plots/event_");
///
/// assert_eq!(config.max_events(), 10);
/// assert_eq!(config.lookup_path().to_str(), Some("pdgnames.json.gz"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    input: PathBuf,
    max_events: usize,
    output_pattern: String,
    format: OutputFormat,
    lookup_path: PathBuf,
    renderer: String,
    node_shape: NodeShape,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl RunConfig {
    /// Creates a configuration reading from `input` with default settings.
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            max_events: DEFAULT_MAX_EVENTS,
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            format: OutputFormat::default(),
            lookup_path: PathBuf::from(DEFAULT_LOOKUP_PATH),
            renderer: DEFAULT_RENDERER.to_string(),
            node_shape: NodeShape::default(),
        }
    }

    /// Sets the maximum number of events to process.
    ///
    /// Fewer graphs are produced if the input holds fewer events.
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    /// Sets the output path prefix; files are named `<pattern><index>.<ext>`.
    pub fn with_output_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.output_pattern = pattern.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the gzip-compressed JSON identity table to load.
    pub fn with_lookup_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.lookup_path = path.into();
        self
    }

    /// Sets the Graphviz program used for image formats.
    pub fn with_renderer<S: Into<String>>(mut self, program: S) -> Self {
        self.renderer = program.into();
        self
    }

    pub fn with_node_shape(mut self, node_shape: NodeShape) -> Self {
        self.node_shape = node_shape;
        self
    }
}

// ============================================================================
// Getters (pub)
// ============================================================================
impl RunConfig {
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    pub fn output_pattern(&self) -> &str {
        &self.output_pattern
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn lookup_path(&self) -> &Path {
        &self.lookup_path
    }

    pub fn renderer(&self) -> &str {
        &self.renderer
    }

    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }
}
