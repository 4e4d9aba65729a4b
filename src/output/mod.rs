//! Output of serialized decay graphs as files.
//!
//! Each event's DOT text becomes one file `<pattern><event index>.<ext>`.
//! The [OutputFormat] `dot` stores the text as is; all image formats go
//! through a [Renderer], by default the external [GraphvizRenderer].
//!
//! Files are written to a temporary file next to the target first and then
//! renamed onto the target, so an aborted run never leaves a truncated
//! output file behind. Missing parent directories are not created.

pub mod renderer;

pub use self::renderer::{DEFAULT_RENDERER, GraphvizRenderer, Renderer};

use crate::error::DecayGraphError;
use log::debug;
use std::fmt;
#[cfg(unix)]
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Default prefix of output file names
pub const DEFAULT_OUTPUT_PATTERN: &str = "output_";

/// Mode requested for output files, before the umask applies (as for `File::create`)
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o666;

// =#========================================================================#=
// OUTPUT FORMAT
// =#========================================================================€=
/// File format of emitted graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Pdf,
    Svg,
    /// Plain DOT text, no renderer involved
    Dot,
}

impl OutputFormat {
    /// Returns the file extension, which is also the Graphviz `-T` format name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
        }
    }

    /// Whether files of this format are produced by a [Renderer].
    pub fn needs_renderer(&self) -> bool {
        !matches!(self, OutputFormat::Dot)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// =#========================================================================#=
// OUTPUT SINK
// =#========================================================================#=
/// Writes DOT text of numbered events to `<pattern><index>.<ext>`.
///
/// # Example
/// ```
/// use decaygraph::output::{GraphvizRenderer, OutputFormat, OutputSink};
/// use std::path::PathBuf;
///
/// let sink = OutputSink::new(OutputFormat::Svg, "plots/event_", GraphvizRenderer::default());
/// assert_eq!(sink.output_path(3), PathBuf::from("plots/event_3.svg"));
/// ```
#[derive(Debug, Clone)]
pub struct OutputSink<R: Renderer> {
    format: OutputFormat,
    pattern: String,
    renderer: R,
}

impl<R: Renderer> OutputSink<R> {
    /// Creates a sink.
    ///
    /// # Arguments
    /// * `format` - Format of all written files
    /// * `pattern` - Path prefix, the event index and extension get appended
    /// * `renderer` - Used for every format except [OutputFormat::Dot]
    pub fn new<S: Into<String>>(format: OutputFormat, pattern: S, renderer: R) -> Self {
        Self {
            format,
            pattern: pattern.into(),
            renderer,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the path the graph of event `event_index` is written to.
    pub fn output_path(&self, event_index: usize) -> PathBuf {
        PathBuf::from(format!(
            "{}{}.{}",
            self.pattern,
            event_index,
            self.format.extension()
        ))
    }

    /// Writes `dot` as the output file of event `event_index`.
    ///
    /// # Returns
    /// Path of the written file
    ///
    /// # Errors
    /// [DecayGraphError::Io] if the temporary file cannot be created, written
    /// or moved into place, [DecayGraphError::Render] if rendering fails.
    pub fn write(&self, dot: &str, event_index: usize) -> Result<PathBuf, DecayGraphError> {
        let target = self.output_path(event_index);
        let mut builder = tempfile::Builder::new();
        builder.prefix(".decaygraph-").suffix(".part");
        // Temp files default to 0600
        #[cfg(unix)]
        builder.permissions(fs::Permissions::from_mode(OUTPUT_FILE_MODE));
        let mut temp = builder
            .tempfile_in(target_dir(&target))
            .map_err(|e| DecayGraphError::io(&target, e))?;

        if self.format.needs_renderer() {
            self.renderer.render(dot, self.format, temp.path())?;
        } else {
            temp.write_all(dot.as_bytes())
                .and_then(|_| temp.flush())
                .map_err(|e| DecayGraphError::io(&target, e))?;
        }

        temp.persist(&target)
            .map_err(|e| DecayGraphError::io(&target, e.error))?;
        debug!("Wrote {}", target.display());

        Ok(target)
    }
}

/// Directory holding `target`; the working directory for bare file names.
fn target_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
