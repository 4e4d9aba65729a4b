//! Conversion of DOT text into image files.

use crate::error::DecayGraphError;
use crate::output::OutputFormat;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Default Graphviz layout program
pub const DEFAULT_RENDERER: &str = "dot";

// =#========================================================================#=
// RENDERER (Trait)
// =#========================================================================T=
/// Turns DOT text into a file of the requested [OutputFormat].
///
/// Implementors must write the complete result to `dest` (which may already
/// exist as an empty file) or return an error.
pub trait Renderer {
    fn render(&self, dot: &str, format: OutputFormat, dest: &Path) -> Result<(), DecayGraphError>;
}

// =#========================================================================#=
// GRAPHVIZ RENDERER
// =#========================================================================#=
/// [Renderer] that pipes DOT text into an external Graphviz program,
/// invoked as `<program> -T<format> -o <dest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizRenderer {
    program: String,
}

impl GraphvizRenderer {
    /// Creates a renderer running `program` (e.g. `dot`, `neato`, or a full path).
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, reason: String) -> DecayGraphError {
        DecayGraphError::Render {
            program: self.program.clone(),
            reason,
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_RENDERER)
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, dot: &str, format: OutputFormat, dest: &Path) -> Result<(), DecayGraphError> {
        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.extension()))
            .arg("-o")
            .arg(dest)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("cannot start: {e}")))?;

        // stdin is fed concurrently with draining stdout/stderr; the child is always reaped
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(dot.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (output, writer.join())
        });

        let output = output.map_err(|e| self.failure(format!("cannot wait for process: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!("{} ({})", output.status, stderr.trim())));
        }
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.failure(format!("cannot write DOT input: {e}"))),
            Err(_) => return Err(self.failure("DOT input writer panicked".to_string())),
        }

        Ok(())
    }
}
