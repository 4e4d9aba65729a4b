use clap::Parser;
use decaygraph::config::{DEFAULT_LOOKUP_PATH, DEFAULT_MAX_EVENTS};
use decaygraph::dot::NodeShape;
use decaygraph::output::{DEFAULT_OUTPUT_PATTERN, DEFAULT_RENDERER, OutputFormat};
use decaygraph::{Interrupt, RunConfig, run};
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;

/// Draws the decay chain of each Monte-Carlo event as a graph.
#[derive(Parser, Debug)]
#[command(name = "decaygraph", version, author, long_about = None)]
struct Cli {
    /// Maximum number of events to process
    #[arg(short, long, default_value_t = DEFAULT_MAX_EVENTS)]
    max_events: usize,

    /// Input file (.txt, .json, .jsonl or .lhe)
    #[arg(short, long)]
    in_file: PathBuf,

    /// Output path prefix, files are named <pattern><event>.<extension>
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATTERN)]
    out_pattern: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    extension: OutputFormat,

    /// Gzip-compressed JSON table of particle names by identity code
    #[arg(long, env = "DECAYGRAPH_PDG_TABLE", default_value = DEFAULT_LOOKUP_PATH)]
    pdg_table: PathBuf,

    /// Graphviz program used to render images
    #[arg(long, env = "DECAYGRAPH_RENDERER", default_value = DEFAULT_RENDERER)]
    renderer: String,

    /// Shape of the graph nodes
    #[arg(long, value_enum, default_value_t = NodeShape::Circle)]
    node_shape: NodeShape,

    /// Log per-file details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    fn into_config(self) -> RunConfig {
        RunConfig::new(self.in_file)
            .with_max_events(self.max_events)
            .with_output_pattern(self.out_pattern)
            .with_format(self.extension)
            .with_lookup_path(self.pdg_table)
            .with_renderer(self.renderer)
            .with_node_shape(self.node_shape)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    let interrupt = Interrupt::install().unwrap_or_else(|e| {
        warn!("Cannot install interrupt handler: {e}");
        Interrupt::new()
    });

    let config = cli.into_config();
    match run(&config, &interrupt) {
        Ok(summary) if summary.interrupted => ExitCode::SUCCESS,
        Ok(summary) => {
            println!(
                "Processed {} events; requested at most {}",
                summary.observed_events, summary.requested_events
            );
            println!("Wrote {} graph file(s)", summary.written.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
