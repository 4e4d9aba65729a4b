use decaygraph::dot::{DotStyle, parse_dot_file};
use decaygraph::model::{IdentityLookup, NO_PARENT, ParticleRecord};
use decaygraph::output::{OutputFormat, OutputSink, Renderer};
use decaygraph::{DecayGraphError, Interrupt, RunConfig, process_records, run};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for Graphviz: writes a marker line followed by the DOT text.
#[derive(Default)]
struct FakeRenderer {
    calls: RefCell<Vec<OutputFormat>>,
}

impl Renderer for FakeRenderer {
    fn render(&self, dot: &str, format: OutputFormat, dest: &Path) -> Result<(), DecayGraphError> {
        self.calls.borrow_mut().push(format);
        fs::write(dest, format!("FAKE {format}\n{dot}")).map_err(|source| DecayGraphError::Io {
            path: dest.to_path_buf(),
            source,
        })
    }
}

/// Always fails, optionally triggering an interrupt first.
struct FailingRenderer {
    interrupt: Option<Interrupt>,
}

impl Renderer for FailingRenderer {
    fn render(&self, _: &str, _: OutputFormat, _: &Path) -> Result<(), DecayGraphError> {
        if let Some(interrupt) = &self.interrupt {
            interrupt.trigger();
        }
        Err(DecayGraphError::Render {
            program: "fake".to_string(),
            reason: "killed".to_string(),
        })
    }
}

fn lookup() -> IdentityLookup {
    [("22", "gamma"), ("111", "pi0"), ("23", "Z0"), ("13", "mu-"), ("-13", "mu+")]
        .into_iter()
        .collect()
}

fn two_events() -> Vec<ParticleRecord> {
    vec![
        ParticleRecord::new(0, 0, 111, NO_PARENT, 2),
        ParticleRecord::new(0, 1, 22, 0, 1),
        ParticleRecord::new(0, 2, 22, 0, 1),
        ParticleRecord::new(1, 0, 23, NO_PARENT, 2),
        ParticleRecord::new(1, 1, 13, 0, 1),
        ParticleRecord::new(1, 2, -13, 0, 1),
    ]
}

fn pattern(dir: &TempDir) -> String {
    format!("{}/output_", dir.path().display())
}

fn file_names(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// --- TESTS PROCESSING RECORDS ---
#[test]
fn test_two_events_yield_two_dot_files() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(OutputFormat::Dot, pattern(&dir), FakeRenderer::default());

    let summary = process_records(
        &two_events(),
        &lookup(),
        &sink,
        &DotStyle::default(),
        2,
        &Interrupt::new(),
    )
    .unwrap();

    assert_eq!(file_names(&dir), vec!["output_0.dot", "output_1.dot"]);
    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.observed_events, 2);
    assert_eq!(summary.requested_events, 2);
    assert_eq!(summary.advisory, None);
    assert!(!summary.interrupted);
    assert!(sink.renderer().calls.borrow().is_empty());

    let graph = parse_dot_file(&summary.written[1]).unwrap();
    assert_eq!(graph.title(), "Event 1");
    assert_eq!(graph.label(0), Some("Z0"));
    assert_eq!(graph.children(0), vec![1, 2]);
}

#[test]
fn test_image_formats_go_through_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(OutputFormat::Svg, pattern(&dir), FakeRenderer::default());

    let summary = process_records(
        &two_events(),
        &lookup(),
        &sink,
        &DotStyle::default(),
        5,
        &Interrupt::new(),
    )
    .unwrap();

    assert_eq!(file_names(&dir), vec!["output_0.svg", "output_1.svg"]);
    assert_eq!(*sink.renderer().calls.borrow(), vec![OutputFormat::Svg; 2]);
    let content = fs::read_to_string(&summary.written[0]).unwrap();
    assert!(content.starts_with("FAKE svg\ndigraph \"Event 0\" {"));

    // Fewer events than requested is only an advisory
    let advisory = summary.advisory.unwrap();
    assert_eq!((advisory.observed, advisory.requested), (2, 5));
}

#[test]
fn test_bound_smaller_than_input() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(OutputFormat::Dot, pattern(&dir), FakeRenderer::default());

    let summary = process_records(
        &two_events(),
        &lookup(),
        &sink,
        &DotStyle::default(),
        1,
        &Interrupt::new(),
    )
    .unwrap();

    assert_eq!(file_names(&dir), vec!["output_0.dot"]);
    assert!(summary.advisory.is_some());
}

#[test]
fn test_lookup_failure_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(OutputFormat::Dot, pattern(&dir), FakeRenderer::default());
    let mut records = two_events();
    records.push(ParticleRecord::new(1, 3, 424242, 0, 1));

    let result = process_records(
        &records,
        &lookup(),
        &sink,
        &DotStyle::default(),
        2,
        &Interrupt::new(),
    );

    assert!(matches!(
        result,
        Err(DecayGraphError::LookupFailure { code: 424242, event: 1, .. })
    ));
    // Event 0 was complete before the failure; nothing half-written for event 1
    assert_eq!(file_names(&dir), vec!["output_0.dot"]);
}

#[test]
fn test_render_failure_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(OutputFormat::Png, pattern(&dir), FailingRenderer { interrupt: None });

    let result = process_records(
        &two_events(),
        &lookup(),
        &sink,
        &DotStyle::default(),
        2,
        &Interrupt::new(),
    );

    assert!(matches!(result, Err(DecayGraphError::Render { .. })));
    assert!(file_names(&dir).is_empty());
}

#[cfg(unix)]
#[test]
fn test_output_files_get_default_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
    let plain = dir.path().join("plain.txt");
    fs::write(&plain, "digraph {}").unwrap();

    for format in [OutputFormat::Dot, OutputFormat::Png] {
        let sink = OutputSink::new(format, pattern(&dir), FakeRenderer::default());
        let summary = process_records(
            &two_events(),
            &lookup(),
            &sink,
            &DotStyle::default(),
            1,
            &Interrupt::new(),
        )
        .unwrap();

        assert_eq!(mode(&summary.written[0]), mode(&plain), "{format}");
    }
}

#[test]
fn test_missing_output_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = format!("{}/missing/output_", dir.path().display());
    let sink = OutputSink::new(OutputFormat::Dot, pattern, FakeRenderer::default());

    assert!(matches!(
        sink.write("digraph {}", 0),
        Err(DecayGraphError::Io { .. })
    ));
}

// --- TESTS INTERRUPT ---
#[test]
fn test_interrupt_before_first_event_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(OutputFormat::Dot, pattern(&dir), FakeRenderer::default());
    let interrupt = Interrupt::new();
    interrupt.trigger();

    let summary = process_records(
        &two_events(),
        &lookup(),
        &sink,
        &DotStyle::default(),
        2,
        &interrupt,
    )
    .unwrap();

    assert!(summary.interrupted);
    assert!(summary.written.is_empty());
    assert!(file_names(&dir).is_empty());
}

#[test]
fn test_error_after_interrupt_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let interrupt = Interrupt::new();
    let renderer = FailingRenderer {
        interrupt: Some(interrupt.clone()),
    };
    let sink = OutputSink::new(OutputFormat::Pdf, pattern(&dir), renderer);

    let summary = process_records(
        &two_events(),
        &lookup(),
        &sink,
        &DotStyle::default(),
        2,
        &interrupt,
    )
    .unwrap();

    assert!(summary.interrupted);
    assert!(summary.written.is_empty());
    assert!(file_names(&dir).is_empty());
}

// --- TESTS FULL RUN ---
fn write_lookup_table(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("pdgnames.json.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::fast());
    encoder
        .write_all(br#"{"22": "gamma", "111": "pi0", "23": "Z0", "13": "mu-", "-13": "mu+", "25": "H", "11": "e-"}"#)
        .unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn test_run_with_stub_source() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::new(Path::new("tests").join("fixtures").join("stub_events.txt"))
        .with_lookup_path(write_lookup_table(&dir))
        .with_output_pattern(pattern(&dir))
        .with_format(OutputFormat::Dot);

    let summary = run(&config, &Interrupt::new()).unwrap();

    assert_eq!(summary.observed_events, 1);
    assert_eq!(summary.requested_events, 2);
    assert!(summary.advisory.is_some());
    assert_eq!(file_names(&dir), vec!["output_0.dot", "pdgnames.json.gz"]);

    let dot = fs::read_to_string(&summary.written[0]).unwrap();
    assert_eq!(
        dot,
        "digraph \"Event 0\" {\n    0 [label=\"gamma\", shape=circle];\n}\n"
    );
}

#[test]
fn test_run_with_json_lines_source() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::new(Path::new("tests").join("fixtures").join("two_events.jsonl"))
        .with_lookup_path(write_lookup_table(&dir))
        .with_output_pattern(pattern(&dir))
        .with_format(OutputFormat::Dot)
        .with_node_shape(decaygraph::dot::NodeShape::Ellipse);

    let summary = run(&config, &Interrupt::new()).unwrap();

    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.advisory, None);
    let dot = fs::read_to_string(&summary.written[1]).unwrap();
    assert!(dot.contains("0 [label=\"H\", shape=ellipse];"));
    assert!(dot.contains("1 -> 3;"));
}

#[test]
fn test_run_rejects_unknown_format_before_anything_else() {
    let dir = tempfile::tempdir().unwrap();
    // Neither input nor lookup table exist; the extension check comes first
    let config = RunConfig::new("events.root")
        .with_lookup_path(dir.path().join("missing.json.gz"))
        .with_output_pattern(pattern(&dir));

    assert!(matches!(
        run(&config, &Interrupt::new()),
        Err(DecayGraphError::SourceFormatUnrecognized { .. })
    ));
    assert!(file_names(&dir).is_empty());
}

#[test]
fn test_run_with_missing_lookup_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::new(Path::new("tests").join("fixtures").join("stub_events.txt"))
        .with_lookup_path(dir.path().join("missing.json.gz"))
        .with_output_pattern(pattern(&dir));

    assert!(matches!(
        run(&config, &Interrupt::new()),
        Err(DecayGraphError::LookupTableLoad { .. })
    ));
}

#[test]
fn test_run_after_interrupt_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::new(Path::new("tests").join("fixtures").join("stub_events.txt"))
        .with_lookup_path(dir.path().join("missing.json.gz"))
        .with_output_pattern(pattern(&dir));
    let interrupt = Interrupt::new();
    interrupt.trigger();

    let summary = run(&config, &interrupt).unwrap();
    assert!(summary.interrupted);
    assert!(summary.written.is_empty());
}
