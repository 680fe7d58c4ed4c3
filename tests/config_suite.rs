use clap::Parser;
use tui_patterns::config::{Config, PatternKind, RendererMode};
use tui_patterns::pattern::params::{MAX_BRANCH_COUNT, MAX_TREE_DEPTH};
use tui_patterns::pattern::{
    ColorMode, FlowFieldParameters, ParamError, ParamsFile, ParamsFileError, SpirographParameters,
    TreeParameters,
};

fn invalid_field(text: &str) -> &'static str {
    match ParamsFile::parse(text) {
        Err(ParamsFileError::Invalid(ParamError::OutOfRange { field, .. })) => field,
        other => panic!("expected a range error for {text:?}, got {other:?}"),
    }
}

// ── Defaults ────────────────────────────────────────────────────────────────

#[test]
fn defaults_match_the_reference_scene() {
    let t = TreeParameters::default();
    assert_eq!((t.branch_angle_degrees, t.depth, t.branch_count), (25.0, 8, 2));
    assert_eq!((t.length_ratio, t.thickness), (0.67, 10.0));

    let s = SpirographParameters::default();
    assert_eq!((s.outer_radius, s.inner_radius, s.offset, s.speed), (200.0, 100.0, 50.0, 1.0));
    assert_eq!(s.iterations, 1000);

    let f = FlowFieldParameters::default();
    assert_eq!((f.particle_count, f.step_count), (100, 100));
    assert_eq!((f.noise_scale, f.flow_strength, f.alpha), (0.01, 2.0, 0.5));

    let c = ColorMode::default();
    assert!(c.rainbow);
    assert_eq!(c.base_hue, 200.0);

    assert!(ParamsFile::default().validate().is_ok());
}

// ── Params file ─────────────────────────────────────────────────────────────

#[test]
fn parses_overrides_and_keeps_other_defaults() {
    let text = "\
# slow spiral
pattern = spiro
spiro.inner=60
spiro.offset = 80.5
tree.depth=10

color.rainbow=off
color.hue=30
";
    let file = ParamsFile::parse(text).unwrap();
    assert_eq!(file.pattern, Some(PatternKind::Spirograph));
    assert_eq!(file.spirograph.inner_radius, 60.0);
    assert_eq!(file.spirograph.offset, 80.5);
    assert_eq!(file.spirograph.outer_radius, 200.0);
    assert_eq!(file.tree.depth, 10);
    assert_eq!(file.tree.branch_count, 2);
    assert!(!file.color.rainbow);
    assert_eq!(file.color.base_hue, 30.0);
    assert_eq!(file.flow, FlowFieldParameters::default());
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(ParamsFile::parse("").unwrap(), ParamsFile::default());
    assert_eq!(ParamsFile::parse("\n# nothing\n  \n").unwrap(), ParamsFile::default());
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = ParamsFile::parse("tree.depth=3\ntree.depth=4\n").unwrap_err();
    match err {
        ParamsFileError::Parse { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("duplicate"), "{message}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_keys_and_bad_values_are_parse_errors() {
    for (text, line) in [
        ("tree.colour=1", 1),
        ("tree.depth=ten", 1),
        ("\nflow.alpha=NaN", 2),
        ("color.rainbow=maybe", 1),
        ("pattern=mandala", 1),
        ("just words", 1),
    ] {
        match ParamsFile::parse(text) {
            Err(ParamsFileError::Parse { line: got, .. }) => assert_eq!(got, line, "{text:?}"),
            other => panic!("{text:?} gave {other:?}"),
        }
    }
}

#[test]
fn out_of_range_values_name_their_field() {
    assert_eq!(invalid_field("spiro.inner=0"), "spiro.inner");
    assert_eq!(invalid_field("spiro.outer=-5"), "spiro.outer");
    assert_eq!(invalid_field(&format!("tree.depth={}", MAX_TREE_DEPTH + 1)), "tree.depth");
    assert_eq!(invalid_field("tree.branches=0"), "tree.branches");
    assert_eq!(invalid_field(&format!("tree.branches={}", MAX_BRANCH_COUNT + 1)), "tree.branches");
    assert_eq!(invalid_field("tree.ratio=1"), "tree.ratio");
    assert_eq!(invalid_field("spiro.iterations=0"), "spiro.iterations");
    assert_eq!(invalid_field("flow.particles=0"), "flow.particles");
    assert_eq!(invalid_field("flow.steps=5000"), "flow.steps");
    assert_eq!(invalid_field("flow.alpha=1.5"), "flow.alpha");
    assert_eq!(invalid_field("flow.jitter=-0.1"), "flow.jitter");
    assert_eq!(invalid_field("color.hue=360"), "color.hue");
}

#[test]
fn boundary_values_are_accepted() {
    let text = format!("tree.depth={MAX_TREE_DEPTH}\ntree.branches={MAX_BRANCH_COUNT}\nflow.alpha=1\nflow.jitter=0\ncolor.hue=0");
    assert!(ParamsFile::parse(&text).is_ok());
}

#[test]
fn written_file_reads_back_identically() {
    let mut file = ParamsFile {
        pattern: Some(PatternKind::Flow),
        ..ParamsFile::default()
    };
    file.tree.depth = 5;
    file.flow.jitter = 0.0;
    file.flow.noise_scale = 0.025;
    file.color.rainbow = false;
    file.color.base_hue = 312.5;

    let text = file.to_text();
    assert!(text.contains("pattern=flow"));
    assert_eq!(ParamsFile::parse(&text).unwrap(), file);
}

#[test]
fn load_reports_missing_file_as_io_error() {
    let err = ParamsFile::load("/definitely/not/here/params.txt").unwrap_err();
    assert!(matches!(err, ParamsFileError::Io(_)), "{err}");
}

#[test]
fn load_reads_params_from_disk() {
    let path = std::env::temp_dir().join(format!("tui_patterns_params_{}.txt", std::process::id()));
    std::fs::write(&path, "pattern=tree\ntree.branches=3\n").unwrap();
    let file = ParamsFile::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(file.pattern, Some(PatternKind::Tree));
    assert_eq!(file.tree.branch_count, 3);
}

// ── Command line ────────────────────────────────────────────────────────────

#[test]
fn cli_defaults() {
    let cfg = Config::try_parse_from(["tui-patterns"]).unwrap();
    assert_eq!(cfg.pattern, None);
    assert_eq!(cfg.renderer, RendererMode::HalfBlock);
    assert_eq!(cfg.fps, 60);
    assert!(cfg.sync_updates);
    assert!(!cfg.paused && !cfg.mono);
    assert!(cfg.seed.is_none() && cfg.hue.is_none() && cfg.params.is_none());
}

#[test]
fn cli_accepts_pattern_aliases_and_renderers() {
    let cfg = Config::try_parse_from([
        "tui-patterns",
        "--pattern",
        "spiro",
        "--renderer",
        "braille",
        "--seed",
        "42",
        "--hue",
        "90",
        "--paused",
        "--sync-updates",
        "false",
    ])
    .unwrap();
    assert_eq!(cfg.pattern, Some(PatternKind::Spirograph));
    assert_eq!(cfg.renderer, RendererMode::Braille);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.hue, Some(90.0));
    assert!(cfg.paused);
    assert!(!cfg.sync_updates);

    let cfg = Config::try_parse_from(["tui-patterns", "--pattern", "flow-field", "--renderer", "half-block"]).unwrap();
    assert_eq!(cfg.pattern, Some(PatternKind::Flow));
    assert_eq!(cfg.renderer, RendererMode::HalfBlock);

    assert!(Config::try_parse_from(["tui-patterns", "--pattern", "mandala"]).is_err());
}

#[test]
fn pattern_cycle_and_names() {
    let mut p = PatternKind::Tree;
    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(p.label());
        p = p.next();
    }
    assert_eq!(p, PatternKind::Tree);
    assert_eq!(seen, ["Tree", "Spirograph", "Flow"]);
    assert_eq!(PatternKind::from_name(" FlowField "), Some(PatternKind::Flow));
    assert_eq!(RendererMode::Braille.cell_pixels(), (2, 4));
}

#[test]
fn tiny_terminals_are_refused() {
    use tui_patterns::terminal::check_size;
    assert!(check_size((4, 2)).is_ok());
    assert!(check_size((3, 40)).is_err());
    let err = check_size((80, 1)).unwrap_err();
    assert!(err.to_string().contains("80x1"), "{err}");
}
