use std::path::PathBuf;
use std::sync::Mutex;

use super::*;
use crate::diagnostics::{Level, MemoryDiagnostics};
use crate::engine::EngineOutput;
use crate::format::FormatFields;

#[derive(Default)]
struct FakeEngine {
    status: i32,
    stdout: Option<String>,
    stderr: Option<String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl Engine for FakeEngine {
    fn execute(&self, args: &[String]) -> SoxResult<EngineOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(EngineOutput {
            status: self.status,
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        })
    }
}

#[derive(Default)]
struct FakePlayer {
    calls: Mutex<Vec<Vec<String>>>,
}

impl Player for FakePlayer {
    fn play(&self, args: &[String]) -> SoxResult<()> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

fn scratch_input(name: &str) -> (PathBuf, PathBuf) {
    let dir = PathBuf::from("target").join("transform").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("in.wav");
    std::fs::write(&input, b"RIFF").unwrap();
    (input, dir.join("out.wav"))
}

fn quiet() -> Transformer {
    Transformer::new()
        .with_seed(1)
        .with_diagnostics(Arc::new(MemoryDiagnostics::new()))
}

#[test]
fn fresh_transformer_has_default_globals_only() {
    let tfm = quiet();
    assert_eq!(tfm.globals(), ["-D", "-V2"]);
    assert!(tfm.input_format().is_empty());
    assert!(tfm.output_format().is_empty());
    assert!(tfm.effects().is_empty());
    assert!(tfm.effects_log().is_empty());
}

#[test]
fn args_follow_engine_order() {
    let mut tfm = quiet();
    tfm.set_input_format(&InputFormat {
        fields: FormatFields {
            channels: Some(2),
            ..FormatFields::default()
        },
        ignore_length: false,
    })
    .unwrap();
    tfm.set_output_format(&OutputFormat {
        fields: FormatFields {
            bits: Some(16),
            ..FormatFields::default()
        },
        comments: None,
        append_comments: true,
    })
    .unwrap();
    tfm.reverse().unwrap();

    let args = tfm.args(Path::new("in.wav"), Path::new("out.wav")).unwrap();
    assert_eq!(
        args,
        vec!["-D", "-V2", "-c", "2", "in.wav", "-b", "16", "out.wav", "reverse"]
    );
}

#[test]
fn effects_append_in_call_order_and_log_names() {
    let mut tfm = quiet();
    tfm.highpass(100, 0.707, 2)
        .unwrap()
        .trim(0, 10)
        .unwrap()
        .swap()
        .unwrap();
    assert_eq!(
        tfm.effects(),
        ["highpass", "-2", "100", "0.707q", "trim", "0", "10", "swap"]
    );
    assert_eq!(tfm.effects_log(), ["highpass", "trim", "swap"]);
}

#[test]
fn failed_effect_leaves_state_untouched() {
    let mut tfm = quiet();
    tfm.norm(-3.0).unwrap();
    let before = (tfm.effects().to_vec(), tfm.effects_log().to_vec());

    assert!(tfm.allpass(0, 2.0).unwrap_err().is_validation());
    assert!(tfm.trim(5, 5).is_err());
    assert!(tfm.chorus(Chorus {
        n_voices: 2,
        delays: Some(vec![Number::Int(30)]),
        ..Chorus::default()
    })
    .is_err());

    assert_eq!(tfm.effects(), before.0.as_slice());
    assert_eq!(tfm.effects_log(), before.1.as_slice());
}

#[test]
fn noop_fade_is_not_logged() {
    let mut tfm = quiet();
    tfm.fade(0, 0, FadeShape::default()).unwrap();
    assert!(tfm.effects().is_empty());
    assert!(tfm.effects_log().is_empty());

    tfm.fade(0, 2, FadeShape::Logarithmic).unwrap();
    assert_eq!(tfm.effects_log(), ["fade"]);
    assert_eq!(tfm.effects(), ["reverse", "fade", "l", "2", "reverse"]);
}

#[test]
fn unsupported_methods_fail_without_mutation() {
    let mut tfm = quiet();
    let err = tfm.flanger().unwrap_err();
    assert!(matches!(err, SoxError::Unsupported("flanger")));
    assert!(tfm.speed().is_err());
    assert!(tfm.effects().is_empty());
    assert!(tfm.effects_log().is_empty());
}

#[test]
fn setters_replace_their_section() {
    let mut tfm = quiet();
    tfm.set_globals(&GlobalOptions {
        guard: true,
        ..GlobalOptions::default()
    })
    .unwrap();
    tfm.set_globals(&GlobalOptions {
        verbosity: 0,
        ..GlobalOptions::default()
    })
    .unwrap();
    assert_eq!(tfm.globals(), ["-D", "-V0"]);

    let bad = GlobalOptions {
        verbosity: 9,
        ..GlobalOptions::default()
    };
    assert!(tfm.set_globals(&bad).is_err());
    assert_eq!(tfm.globals(), ["-D", "-V0"]);
}

#[test]
fn convert_extends_output_format_and_adds_rate() {
    let mut tfm = quiet();
    tfm.set_output_format(&OutputFormat {
        fields: FormatFields {
            file_type: Some("wav".to_string()),
            ..FormatFields::default()
        },
        comments: None,
        append_comments: true,
    })
    .unwrap();
    tfm.convert(Some(Number::Int(8000)), Some(1), Some(16)).unwrap();

    assert_eq!(tfm.output_format(), ["-t", "wav", "-b", "16", "-c", "1"]);
    assert_eq!(tfm.effects(), ["rate", "-h", "8000"]);
    assert_eq!(tfm.effects_log(), ["rate"]);
}

#[test]
fn convert_validates_everything_first() {
    let mut tfm = quiet();
    assert!(tfm.convert(Some(Number::Int(8000)), Some(1), Some(12)).is_err());
    assert!(tfm.convert(Some(Number::Int(0)), Some(1), Some(16)).is_err());
    assert!(tfm.convert(None, Some(0), Some(16)).is_err());
    assert!(tfm.output_format().is_empty());
    assert!(tfm.effects().is_empty());

    tfm.convert(None, None, None).unwrap();
    assert!(tfm.output_format().is_empty());
    assert!(tfm.effects_log().is_empty());
}

#[test]
fn seeded_chorus_is_reproducible() {
    let mut a = Transformer::new().with_seed(5);
    let mut b = Transformer::new().with_seed(5);
    a.chorus(Chorus::default()).unwrap();
    b.chorus(Chorus::default()).unwrap();
    assert_eq!(a.effects(), b.effects());
    assert_eq!(a.effects().len(), 18);
}

#[test]
fn extreme_pitch_warns_through_the_sink() {
    let diag = MemoryDiagnostics::new();
    let mut tfm = Transformer::new().with_diagnostics(Arc::new(diag.clone()));
    tfm.pitch(-13, false).unwrap();
    assert_eq!(tfm.effects(), ["pitch", "-1300.0"]);
    assert_eq!(diag.warnings().len(), 1);
}

#[test]
fn build_runs_engine_with_assembled_args() {
    let (input, output) = scratch_input("build_ok");
    let engine = Arc::new(FakeEngine {
        stdout: Some("done".to_string()),
        ..FakeEngine::default()
    });
    let diag = MemoryDiagnostics::new();
    let mut tfm = quiet()
        .with_engine(engine.clone())
        .with_diagnostics(Arc::new(diag.clone()));
    tfm.gain(Gain::default()).unwrap().reverse().unwrap();

    tfm.build(&input, &output).unwrap();

    let calls = engine.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], tfm.args(&input, &output).unwrap());

    let infos: Vec<String> = diag
        .messages()
        .into_iter()
        .filter(|(level, _)| *level == Level::Info)
        .map(|(_, m)| m)
        .collect();
    assert_eq!(infos.len(), 2);
    assert!(infos[0].contains("gain reverse"));
    assert!(infos[0].contains("out.wav"));
    assert!(infos[1].contains("done"));
}

#[test]
fn build_reports_engine_failure_with_stderr() {
    let (input, output) = scratch_input("build_fail");
    let engine = Arc::new(FakeEngine {
        status: 1,
        stderr: Some("sox FAIL formats: can't open input file".to_string()),
        ..FakeEngine::default()
    });
    let tfm = quiet().with_engine(engine);

    let err = tfm.build(&input, &output).unwrap_err();
    match &err {
        SoxError::Engine { status, stderr, .. } => {
            assert_eq!(*status, 1);
            assert!(stderr.as_deref().unwrap_or_default().contains("FAIL"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("can't open input file"));
}

#[test]
fn build_checks_paths_before_running() {
    let (_, output) = scratch_input("build_missing");
    let engine = Arc::new(FakeEngine::default());
    let tfm = quiet().with_engine(engine.clone());

    let missing = output.with_file_name("missing.wav");
    let err = tfm.build(&missing, &output).unwrap_err();
    assert!(matches!(err, SoxError::Path(_)));
    assert!(engine.calls.lock().unwrap().is_empty());
}

#[test]
fn build_is_repeatable() {
    let (input, output) = scratch_input("build_twice");
    let engine = Arc::new(FakeEngine::default());
    let mut tfm = quiet().with_engine(engine.clone());
    tfm.earwax().unwrap();
    tfm.build(&input, &output).unwrap();
    tfm.build(&input, &output).unwrap();
    assert_eq!(engine.calls.lock().unwrap().len(), 2);
    assert_eq!(tfm.effects_log(), ["earwax"]);
}

#[test]
fn preview_passes_play_args_to_player() {
    let player = Arc::new(FakePlayer::default());
    let mut tfm = quiet().with_player(player.clone());
    tfm.tremolo(6, 40).unwrap();
    tfm.preview(Path::new("in.wav")).unwrap();

    let calls = player.calls.lock().unwrap();
    assert_eq!(
        calls[0],
        vec!["play", "--no-show-progress", "-D", "-V2", "in.wav", "tremolo", "6", "40"]
    );
}

#[cfg(unix)]
#[test]
fn non_utf8_paths_are_rejected_before_the_engine_runs() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt as _;

    let dir = PathBuf::from("target").join("transform").join("non_utf8");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join(OsStr::from_bytes(b"in\xff.wav"));
    std::fs::write(&input, b"RIFF").unwrap();
    let output = dir.join("out.wav");

    let engine = Arc::new(FakeEngine::default());
    let player = Arc::new(FakePlayer::default());
    let tfm = quiet().with_engine(engine.clone()).with_player(player.clone());

    assert!(matches!(
        tfm.build(&input, &output).unwrap_err(),
        SoxError::Path(_)
    ));
    assert!(engine.calls.lock().unwrap().is_empty());

    assert!(matches!(tfm.args(&input, &output).unwrap_err(), SoxError::Path(_)));
    assert!(matches!(tfm.preview(&input).unwrap_err(), SoxError::Path(_)));
    assert!(player.calls.lock().unwrap().is_empty());
}
