use rand::SeedableRng as _;
use rand::rngs::StdRng;

use super::*;
use crate::diagnostics::MemoryDiagnostics;

fn render(fx: impl Into<Effect>) -> SoxResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(7);
    let diag = MemoryDiagnostics::new();
    let mut ctx = EffectCtx::new(&mut rng, &diag);
    fx.into().args(&mut ctx)
}

#[test]
fn unit_effects_render_their_name() {
    for fx in [Effect::Deemph, Effect::Earwax, Effect::Reverse, Effect::Swap] {
        assert_eq!(render(fx.clone()).unwrap(), vec![fx.name().to_string()]);
    }
}

#[test]
fn unsupported_effects_fail_with_their_name() {
    for u in Unsupported::ALL {
        let err = render(u).unwrap_err();
        assert!(matches!(err, SoxError::Unsupported(name) if name == u.name()));
    }
}

#[test]
fn names_match_leading_tokens() {
    let fx: Effect = Bass::new(3).into();
    assert_eq!(fx.name(), "bass");
    assert_eq!(render(fx).unwrap()[0], "bass");
}

#[test]
fn json_tag_selects_the_effect_and_fills_defaults() {
    let fx: Effect = serde_json::from_str(r#"{"effect": "highpass", "frequency": 1000}"#).unwrap();
    assert_eq!(
        render(fx).unwrap(),
        vec!["highpass", "-2", "1000", "0.707q"]
    );

    let fx: Effect = serde_json::from_str(r#"{"effect": "swap"}"#).unwrap();
    assert_eq!(fx, Effect::Swap);
}

#[test]
fn json_rejects_unknown_letters() {
    let err = serde_json::from_str::<Effect>(r#"{"effect": "rate", "samplerate": 8000, "quality": "x"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("quality"));
}

#[test]
fn helper_tokens_append_suffixes() {
    assert_eq!(q_token(Number::Float(2.0)), "2.0q");
    assert_eq!(slope_token(Number::Float(0.5)), "0.5s");
    assert_eq!(percent_token(Number::Int(1)), "1%");
}

#[test]
fn channels_needs_at_least_one() {
    assert_eq!(
        render(Channels { n_channels: 2 }).unwrap(),
        vec!["channels", "2"]
    );
    assert!(render(Channels { n_channels: 0 }).unwrap_err().is_validation());
}

#[test]
fn reverb_defaults_render_integers() {
    assert_eq!(
        render(Reverb::default()).unwrap(),
        vec!["reverb", "50", "50", "100", "100", "0", "0"]
    );
    let wet = Reverb {
        wet_only: true,
        reverberance: Number::Float(101.0),
        ..Reverb::default()
    };
    assert!(render(wet).unwrap_err().to_string().contains("reverberance"));
}

#[test]
fn json_rejects_unknown_parameters() {
    let err = serde_json::from_str::<Effect>(r#"{"effect": "pad", "start": 1}"#).unwrap_err();
    assert!(err.to_string().contains("start"));
    let fx: Effect = serde_json::from_str(r#"{"effect": "pad", "start_duration": 1}"#).unwrap();
    assert_eq!(render(fx).unwrap(), vec!["pad", "1", "0.0"]);
}
