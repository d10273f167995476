use rand::SeedableRng as _;
use rand::rngs::StdRng;

use super::*;
use crate::diagnostics::MemoryDiagnostics;

fn render_seeded(fx: &impl EffectSpec, seed: u64) -> SoxResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let diag = MemoryDiagnostics::new();
    fx.args(&mut EffectCtx::new(&mut rng, &diag))
}

#[test]
fn chorus_defaults_fill_every_voice() {
    let args = render_seeded(&Chorus::default(), 42).unwrap();
    assert_eq!(args[0], "chorus");
    assert_eq!(&args[1..3], ["0.5", "0.9"]);
    assert_eq!(args.len() - 1, 17);

    for voice in args[3..].chunks(5) {
        let delay: f64 = voice[0].parse().unwrap();
        let decay: f64 = voice[1].parse().unwrap();
        let speed: f64 = voice[2].parse().unwrap();
        let depth: f64 = voice[3].parse().unwrap();
        assert!((40.0..60.0).contains(&delay));
        assert!((0.3..0.4).contains(&decay));
        assert!((0.25..0.4).contains(&speed));
        assert!((1.0..3.0).contains(&depth));
        assert!(voice[4] == "-s" || voice[4] == "-t");
    }
}

#[test]
fn chorus_is_reproducible_under_a_seed() {
    let a = render_seeded(&Chorus::default(), 9).unwrap();
    let b = render_seeded(&Chorus::default(), 9).unwrap();
    assert_eq!(a, b);
}

#[test]
fn chorus_uses_supplied_lists_verbatim() {
    let fx = Chorus {
        n_voices: 1,
        delays: Some(vec![Number::Int(25)]),
        decays: Some(vec![Number::Float(0.4)]),
        speeds: Some(vec![Number::Float(0.25)]),
        depths: Some(vec![Number::Int(2)]),
        shapes: Some(vec![ChorusShape::Triangle]),
        ..Chorus::default()
    };
    assert_eq!(
        render_seeded(&fx, 0).unwrap(),
        vec!["chorus", "0.5", "0.9", "25", "0.4", "0.25", "2", "-t"]
    );
}

#[test]
fn chorus_rejects_mismatched_or_out_of_range_lists() {
    let fx = Chorus {
        delays: Some(vec![Number::Int(25)]),
        ..Chorus::default()
    };
    assert!(render_seeded(&fx, 0).unwrap_err().to_string().contains("delays"));

    let fx = Chorus {
        n_voices: 1,
        delays: Some(vec![Number::Int(10)]),
        ..Chorus::default()
    };
    assert!(render_seeded(&fx, 0).unwrap_err().to_string().contains(">= 20"));

    let fx = Chorus {
        n_voices: 0,
        ..Chorus::default()
    };
    assert!(render_seeded(&fx, 0).unwrap_err().is_validation());

    let fx = Chorus {
        gain_in: Number::Float(1.5),
        ..Chorus::default()
    };
    assert!(render_seeded(&fx, 0).unwrap_err().to_string().contains("gain_in"));
}

#[test]
fn chorus_shape_deserializes_from_letter() {
    let shapes: Vec<ChorusShape> = serde_json::from_str(r#"["s", "t"]"#).unwrap();
    assert_eq!(shapes, vec![ChorusShape::Sine, ChorusShape::Triangle]);
    assert!(serde_json::from_str::<ChorusShape>(r#""q""#).is_err());
}

#[test]
fn tremolo_depth_range() {
    assert_eq!(
        render_seeded(&Tremolo::default(), 0).unwrap(),
        vec!["tremolo", "6.0", "40.0"]
    );
    let fx = Tremolo {
        depth: Number::Int(0),
        ..Tremolo::default()
    };
    assert!(render_seeded(&fx, 0).unwrap_err().to_string().contains("depth"));
}
