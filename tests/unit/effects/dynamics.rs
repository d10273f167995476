use rand::SeedableRng as _;
use rand::rngs::StdRng;

use super::*;
use crate::diagnostics::MemoryDiagnostics;

fn render_with(fx: &impl EffectSpec, diag: &MemoryDiagnostics) -> SoxResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(0);
    fx.args(&mut EffectCtx::new(&mut rng, diag))
}

fn render(fx: &impl EffectSpec) -> SoxResult<Vec<String>> {
    render_with(fx, &MemoryDiagnostics::new())
}

fn pt(x: i64, y: i64) -> (Number, Number) {
    (Number::Int(x), Number::Int(y))
}

#[test]
fn compand_default_curve() {
    assert_eq!(
        render(&Compand::default()).unwrap(),
        vec!["compand", "0.3,0.8", "6.0:-70,-70,-60,-20,0,0"]
    );
}

#[test]
fn compand_sorts_points_by_input_level() {
    let fx = Compand {
        soft_knee_db: None,
        tf_points: vec![pt(0, 0), pt(-70, -70), pt(-40, -30)],
        ..Compand::default()
    };
    assert_eq!(
        render(&fx).unwrap(),
        vec!["compand", "0.3,0.8", "-70,-70,-40,-30,0,0"]
    );
}

#[test]
fn compand_rejects_duplicate_inputs_and_positive_levels() {
    let fx = Compand {
        tf_points: vec![pt(-60, -20), pt(-60, -30)],
        ..Compand::default()
    };
    assert!(render(&fx).unwrap_err().to_string().contains("duplicate"));

    let fx = Compand {
        tf_points: vec![pt(-60, -20), pt(3, 0)],
        ..Compand::default()
    };
    assert!(render(&fx).unwrap_err().is_validation());

    let fx = Compand {
        tf_points: vec![],
        ..Compand::default()
    };
    assert!(render(&fx).unwrap_err().is_validation());
}

#[test]
fn compand_warns_when_attack_exceeds_decay() {
    let diag = MemoryDiagnostics::new();
    let fx = Compand {
        attack_time: Number::Float(1.0),
        decay_time: Number::Float(0.5),
        ..Compand::default()
    };
    render_with(&fx, &diag).unwrap();
    let warnings = diag.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("attack_time"));
}

#[test]
fn contrast_and_dcshift_ranges() {
    assert_eq!(
        render(&Contrast::default()).unwrap(),
        vec!["contrast", "75"]
    );
    assert!(
        render(&Contrast {
            amount: Number::Int(101)
        })
        .is_err()
    );
    assert!(
        render(&Dcshift {
            shift: Number::Float(-2.5)
        })
        .unwrap_err()
        .to_string()
        .contains("shift")
    );
}

#[test]
fn gain_flags_precede_the_value() {
    let fx = Gain {
        gain_db: Number::Float(-1.0),
        normalize: true,
        limiter: true,
        balance: Some(GainBalance::BalanceGuarded),
    };
    assert_eq!(
        render(&fx).unwrap(),
        vec!["gain", "-B", "-n", "-l", "-1.0"]
    );

    let plain = Gain {
        normalize: false,
        ..Gain::default()
    };
    assert_eq!(render(&plain).unwrap(), vec!["gain", "0.0"]);
}

#[test]
fn gain_balance_parses_letters_only() {
    assert_eq!("e".parse::<GainBalance>().unwrap(), GainBalance::Equalize);
    let err = "x".parse::<GainBalance>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("balance"));
}

#[test]
fn loudness_reference_level_range() {
    assert_eq!(
        render(&Loudness::default()).unwrap(),
        vec!["loudness", "-10.0", "65.0"]
    );
    let fx = Loudness {
        reference_level: Number::Int(80),
        ..Loudness::default()
    };
    assert!(render(&fx).unwrap_err().to_string().contains("reference_level"));
}

#[test]
fn norm_and_overdrive_render_floats() {
    assert_eq!(render(&Norm::default()).unwrap(), vec!["norm", "-3.0"]);
    assert_eq!(
        render(&Overdrive::default()).unwrap(),
        vec!["overdrive", "20.0", "20.0"]
    );
    let fx = Norm {
        db_level: Number::Float(f64::NAN),
    };
    assert!(render(&fx).is_err());
}
