use rand::Rng as _;

use crate::effects::{EffectCtx, EffectSpec};
use crate::foundation::check;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::{Number, tok};

letter_enum! {
    /// Chorus voice modulation waveform.
    pub enum ChorusShape ("shapes") {
        /// Sinusoidal modulation.
        Sine => "s",
        /// Triangular modulation.
        Triangle => "t",
    }
}

/// Multi-voice chorus.
///
/// Each per-voice list is either supplied in full (`len == n_voices`) or left as `None`, in which
/// case every voice gets a value drawn from the context's random source.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Chorus {
    /// Input gain in `(0, 1]`.
    pub gain_in: Number,
    /// Output gain in `(0, 1]`.
    pub gain_out: Number,
    /// Number of voices.
    pub n_voices: u32,
    /// Per-voice delay in ms, each `>= 20`. Random default: 40..60.
    pub delays: Option<Vec<Number>>,
    /// Per-voice decay in `(0, 1]`. Random default: 0.3..0.4.
    pub decays: Option<Vec<Number>>,
    /// Per-voice modulation speed in Hz, `> 0`. Random default: 0.25..0.4.
    pub speeds: Option<Vec<Number>>,
    /// Per-voice modulation depth in ms, `> 0`. Random default: 1..3.
    pub depths: Option<Vec<Number>>,
    /// Per-voice modulation shape. Random default: sine or triangle.
    pub shapes: Option<Vec<ChorusShape>>,
}

impl Default for Chorus {
    fn default() -> Self {
        Self {
            gain_in: Number::Float(0.5),
            gain_out: Number::Float(0.9),
            n_voices: 3,
            delays: None,
            decays: None,
            speeds: None,
            depths: None,
            shapes: None,
        }
    }
}

fn check_len<T>(field: &str, values: &[T], n_voices: usize) -> SoxResult<()> {
    if values.len() != n_voices {
        return Err(SoxError::validation(format!(
            "the length of {field} must equal n_voices"
        )));
    }
    Ok(())
}

fn per_voice(
    field: &str,
    given: Option<&Vec<Number>>,
    n_voices: usize,
    valid: impl Fn(f64) -> bool,
    rule: &str,
) -> SoxResult<Option<Vec<Number>>> {
    let Some(values) = given else {
        return Ok(None);
    };
    check_len(field, values, n_voices)?;
    for &v in values {
        let x = check::finite(field, v)?;
        if !valid(x) {
            return Err(SoxError::validation(format!(
                "the elements of {field} must be {rule}"
            )));
        }
    }
    Ok(Some(values.clone()))
}

fn random_voices(ctx: &mut EffectCtx<'_>, n: usize, lo: f64, hi: f64) -> Vec<Number> {
    (0..n)
        .map(|_| Number::Float(ctx.rng.random_range(lo..hi)))
        .collect()
}

impl EffectSpec for Chorus {
    const NAME: &'static str = "chorus";

    fn args(&self, ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::in_open_closed("gain_in", self.gain_in, 1.0)?;
        check::in_open_closed("gain_out", self.gain_out, 1.0)?;
        let n = check::positive_count("n_voices", self.n_voices)? as usize;

        let delays = per_voice("delays", self.delays.as_ref(), n, |x| x >= 20.0, ">= 20")?;
        let decays = per_voice(
            "decays",
            self.decays.as_ref(),
            n,
            |x| x > 0.0 && x <= 1.0,
            "between 0 and 1",
        )?;
        let speeds = per_voice("speeds", self.speeds.as_ref(), n, |x| x > 0.0, "> 0")?;
        let depths = per_voice("depths", self.depths.as_ref(), n, |x| x > 0.0, "> 0")?;
        if let Some(shapes) = &self.shapes {
            check_len("shapes", shapes, n)?;
        }

        // Validation is complete; only now draw random defaults.
        let delays = delays.unwrap_or_else(|| random_voices(ctx, n, 40.0, 60.0));
        let decays = decays.unwrap_or_else(|| random_voices(ctx, n, 0.3, 0.4));
        let speeds = speeds.unwrap_or_else(|| random_voices(ctx, n, 0.25, 0.4));
        let depths = depths.unwrap_or_else(|| random_voices(ctx, n, 1.0, 3.0));
        let shapes = match &self.shapes {
            Some(shapes) => shapes.clone(),
            None => (0..n)
                .map(|_| {
                    if ctx.rng.random_bool(0.5) {
                        ChorusShape::Triangle
                    } else {
                        ChorusShape::Sine
                    }
                })
                .collect(),
        };

        let mut args = Vec::with_capacity(3 + 5 * n);
        args.extend([
            Self::NAME.to_string(),
            tok(self.gain_in),
            tok(self.gain_out),
        ]);
        for i in 0..n {
            args.extend([
                tok(delays[i]),
                tok(decays[i]),
                tok(speeds[i]),
                tok(depths[i]),
                shapes[i].flag(),
            ]);
        }
        Ok(args)
    }
}

/// Tremolo (amplitude modulation).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tremolo {
    /// Modulation rate in Hz.
    pub speed: Number,
    /// Modulation depth in percent, `(0, 100]`.
    pub depth: Number,
}

impl Default for Tremolo {
    fn default() -> Self {
        Self {
            speed: Number::Float(6.0),
            depth: Number::Float(40.0),
        }
    }
}

impl EffectSpec for Tremolo {
    const NAME: &'static str = "tremolo";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::positive("speed", self.speed)?;
        check::in_open_closed("depth", self.depth, 100.0)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.speed),
            tok(self.depth),
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/modulation.rs"]
mod tests;
