use crate::effects::{EffectCtx, EffectSpec};
use crate::foundation::check;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::{Number, tok};

/// Compressor / expander driven by a piecewise-linear transfer function.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Compand {
    /// Seconds to react to rising level.
    pub attack_time: Number,
    /// Seconds to react to falling level.
    pub decay_time: Number,
    /// Soft-knee radius in dB; `None` gives hard corners.
    pub soft_knee_db: Option<Number>,
    /// `(input dB, output dB)` pairs, all `<= 0`, unique input values.
    pub tf_points: Vec<(Number, Number)>,
}

impl Default for Compand {
    fn default() -> Self {
        Self {
            attack_time: Number::Float(0.3),
            decay_time: Number::Float(0.8),
            soft_knee_db: Some(Number::Float(6.0)),
            tf_points: vec![
                (Number::Int(-70), Number::Int(-70)),
                (Number::Int(-60), Number::Int(-20)),
                (Number::Int(0), Number::Int(0)),
            ],
        }
    }
}

impl EffectSpec for Compand {
    const NAME: &'static str = "compand";

    fn args(&self, ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        let attack = check::positive("attack_time", self.attack_time)?;
        let decay = check::positive("decay_time", self.decay_time)?;
        if let Some(knee) = self.soft_knee_db {
            check::finite("soft_knee_db", knee)?;
        }
        if self.tf_points.is_empty() {
            return Err(SoxError::validation(
                "tf_points must have at least one point",
            ));
        }
        for &(x, y) in &self.tf_points {
            let x = check::finite("tf_points", x)?;
            let y = check::finite("tf_points", y)?;
            if x > 0.0 || y > 0.0 {
                return Err(SoxError::validation(
                    "tf_points values must be <= 0 (dB)",
                ));
            }
        }

        let mut points = self.tf_points.clone();
        points.sort_by(|a, b| a.0.as_f64().total_cmp(&b.0.as_f64()));
        if points
            .windows(2)
            .any(|w| w[0].0.as_f64() == w[1].0.as_f64())
        {
            return Err(SoxError::validation("found duplicate x-value in tf_points"));
        }

        if attack > decay {
            ctx.diagnostics.warn(
                "compand: attack_time is larger than decay_time; the ear is more sensitive to \
                 sudden loud sounds than sudden soft ones, so attack is usually the shorter",
            );
        }

        let transfer = points
            .iter()
            .flat_map(|&(x, y)| [tok(x), tok(y)])
            .collect::<Vec<_>>()
            .join(",");
        let curve = match self.soft_knee_db {
            Some(knee) => format!("{knee}:{transfer}"),
            None => transfer,
        };

        Ok(vec![
            Self::NAME.to_string(),
            format!("{},{}", self.attack_time, self.decay_time),
            curve,
        ])
    }
}

/// Contrast enhancement, `amount` in `[0, 100]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contrast {
    /// Enhancement amount.
    pub amount: Number,
}

impl Default for Contrast {
    fn default() -> Self {
        Self {
            amount: Number::Int(75),
        }
    }
}

impl EffectSpec for Contrast {
    const NAME: &'static str = "contrast";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::in_closed("amount", self.amount, 0.0, 100.0)?;
        Ok(vec![Self::NAME.to_string(), tok(self.amount)])
    }
}

/// DC shift, `shift` in `[-2, 2]` (full scale).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dcshift {
    /// Offset to add.
    pub shift: Number,
}

impl Default for Dcshift {
    fn default() -> Self {
        Self {
            shift: Number::Float(0.0),
        }
    }
}

impl EffectSpec for Dcshift {
    const NAME: &'static str = "dcshift";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::in_closed("shift", self.shift, -2.0, 2.0)?;
        Ok(vec![Self::NAME.to_string(), tok(self.shift)])
    }
}

letter_enum! {
    /// Channel balancing mode for [`Gain`].
    pub enum GainBalance ("balance") {
        /// Equalise peak levels across channels.
        Equalize => "e",
        /// Balance RMS levels, guarding against clipping.
        BalanceGuarded => "B",
        /// Balance RMS levels without clipping protection.
        Balance => "b",
    }
}

/// Gain with optional normalisation, limiting, and channel balancing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Gain {
    /// Gain in dB (or target level when normalising).
    pub gain_db: Number,
    /// Normalise to 0 dBFS before applying `gain_db` (`-n`).
    pub normalize: bool,
    /// Use a limiter instead of clipping on positive gain (`-l`).
    pub limiter: bool,
    /// Channel balancing.
    pub balance: Option<GainBalance>,
}

impl Default for Gain {
    fn default() -> Self {
        Self {
            gain_db: Number::Float(0.0),
            normalize: true,
            limiter: false,
            balance: None,
        }
    }
}

impl EffectSpec for Gain {
    const NAME: &'static str = "gain";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::finite("gain_db", self.gain_db)?;

        // Flags must precede the value.
        let mut args = vec![Self::NAME.to_string()];
        if let Some(balance) = self.balance {
            args.push(balance.flag());
        }
        if self.normalize {
            args.push("-n".to_string());
        }
        if self.limiter {
            args.push("-l".to_string());
        }
        args.push(tok(self.gain_db));
        Ok(args)
    }
}

/// Equal-loudness contour gain.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Loudness {
    /// Gain in dB, either sign.
    pub gain_db: Number,
    /// Reference loudness in dB, `[50, 75]`.
    pub reference_level: Number,
}

impl Default for Loudness {
    fn default() -> Self {
        Self {
            gain_db: Number::Float(-10.0),
            reference_level: Number::Float(65.0),
        }
    }
}

impl EffectSpec for Loudness {
    const NAME: &'static str = "loudness";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::finite("gain_db", self.gain_db)?;
        check::in_closed("reference_level", self.reference_level, 50.0, 75.0)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.gain_db),
            tok(self.reference_level),
        ])
    }
}

/// Normalise the peak to `db_level`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Norm {
    /// Target peak in dBFS.
    pub db_level: Number,
}

impl Default for Norm {
    fn default() -> Self {
        Self {
            db_level: Number::Float(-3.0),
        }
    }
}

impl EffectSpec for Norm {
    const NAME: &'static str = "norm";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::finite("db_level", self.db_level)?;
        Ok(vec![Self::NAME.to_string(), tok(self.db_level)])
    }
}

/// Non-linear overdrive distortion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overdrive {
    /// Drive in dB.
    pub gain_db: Number,
    /// Even-harmonic content.
    pub colour: Number,
}

impl Default for Overdrive {
    fn default() -> Self {
        Self {
            gain_db: Number::Float(20.0),
            colour: Number::Float(20.0),
        }
    }
}

impl EffectSpec for Overdrive {
    const NAME: &'static str = "overdrive";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::finite("gain_db", self.gain_db)?;
        check::finite("colour", self.colour)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.gain_db),
            tok(self.colour),
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dynamics.rs"]
mod tests;
