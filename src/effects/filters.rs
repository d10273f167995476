use crate::effects::{EffectCtx, EffectSpec, q_token, slope_token};
use crate::foundation::check;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::{Number, tok};

fn default_width_q() -> Number {
    Number::Float(2.0)
}

fn default_pass_width_q() -> Number {
    Number::Float(0.707)
}

fn default_poles() -> u8 {
    2
}

fn default_slope() -> Number {
    Number::Float(0.5)
}

fn default_bass_frequency() -> Number {
    Number::Float(100.0)
}

fn default_treble_frequency() -> Number {
    Number::Float(3000.0)
}

fn check_band(frequency: Number, width_q: Number) -> SoxResult<()> {
    check::positive("frequency", frequency)?;
    check::positive("width_q", width_q)?;
    Ok(())
}

/// Two-pole all-pass filter: unity gain, phase shift around `frequency`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Allpass {
    /// Centre frequency in Hz.
    pub frequency: Number,
    /// Filter width as a Q factor.
    #[serde(default = "default_width_q")]
    pub width_q: Number,
}

impl Allpass {
    /// Filter at `frequency` with the default Q of 2.0.
    pub fn new(frequency: impl Into<Number>) -> Self {
        Self {
            frequency: frequency.into(),
            width_q: default_width_q(),
        }
    }
}

impl EffectSpec for Allpass {
    const NAME: &'static str = "allpass";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check_band(self.frequency, self.width_q)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.frequency),
            q_token(self.width_q),
        ])
    }
}

/// Two-pole Butterworth band-pass filter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bandpass {
    /// Centre frequency in Hz.
    pub frequency: Number,
    /// Filter width as a Q factor.
    #[serde(default = "default_width_q")]
    pub width_q: Number,
    /// Constant skirt gain (peak gain = Q) instead of constant 0 dB peak gain.
    #[serde(default)]
    pub constant_skirt: bool,
}

impl Bandpass {
    /// Filter at `frequency` with the default Q and 0 dB peak gain.
    pub fn new(frequency: impl Into<Number>) -> Self {
        Self {
            frequency: frequency.into(),
            width_q: default_width_q(),
            constant_skirt: false,
        }
    }
}

impl EffectSpec for Bandpass {
    const NAME: &'static str = "bandpass";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check_band(self.frequency, self.width_q)?;
        let mut args = vec![Self::NAME.to_string()];
        if self.constant_skirt {
            args.push("-c".to_string());
        }
        args.extend([tok(self.frequency), q_token(self.width_q)]);
        Ok(args)
    }
}

/// Two-pole Butterworth band-reject (notch) filter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bandreject {
    /// Centre frequency in Hz.
    pub frequency: Number,
    /// Filter width as a Q factor.
    #[serde(default = "default_width_q")]
    pub width_q: Number,
}

impl Bandreject {
    /// Notch at `frequency` with the default Q of 2.0.
    pub fn new(frequency: impl Into<Number>) -> Self {
        Self {
            frequency: frequency.into(),
            width_q: default_width_q(),
        }
    }
}

impl EffectSpec for Bandreject {
    const NAME: &'static str = "bandreject";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check_band(self.frequency, self.width_q)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.frequency),
            q_token(self.width_q),
        ])
    }
}

/// Peaking equaliser: boost or cut a band around `frequency`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Equalizer {
    /// Centre frequency in Hz.
    pub frequency: Number,
    /// Band width as a Q factor.
    pub width_q: Number,
    /// Gain in dB, either sign.
    pub gain_db: Number,
}

impl EffectSpec for Equalizer {
    const NAME: &'static str = "equalizer";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check_band(self.frequency, self.width_q)?;
        check::finite("gain_db", self.gain_db)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.frequency),
            q_token(self.width_q),
            tok(self.gain_db),
        ])
    }
}

fn shelf_args(
    name: &str,
    gain_db: Number,
    frequency: Number,
    slope: Number,
) -> SoxResult<Vec<String>> {
    check::finite("gain_db", gain_db)?;
    check::positive("frequency", frequency)?;
    check::in_open_closed("slope", slope, 1.0)?;
    Ok(vec![
        name.to_string(),
        tok(gain_db),
        tok(frequency),
        slope_token(slope),
    ])
}

/// Low shelving filter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bass {
    /// Shelf gain in dB, either sign.
    pub gain_db: Number,
    /// Shelf corner frequency in Hz.
    #[serde(default = "default_bass_frequency")]
    pub frequency: Number,
    /// Shelf slope in `(0, 1]`.
    #[serde(default = "default_slope")]
    pub slope: Number,
}

impl Bass {
    /// Shelf of `gain_db` at 100 Hz with slope 0.5.
    pub fn new(gain_db: impl Into<Number>) -> Self {
        Self {
            gain_db: gain_db.into(),
            frequency: default_bass_frequency(),
            slope: default_slope(),
        }
    }
}

impl EffectSpec for Bass {
    const NAME: &'static str = "bass";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        shelf_args(Self::NAME, self.gain_db, self.frequency, self.slope)
    }
}

/// High shelving filter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Treble {
    /// Shelf gain in dB, either sign.
    pub gain_db: Number,
    /// Shelf corner frequency in Hz.
    #[serde(default = "default_treble_frequency")]
    pub frequency: Number,
    /// Shelf slope in `(0, 1]`.
    #[serde(default = "default_slope")]
    pub slope: Number,
}

impl Treble {
    /// Shelf of `gain_db` at 3 kHz with slope 0.5.
    pub fn new(gain_db: impl Into<Number>) -> Self {
        Self {
            gain_db: gain_db.into(),
            frequency: default_treble_frequency(),
            slope: default_slope(),
        }
    }
}

impl EffectSpec for Treble {
    const NAME: &'static str = "treble";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        shelf_args(Self::NAME, self.gain_db, self.frequency, self.slope)
    }
}

/// Biquad IIR filter from raw coefficients.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Biquad {
    /// Numerator coefficients `b0 b1 b2`.
    pub b: Vec<Number>,
    /// Denominator coefficients `a0 a1 a2`.
    pub a: Vec<Number>,
}

impl EffectSpec for Biquad {
    const NAME: &'static str = "biquad";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        if self.b.len() != 3 {
            return Err(SoxError::validation("b must be a length 3 list"));
        }
        if self.a.len() != 3 {
            return Err(SoxError::validation("a must be a length 3 list"));
        }
        for &v in &self.b {
            check::finite("b", v)?;
        }
        for &v in &self.a {
            check::finite("a", v)?;
        }

        let mut args = vec![Self::NAME.to_string()];
        args.extend(self.b.iter().chain(&self.a).map(|&v| tok(v)));
        Ok(args)
    }
}

fn pass_args(
    name: &str,
    frequency: Number,
    width_q: Number,
    n_poles: u8,
) -> SoxResult<Vec<String>> {
    check::positive("frequency", frequency)?;
    check::positive("width_q", width_q)?;
    check::one_of("n_poles", &n_poles, &[1, 2])?;

    let mut args = vec![name.to_string(), format!("-{n_poles}"), tok(frequency)];
    // Single-pole filters have no width.
    if n_poles == 2 {
        args.push(q_token(width_q));
    }
    Ok(args)
}

/// High-pass filter, one or two poles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Highpass {
    /// 3 dB corner frequency in Hz.
    pub frequency: Number,
    /// Resonance as a Q factor (two-pole only).
    #[serde(default = "default_pass_width_q")]
    pub width_q: Number,
    /// `1` or `2`.
    #[serde(default = "default_poles")]
    pub n_poles: u8,
}

impl Highpass {
    /// Two-pole Butterworth high-pass at `frequency`.
    pub fn new(frequency: impl Into<Number>) -> Self {
        Self {
            frequency: frequency.into(),
            width_q: default_pass_width_q(),
            n_poles: default_poles(),
        }
    }
}

impl EffectSpec for Highpass {
    const NAME: &'static str = "highpass";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        pass_args(Self::NAME, self.frequency, self.width_q, self.n_poles)
    }
}

/// Low-pass filter, one or two poles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lowpass {
    /// 3 dB corner frequency in Hz.
    pub frequency: Number,
    /// Resonance as a Q factor (two-pole only).
    #[serde(default = "default_pass_width_q")]
    pub width_q: Number,
    /// `1` or `2`.
    #[serde(default = "default_poles")]
    pub n_poles: u8,
}

impl Lowpass {
    /// Two-pole Butterworth low-pass at `frequency`.
    pub fn new(frequency: impl Into<Number>) -> Self {
        Self {
            frequency: frequency.into(),
            width_q: default_pass_width_q(),
            n_poles: default_poles(),
        }
    }
}

impl EffectSpec for Lowpass {
    const NAME: &'static str = "lowpass";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        pass_args(Self::NAME, self.frequency, self.width_q, self.n_poles)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filters.rs"]
mod tests;
