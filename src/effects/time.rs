use crate::effects::{EffectCtx, EffectSpec, percent_token};
use crate::foundation::check;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::{Number, tok};

/// Delay channels by per-channel offsets.
///
/// Channels beyond `positions.len()` are passed through undelayed by the engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Delay {
    /// Delay in seconds for channel 1, 2, ...
    pub positions: Vec<Number>,
}

impl EffectSpec for Delay {
    const NAME: &'static str = "delay";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        for &p in &self.positions {
            check::non_negative("positions", p)?;
        }
        let mut args = vec![Self::NAME.to_string()];
        args.extend(self.positions.iter().map(|&p| tok(p)));
        Ok(args)
    }
}

/// Integer-factor downsampling (no anti-alias filter).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Downsample {
    /// Keep every `factor`-th sample.
    pub factor: u32,
}

impl Default for Downsample {
    fn default() -> Self {
        Self { factor: 2 }
    }
}

impl EffectSpec for Downsample {
    const NAME: &'static str = "downsample";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::positive_count("factor", self.factor)?;
        Ok(vec![Self::NAME.to_string(), tok(self.factor)])
    }
}

/// Integer-factor upsampling by zero-stuffing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Upsample {
    /// Insert `factor - 1` zeros after each sample.
    pub factor: u32,
}

impl Default for Upsample {
    fn default() -> Self {
        Self { factor: 2 }
    }
}

impl EffectSpec for Upsample {
    const NAME: &'static str = "upsample";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::positive_count("factor", self.factor)?;
        Ok(vec![Self::NAME.to_string(), tok(self.factor)])
    }
}

letter_enum! {
    /// Fade curve.
    pub enum FadeShape ("fade_shape") {
        /// Quarter sine.
        QuarterSine => "q",
        /// Half sine.
        HalfSine => "h",
        /// Linear.
        Linear => "t",
        /// Logarithmic.
        Logarithmic => "l",
        /// Inverted parabola.
        Parabola => "p",
    }
}

impl Default for FadeShape {
    fn default() -> Self {
        Self::QuarterSine
    }
}

/// Fade in from the start and/or out towards the end.
///
/// SoX's `fade` is anchored at the head of the audio, so a fade-out is rendered as
/// `reverse fade <shape> <len> reverse`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fade {
    /// Fade-in length in seconds; `0` for none.
    pub fade_in_len: Number,
    /// Fade-out length in seconds; `0` for none.
    pub fade_out_len: Number,
    /// Curve for both fades.
    pub fade_shape: FadeShape,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            fade_in_len: Number::Float(0.0),
            fade_out_len: Number::Float(0.0),
            fade_shape: FadeShape::default(),
        }
    }
}

impl Fade {
    /// Fade in over `len` seconds.
    pub fn fade_in(len: impl Into<Number>) -> Self {
        Self {
            fade_in_len: len.into(),
            ..Self::default()
        }
    }

    /// Fade out over the last `len` seconds.
    pub fn fade_out(len: impl Into<Number>) -> Self {
        Self {
            fade_out_len: len.into(),
            ..Self::default()
        }
    }
}

impl EffectSpec for Fade {
    const NAME: &'static str = "fade";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        let fade_in = check::non_negative("fade_in_len", self.fade_in_len)?;
        let fade_out = check::non_negative("fade_out_len", self.fade_out_len)?;
        let shape = self.fade_shape.as_str();

        let mut args = Vec::new();
        if fade_in > 0.0 {
            args.extend([
                Self::NAME.to_string(),
                shape.to_string(),
                tok(self.fade_in_len),
            ]);
        }
        if fade_out > 0.0 {
            args.extend([
                "reverse".to_string(),
                Self::NAME.to_string(),
                shape.to_string(),
                tok(self.fade_out_len),
                "reverse".to_string(),
            ]);
        }
        Ok(args)
    }
}

/// Pad with silence at the start and end.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pad {
    /// Seconds of silence before the audio.
    pub start_duration: Number,
    /// Seconds of silence after the audio.
    pub end_duration: Number,
}

impl Default for Pad {
    fn default() -> Self {
        Self {
            start_duration: Number::Float(0.0),
            end_duration: Number::Float(0.0),
        }
    }
}

impl EffectSpec for Pad {
    const NAME: &'static str = "pad";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::non_negative("start_duration", self.start_duration)?;
        check::non_negative("end_duration", self.end_duration)?;
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.start_duration),
            tok(self.end_duration),
        ])
    }
}

/// Pitch shift without changing tempo (WSOLA).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pitch {
    /// Shift in semitones, either sign. Rendered in cents.
    pub n_semitones: Number,
    /// Favour speed over quality (`-q`).
    #[serde(default)]
    pub quick: bool,
}

impl Pitch {
    /// Shift by `n_semitones`, full quality.
    pub fn new(n_semitones: impl Into<Number>) -> Self {
        Self {
            n_semitones: n_semitones.into(),
            quick: false,
        }
    }
}

impl EffectSpec for Pitch {
    const NAME: &'static str = "pitch";

    fn args(&self, ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        let semitones = check::finite("n_semitones", self.n_semitones)?;
        if !(-12.0..=12.0).contains(&semitones) {
            ctx.diagnostics
                .warn("pitch: using an extreme pitch shift, quality of results will be poor");
        }

        let mut args = vec![Self::NAME.to_string()];
        if self.quick {
            args.push("-q".to_string());
        }
        args.push(tok(self.n_semitones.scale(100.0)));
        Ok(args)
    }
}

letter_enum! {
    /// Resampler quality for [`Rate`].
    pub enum RateQuality ("quality") {
        /// Quick, cubic interpolation.
        Quick => "q",
        /// Low, 80% bandwidth.
        Low => "l",
        /// Medium, 95% bandwidth.
        Medium => "m",
        /// High, 95% bandwidth, 125 dB rejection.
        High => "h",
        /// Very high, 95% bandwidth, 175 dB rejection.
        VeryHigh => "v",
    }
}

impl Default for RateQuality {
    fn default() -> Self {
        Self::High
    }
}

/// Sample-rate conversion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rate {
    /// Target sample rate in Hz.
    pub samplerate: Number,
    /// Resampler quality.
    #[serde(default)]
    pub quality: RateQuality,
}

impl Rate {
    /// Convert to `samplerate` at high quality.
    pub fn new(samplerate: impl Into<Number>) -> Self {
        Self {
            samplerate: samplerate.into(),
            quality: RateQuality::default(),
        }
    }
}

impl EffectSpec for Rate {
    const NAME: &'static str = "rate";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::positive("samplerate", self.samplerate)?;
        Ok(vec![
            Self::NAME.to_string(),
            self.quality.flag(),
            tok(self.samplerate),
        ])
    }
}

letter_enum! {
    /// Material hint for [`Tempo`].
    pub enum TempoAudioType ("audio_type") {
        /// Music.
        Music => "m",
        /// Speech.
        Speech => "s",
        /// Linear (single instrument).
        Linear => "l",
    }
}

/// Tempo change without changing pitch (WSOLA).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tempo {
    /// Speed ratio; `1.0` is unchanged.
    pub factor: Number,
    /// Material hint that tunes segment sizes.
    #[serde(default)]
    pub audio_type: Option<TempoAudioType>,
    /// Favour speed over quality (`-q`).
    #[serde(default)]
    pub quick: bool,
}

impl Tempo {
    /// Change tempo by `factor` with default tuning.
    pub fn new(factor: impl Into<Number>) -> Self {
        Self {
            factor: factor.into(),
            audio_type: None,
            quick: false,
        }
    }
}

impl EffectSpec for Tempo {
    const NAME: &'static str = "tempo";

    fn args(&self, ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        let factor = check::positive("factor", self.factor)?;
        if !(0.5..=2.0).contains(&factor) {
            ctx.diagnostics.warn(
                "tempo: using an extreme time stretching factor, quality of results will be poor",
            );
        }

        let mut args = vec![Self::NAME.to_string()];
        if self.quick {
            args.push("-q".to_string());
        }
        if let Some(audio_type) = self.audio_type {
            args.push(audio_type.flag());
        }
        args.push(tok(self.factor));
        Ok(args)
    }
}

/// Keep only `[start_time, end_time)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trim {
    /// Start offset in seconds.
    pub start_time: Number,
    /// End offset in seconds, strictly after `start_time`.
    pub end_time: Number,
}

impl Trim {
    /// Window from `start_time` to `end_time`.
    pub fn new(start_time: impl Into<Number>, end_time: impl Into<Number>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl EffectSpec for Trim {
    const NAME: &'static str = "trim";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        let start = check::non_negative("start_time", self.start_time)?;
        let end = check::non_negative("end_time", self.end_time)?;
        if start >= end {
            return Err(SoxError::validation(
                "start_time must be smaller than end_time",
            ));
        }
        // The engine takes a duration, not an absolute end.
        Ok(vec![
            Self::NAME.to_string(),
            tok(self.start_time),
            tok(self.end_time.sub(self.start_time)),
        ])
    }
}

/// Remove silence from the start (`1`), the end (`-1`), or both (`0`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Silence {
    /// `1` leading, `-1` trailing, `0` both ends.
    pub location: i8,
    /// Level below which audio counts as silence, percent in `[0, 100)`.
    pub silence_threshold: Number,
    /// Seconds of silence needed before trimming.
    pub min_silence_duration: Number,
    /// Leave `min_silence_duration` of silence around the cut (`-l`).
    pub buffer_around_silence: bool,
}

impl Default for Silence {
    fn default() -> Self {
        Self {
            location: 0,
            silence_threshold: Number::Float(0.1),
            min_silence_duration: Number::Float(0.1),
            buffer_around_silence: false,
        }
    }
}

impl EffectSpec for Silence {
    const NAME: &'static str = "silence";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::one_of("location", &self.location, &[-1, 0, 1])?;
        let threshold = check::non_negative("silence_threshold", self.silence_threshold)?;
        if threshold >= 100.0 {
            return Err(SoxError::validation(
                "silence_threshold must be a number between 0 and 100",
            ));
        }
        check::positive("min_silence_duration", self.min_silence_duration)?;

        let duration = tok(self.min_silence_duration);
        let threshold = percent_token(self.silence_threshold);

        let mut args = Vec::new();
        if self.location == -1 {
            args.push("reverse".to_string());
        }
        args.push(Self::NAME.to_string());
        if self.buffer_around_silence {
            args.push("-l".to_string());
        }
        args.extend(["1".to_string(), duration.clone(), threshold.clone()]);
        // `silence` trims the tail directly when given a below-periods count of -1.
        if self.location == 0 {
            args.extend(["-1".to_string(), duration, threshold]);
        }
        if self.location == -1 {
            args.push("reverse".to_string());
        }
        Ok(args)
    }
}

/// Voice activity detection: trim up to the first detected activity.
///
/// `vad` only trims from the front; `location = -1` wraps it in `reverse ... reverse`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vad {
    /// `1` to trim the front, `-1` to trim the back.
    pub location: i8,
    /// Normalise before detection (prepends `norm`).
    pub normalize: bool,
    /// Detector trigger level (`-t`).
    pub activity_threshold: Number,
    /// Seconds of activity needed to trigger (`-T`).
    pub min_activity_duration: Number,
    /// Seconds of audio before the trigger to search for quieter activity (`-s`).
    pub initial_search_buffer: Number,
    /// Longest gap in seconds between activity bursts (`-g`).
    pub max_gap: Number,
    /// Seconds of audio to keep before the trigger (`-p`).
    pub initial_pad: Number,
}

impl Default for Vad {
    fn default() -> Self {
        Self {
            location: 1,
            normalize: true,
            activity_threshold: Number::Float(7.0),
            min_activity_duration: Number::Float(0.25),
            initial_search_buffer: Number::Float(1.0),
            max_gap: Number::Float(0.25),
            initial_pad: Number::Float(0.0),
        }
    }
}

impl EffectSpec for Vad {
    const NAME: &'static str = "vad";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::one_of("location", &self.location, &[-1, 1])?;
        check::finite("activity_threshold", self.activity_threshold)?;
        check::non_negative("min_activity_duration", self.min_activity_duration)?;
        check::non_negative("initial_search_buffer", self.initial_search_buffer)?;
        check::non_negative("max_gap", self.max_gap)?;
        check::non_negative("initial_pad", self.initial_pad)?;

        let mut args = Vec::new();
        if self.normalize {
            args.push("norm".to_string());
        }
        if self.location == -1 {
            args.push("reverse".to_string());
        }
        args.extend([
            Self::NAME.to_string(),
            "-t".to_string(),
            tok(self.activity_threshold),
            "-T".to_string(),
            tok(self.min_activity_duration),
            "-s".to_string(),
            tok(self.initial_search_buffer),
            "-g".to_string(),
            tok(self.max_gap),
            "-p".to_string(),
            tok(self.initial_pad),
        ]);
        if self.location == -1 {
            args.push("reverse".to_string());
        }
        Ok(args)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/time.rs"]
mod tests;
