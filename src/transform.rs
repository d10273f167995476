use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::effects::{
    Allpass, Bandpass, Bandreject, Bass, Biquad, Channels, Chorus, Compand, Contrast, Dcshift,
    Delay, Downsample, Effect, EffectCtx, Equalizer, Fade, FadeShape, Gain, Highpass, Lowpass,
    Loudness, Norm, Overdrive, Pad, Pitch, Rate, RateQuality, Reverb, Silence, Tempo,
    TempoAudioType, Treble, Tremolo, Trim, Unsupported, Upsample, Vad,
};
use crate::engine::{Engine, Player, SystemSox};
use crate::file_info::{validate_input_file, validate_output_file};
use crate::foundation::check;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::{Number, tok};
use crate::format::{InputFormat, OutputFormat};
use crate::globals::GlobalOptions;

/// Bit depths accepted by [`Transformer::convert`].
pub const CONVERT_BITDEPTHS: [u32; 5] = [8, 16, 24, 32, 64];

/// Builds one SoX command: globals, formats, and an ordered effect chain.
///
/// Setters (`set_globals`, `set_input_format`, `set_output_format`) replace their section.
/// Effect methods append; there is no way to remove or reorder an effect once added. Every
/// method validates all of its parameters before touching any state, so an `Err` leaves the
/// transformer exactly as it was.
pub struct Transformer {
    globals: Vec<String>,
    input_format: Vec<String>,
    output_format: Vec<String>,
    effects: Vec<String>,
    effects_log: Vec<&'static str>,

    rng: Box<dyn RngCore + Send>,
    diagnostics: Arc<dyn Diagnostics>,
    engine: Arc<dyn Engine>,
    player: Arc<dyn Player>,
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("globals", &self.globals)
            .field("input_format", &self.input_format)
            .field("output_format", &self.output_format)
            .field("effects", &self.effects)
            .field("effects_log", &self.effects_log)
            .finish_non_exhaustive()
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    /// New transformer with default globals (`-D -V2`), inferred formats, and no effects.
    ///
    /// Uses the system `sox`/`play`, an OS-seeded random source, and `tracing` diagnostics.
    pub fn new() -> Self {
        let sox = Arc::new(SystemSox::default());
        Self {
            globals: default_globals(),
            input_format: Vec::new(),
            output_format: Vec::new(),
            effects: Vec::new(),
            effects_log: Vec::new(),
            rng: Box::new(StdRng::from_os_rng()),
            diagnostics: Arc::new(TracingDiagnostics),
            engine: sox.clone(),
            player: sox,
        }
    }

    /// Replace the random source used for randomized effect defaults.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Seed the random source so randomized defaults are reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Replace the engine used by [`Transformer::build`].
    pub fn with_engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the player used by [`Transformer::preview`].
    pub fn with_player(mut self, player: Arc<dyn Player>) -> Self {
        self.player = player;
        self
    }

    /// Current global argument tokens.
    pub fn globals(&self) -> &[String] {
        &self.globals
    }

    /// Current input format tokens.
    pub fn input_format(&self) -> &[String] {
        &self.input_format
    }

    /// Current output format tokens.
    pub fn output_format(&self) -> &[String] {
        &self.output_format
    }

    /// Accumulated effect tokens, in application order.
    pub fn effects(&self) -> &[String] {
        &self.effects
    }

    /// One effect name per successful effect call, in application order.
    pub fn effects_log(&self) -> &[&'static str] {
        &self.effects_log
    }

    /// Replace the global options.
    pub fn set_globals(&mut self, opts: &GlobalOptions) -> SoxResult<&mut Self> {
        self.globals = opts.to_args()?;
        Ok(self)
    }

    /// Replace the input format. Unset fields are inferred from the file.
    pub fn set_input_format(&mut self, fmt: &InputFormat) -> SoxResult<&mut Self> {
        self.input_format = fmt.to_args()?;
        Ok(self)
    }

    /// Replace the output format. Unset fields are inferred from the file name and input.
    pub fn set_output_format(&mut self, fmt: &OutputFormat) -> SoxResult<&mut Self> {
        self.output_format = fmt.to_args()?;
        Ok(self)
    }

    /// Validate and append any effect.
    pub fn effect(&mut self, fx: impl Into<Effect>) -> SoxResult<&mut Self> {
        let fx = fx.into();
        let args = {
            let mut ctx = EffectCtx::new(self.rng.as_mut(), self.diagnostics.as_ref());
            fx.args(&mut ctx)?
        };
        if args.is_empty() {
            return Ok(self);
        }
        self.effects.extend(args);
        self.effects_log.push(fx.name());
        Ok(self)
    }

    /// Full `sox` argument list (program name excluded).
    ///
    /// Fails with [`SoxError::Path`] when a path is not valid UTF-8.
    pub fn args(&self, input: &Path, output: &Path) -> SoxResult<Vec<String>> {
        let input = path_token(input)?;
        let output = path_token(output)?;
        let mut args = Vec::with_capacity(
            self.globals.len()
                + self.input_format.len()
                + self.output_format.len()
                + self.effects.len()
                + 2,
        );
        args.extend(self.globals.iter().cloned());
        args.extend(self.input_format.iter().cloned());
        args.push(input);
        args.extend(self.output_format.iter().cloned());
        args.push(output);
        args.extend(self.effects.iter().cloned());
        Ok(args)
    }

    /// Full `play` argument list, program name first.
    pub fn preview_args(&self, input: &Path) -> SoxResult<Vec<String>> {
        let input = path_token(input)?;
        let mut args = vec!["play".to_string(), "--no-show-progress".to_string()];
        args.extend(self.globals.iter().cloned());
        args.extend(self.input_format.iter().cloned());
        args.push(input);
        args.extend(self.effects.iter().cloned());
        Ok(args)
    }

    /// Run the chain on `input`, writing `output` (overwritten if present).
    ///
    /// Fails with [`SoxError::Path`] before running anything if the paths are unusable, and with
    /// [`SoxError::Engine`] if the engine exits non-zero; in that case `output` must not be
    /// trusted.
    #[tracing::instrument(skip(self), fields(effects = self.effects_log.len()))]
    pub fn build(&self, input: &Path, output: &Path) -> SoxResult<()> {
        validate_input_file(input)?;
        validate_output_file(output)?;

        let args = self.args(input, output)?;
        let out = self.engine.execute(&args)?;
        if !out.success() {
            return Err(SoxError::Engine {
                status: out.status,
                stdout: out.stdout,
                stderr: out.stderr,
            });
        }

        self.diagnostics.info(&format!(
            "Created {} with effects: {}",
            output.display(),
            self.effects_log.join(" ")
        ));
        if let Some(stdout) = out.stdout.as_deref() {
            self.diagnostics.info(&format!("[SoX] {stdout}"));
        }
        Ok(())
    }

    /// Play `input` through the chain on the default audio device.
    pub fn preview(&self, input: &Path) -> SoxResult<()> {
        self.player.play(&self.preview_args(input)?)
    }

    /// Convert bit depth and channel count (output format) and sample rate (`rate` effect).
    ///
    /// Unlike [`Transformer::set_output_format`] this extends the output format section.
    pub fn convert(
        &mut self,
        samplerate: Option<Number>,
        n_channels: Option<u32>,
        bitdepth: Option<u32>,
    ) -> SoxResult<&mut Self> {
        if let Some(bits) = bitdepth
            && !CONVERT_BITDEPTHS.contains(&bits)
        {
            return Err(SoxError::validation(format!(
                "bitdepth must be one of {CONVERT_BITDEPTHS:?}"
            )));
        }
        if let Some(n) = n_channels {
            check::positive_count("n_channels", n)?;
        }
        if let Some(sr) = samplerate {
            check::positive("samplerate", sr)?;
        }

        if let Some(bits) = bitdepth {
            self.output_format.extend(["-b".to_string(), tok(bits)]);
        }
        if let Some(n) = n_channels {
            self.output_format.extend(["-c".to_string(), tok(n)]);
        }
        if let Some(sr) = samplerate {
            self.effect(Rate::new(sr))?;
        }
        Ok(self)
    }

    /// All-pass filter at `frequency` Hz with width `width_q`.
    pub fn allpass(
        &mut self,
        frequency: impl Into<Number>,
        width_q: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Allpass {
            frequency: frequency.into(),
            width_q: width_q.into(),
        })
    }

    /// Band-pass filter; `constant_skirt` selects constant skirt gain.
    pub fn bandpass(
        &mut self,
        frequency: impl Into<Number>,
        width_q: impl Into<Number>,
        constant_skirt: bool,
    ) -> SoxResult<&mut Self> {
        self.effect(Bandpass {
            frequency: frequency.into(),
            width_q: width_q.into(),
            constant_skirt,
        })
    }

    /// Band-reject filter.
    pub fn bandreject(
        &mut self,
        frequency: impl Into<Number>,
        width_q: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Bandreject {
            frequency: frequency.into(),
            width_q: width_q.into(),
        })
    }

    /// Low shelf.
    pub fn bass(
        &mut self,
        gain_db: impl Into<Number>,
        frequency: impl Into<Number>,
        slope: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Bass {
            gain_db: gain_db.into(),
            frequency: frequency.into(),
            slope: slope.into(),
        })
    }

    /// Biquad from numerator `b` and denominator `a` (three coefficients each).
    pub fn biquad<B, A>(&mut self, b: B, a: A) -> SoxResult<&mut Self>
    where
        B: IntoIterator,
        B::Item: Into<Number>,
        A: IntoIterator,
        A::Item: Into<Number>,
    {
        self.effect(Biquad {
            b: b.into_iter().map(Into::into).collect(),
            a: a.into_iter().map(Into::into).collect(),
        })
    }

    /// Change the channel count.
    pub fn channels(&mut self, n_channels: u32) -> SoxResult<&mut Self> {
        self.effect(Channels { n_channels })
    }

    /// Chorus. Omitted per-voice lists are drawn from this transformer's random source.
    pub fn chorus(&mut self, chorus: Chorus) -> SoxResult<&mut Self> {
        self.effect(chorus)
    }

    /// Compander.
    pub fn compand(&mut self, compand: Compand) -> SoxResult<&mut Self> {
        self.effect(compand)
    }

    /// Contrast enhancement, `amount` in `[0, 100]`.
    pub fn contrast(&mut self, amount: impl Into<Number>) -> SoxResult<&mut Self> {
        self.effect(Contrast {
            amount: amount.into(),
        })
    }

    /// DC shift in `[-2, 2]`.
    pub fn dcshift(&mut self, shift: impl Into<Number>) -> SoxResult<&mut Self> {
        self.effect(Dcshift {
            shift: shift.into(),
        })
    }

    /// CD de-emphasis.
    pub fn deemph(&mut self) -> SoxResult<&mut Self> {
        self.effect(Effect::Deemph)
    }

    /// Per-channel delay in seconds.
    pub fn delay<I>(&mut self, positions: I) -> SoxResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Number>,
    {
        self.effect(Delay {
            positions: positions.into_iter().map(Into::into).collect(),
        })
    }

    /// Keep every `factor`-th sample.
    pub fn downsample(&mut self, factor: u32) -> SoxResult<&mut Self> {
        self.effect(Downsample { factor })
    }

    /// Headphone cross-feed.
    pub fn earwax(&mut self) -> SoxResult<&mut Self> {
        self.effect(Effect::Earwax)
    }

    /// Peaking equaliser band.
    pub fn equalizer(
        &mut self,
        frequency: impl Into<Number>,
        width_q: impl Into<Number>,
        gain_db: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Equalizer {
            frequency: frequency.into(),
            width_q: width_q.into(),
            gain_db: gain_db.into(),
        })
    }

    /// Fade in and/or out. Both lengths zero is a no-op and is not logged.
    pub fn fade(
        &mut self,
        fade_in_len: impl Into<Number>,
        fade_out_len: impl Into<Number>,
        fade_shape: FadeShape,
    ) -> SoxResult<&mut Self> {
        self.effect(Fade {
            fade_in_len: fade_in_len.into(),
            fade_out_len: fade_out_len.into(),
            fade_shape,
        })
    }

    /// Gain stage.
    pub fn gain(&mut self, gain: Gain) -> SoxResult<&mut Self> {
        self.effect(gain)
    }

    /// High-pass filter; `width_q` is only emitted for two poles.
    pub fn highpass(
        &mut self,
        frequency: impl Into<Number>,
        width_q: impl Into<Number>,
        n_poles: u8,
    ) -> SoxResult<&mut Self> {
        self.effect(Highpass {
            frequency: frequency.into(),
            width_q: width_q.into(),
            n_poles,
        })
    }

    /// Low-pass filter; `width_q` is only emitted for two poles.
    pub fn lowpass(
        &mut self,
        frequency: impl Into<Number>,
        width_q: impl Into<Number>,
        n_poles: u8,
    ) -> SoxResult<&mut Self> {
        self.effect(Lowpass {
            frequency: frequency.into(),
            width_q: width_q.into(),
            n_poles,
        })
    }

    /// Equal-loudness gain with `reference_level` in `[50, 75]`.
    pub fn loudness(
        &mut self,
        gain_db: impl Into<Number>,
        reference_level: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Loudness {
            gain_db: gain_db.into(),
            reference_level: reference_level.into(),
        })
    }

    /// Normalise the peak to `db_level`.
    pub fn norm(&mut self, db_level: impl Into<Number>) -> SoxResult<&mut Self> {
        self.effect(Norm {
            db_level: db_level.into(),
        })
    }

    /// Overdrive.
    pub fn overdrive(
        &mut self,
        gain_db: impl Into<Number>,
        colour: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Overdrive {
            gain_db: gain_db.into(),
            colour: colour.into(),
        })
    }

    /// Silence padding at both ends.
    pub fn pad(
        &mut self,
        start_duration: impl Into<Number>,
        end_duration: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Pad {
            start_duration: start_duration.into(),
            end_duration: end_duration.into(),
        })
    }

    /// Pitch shift in semitones; outside `[-12, 12]` emits a warning.
    pub fn pitch(&mut self, n_semitones: impl Into<Number>, quick: bool) -> SoxResult<&mut Self> {
        self.effect(Pitch {
            n_semitones: n_semitones.into(),
            quick,
        })
    }

    /// Resample to `samplerate`.
    pub fn rate(
        &mut self,
        samplerate: impl Into<Number>,
        quality: RateQuality,
    ) -> SoxResult<&mut Self> {
        self.effect(Rate {
            samplerate: samplerate.into(),
            quality,
        })
    }

    /// Reverberation.
    pub fn reverb(&mut self, reverb: Reverb) -> SoxResult<&mut Self> {
        self.effect(reverb)
    }

    /// Reverse the audio.
    pub fn reverse(&mut self) -> SoxResult<&mut Self> {
        self.effect(Effect::Reverse)
    }

    /// Remove silence.
    pub fn silence(&mut self, silence: Silence) -> SoxResult<&mut Self> {
        self.effect(silence)
    }

    /// Swap channel pairs; an odd trailing channel passes through.
    pub fn swap(&mut self) -> SoxResult<&mut Self> {
        self.effect(Effect::Swap)
    }

    /// Tempo change; outside `[0.5, 2]` emits a warning.
    pub fn tempo(
        &mut self,
        factor: impl Into<Number>,
        audio_type: Option<TempoAudioType>,
        quick: bool,
    ) -> SoxResult<&mut Self> {
        self.effect(Tempo {
            factor: factor.into(),
            audio_type,
            quick,
        })
    }

    /// High shelf.
    pub fn treble(
        &mut self,
        gain_db: impl Into<Number>,
        frequency: impl Into<Number>,
        slope: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Treble {
            gain_db: gain_db.into(),
            frequency: frequency.into(),
            slope: slope.into(),
        })
    }

    /// Tremolo.
    pub fn tremolo(
        &mut self,
        speed: impl Into<Number>,
        depth: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Tremolo {
            speed: speed.into(),
            depth: depth.into(),
        })
    }

    /// Keep `[start_time, end_time)`.
    pub fn trim(
        &mut self,
        start_time: impl Into<Number>,
        end_time: impl Into<Number>,
    ) -> SoxResult<&mut Self> {
        self.effect(Trim::new(start_time, end_time))
    }

    /// Zero-stuff by `factor`.
    pub fn upsample(&mut self, factor: u32) -> SoxResult<&mut Self> {
        self.effect(Upsample { factor })
    }

    /// Voice-activity trim.
    pub fn vad(&mut self, vad: Vad) -> SoxResult<&mut Self> {
        self.effect(vad)
    }

    /// Not supported.
    pub fn bend(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Bend)
    }

    /// Not supported.
    pub fn echo(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Echo)
    }

    /// Not supported.
    pub fn echos(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Echos)
    }

    /// Not supported.
    pub fn fir(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Fir)
    }

    /// Not supported.
    pub fn flanger(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Flanger)
    }

    /// Not supported.
    pub fn hilbert(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Hilbert)
    }

    /// Not supported.
    pub fn mcompand(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Mcompand)
    }

    /// Not supported.
    pub fn noisered(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Noisered)
    }

    /// Not supported.
    pub fn oops(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Oops)
    }

    /// Not supported.
    pub fn phaser(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Phaser)
    }

    /// Not supported.
    pub fn remix(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Remix)
    }

    /// Not supported.
    pub fn repeat(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Repeat)
    }

    /// Not supported.
    pub fn sinc(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Sinc)
    }

    /// Not supported.
    pub fn speed(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Speed)
    }

    /// Not supported.
    pub fn splice(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Splice)
    }

    /// Not supported.
    pub fn stretch(&mut self) -> SoxResult<&mut Self> {
        self.effect(Unsupported::Stretch)
    }
}

fn default_globals() -> Vec<String> {
    vec!["-D".to_string(), "-V2".to_string()]
}

/// Paths travel as UTF-8 tokens.
fn path_token(path: &Path) -> SoxResult<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        SoxError::path(format!(
            "path '{}' is not valid UTF-8",
            path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../tests/unit/transform.rs"]
mod tests;
