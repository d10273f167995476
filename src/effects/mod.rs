//! Effect registry.
//!
//! One parameter struct per SoX effect. Each struct validates every field before rendering, so a
//! failed [`EffectSpec::args`] never yields a partial token list. [`Effect`] is the closed set the
//! [`crate::Transformer`] accepts; effects SoX has but this crate does not build live in
//! [`Unsupported`].

use rand::RngCore;

use crate::diagnostics::Diagnostics;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::Number;

/// Single-letter option enums (`-q`, `-h`, ...) that parse from their letter.
macro_rules! letter_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $letter:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every accepted value.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The option letter.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $letter),+
                }
            }

            /// The letter as a command-line flag (`-x`).
            pub fn flag(self) -> String {
                format!("-{}", self.as_str())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::foundation::error::SoxError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL.iter().copied().find(|v| v.as_str() == s).ok_or_else(|| {
                    let letters: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                    $crate::foundation::error::SoxError::validation(format!(
                        "{} must be one of {letters:?}, got '{s}'",
                        $field
                    ))
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::foundation::error::SoxError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_string()
            }
        }
    };
}

/// Stereo and channel-count effects.
pub mod channels;
/// Compressors, gain staging, and distortion.
pub mod dynamics;
/// Equalisers and IIR filters.
pub mod filters;
/// Chorus and tremolo.
pub mod modulation;
/// Reverberation.
pub mod reverb;
/// Length, speed, and position edits.
pub mod time;
/// Effects that are recognised but not built.
pub mod unsupported;

pub use channels::Channels;
pub use dynamics::{Compand, Contrast, Dcshift, Gain, GainBalance, Loudness, Norm, Overdrive};
pub use filters::{
    Allpass, Bandpass, Bandreject, Bass, Biquad, Equalizer, Highpass, Lowpass, Treble,
};
pub use modulation::{Chorus, ChorusShape, Tremolo};
pub use reverb::Reverb;
pub use time::{
    Delay, Downsample, Fade, FadeShape, Pad, Pitch, Rate, RateQuality, Silence, Tempo,
    TempoAudioType, Trim, Upsample, Vad,
};
pub use unsupported::Unsupported;

/// What an effect may use while rendering.
pub struct EffectCtx<'a> {
    /// Source for randomized defaults.
    pub rng: &'a mut dyn RngCore,
    /// Sink for non-fatal warnings.
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> EffectCtx<'a> {
    /// Bundle a random source and a diagnostics sink.
    pub fn new(rng: &'a mut dyn RngCore, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { rng, diagnostics }
    }
}

/// Validation and serialization for one effect kind.
pub trait EffectSpec {
    /// Canonical effect name, as logged and as the leading token.
    const NAME: &'static str;

    /// Validate every parameter, then render the effect's tokens in engine order.
    ///
    /// An empty list means "nothing to do" and is not logged.
    fn args(&self, ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>>;
}

/// Every effect the builder can append.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Two-pole all-pass filter.
    Allpass(Allpass),
    /// Two-pole band-pass filter.
    Bandpass(Bandpass),
    /// Two-pole band-reject filter.
    Bandreject(Bandreject),
    /// Low shelving filter.
    Bass(Bass),
    /// Raw biquad coefficients.
    Biquad(Biquad),
    /// Change the channel count.
    Channels(Channels),
    /// Multi-voice chorus.
    Chorus(Chorus),
    /// Compressor / expander.
    Compand(Compand),
    /// Loudness-comparable contrast enhancement.
    Contrast(Contrast),
    /// DC offset shift.
    Dcshift(Dcshift),
    /// CD de-emphasis (50/15 µs).
    Deemph,
    /// Per-channel delay.
    Delay(Delay),
    /// Integer-factor decimation.
    Downsample(Downsample),
    /// Headphone cross-feed for CD audio.
    Earwax,
    /// Peaking equaliser band.
    Equalizer(Equalizer),
    /// Fade in and/or out.
    Fade(Fade),
    /// Gain, normalisation, limiting, and balance.
    Gain(Gain),
    /// High-pass filter.
    Highpass(Highpass),
    /// Low-pass filter.
    Lowpass(Lowpass),
    /// Equal-loudness gain.
    Loudness(Loudness),
    /// Normalise to a peak level.
    Norm(Norm),
    /// Overdrive distortion.
    Overdrive(Overdrive),
    /// Insert silence at the ends.
    Pad(Pad),
    /// WSOLA pitch shift.
    Pitch(Pitch),
    /// Sample-rate conversion.
    Rate(Rate),
    /// Freeverb-style reverberation.
    Reverb(Reverb),
    /// Reverse the audio.
    Reverse,
    /// Strip silence.
    Silence(Silence),
    /// Swap stereo channel pairs.
    Swap,
    /// WSOLA tempo change.
    Tempo(Tempo),
    /// High shelving filter.
    Treble(Treble),
    /// Amplitude modulation.
    Tremolo(Tremolo),
    /// Cut to a time window.
    Trim(Trim),
    /// Integer-factor zero-stuffing.
    Upsample(Upsample),
    /// Voice activity detection trim.
    Vad(Vad),
    /// Recognised SoX effect without a builder. Always fails.
    #[serde(skip)]
    Unsupported(Unsupported),
}

impl Effect {
    /// Canonical effect name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Allpass(_) => Allpass::NAME,
            Self::Bandpass(_) => Bandpass::NAME,
            Self::Bandreject(_) => Bandreject::NAME,
            Self::Bass(_) => Bass::NAME,
            Self::Biquad(_) => Biquad::NAME,
            Self::Channels(_) => Channels::NAME,
            Self::Chorus(_) => Chorus::NAME,
            Self::Compand(_) => Compand::NAME,
            Self::Contrast(_) => Contrast::NAME,
            Self::Dcshift(_) => Dcshift::NAME,
            Self::Deemph => "deemph",
            Self::Delay(_) => Delay::NAME,
            Self::Downsample(_) => Downsample::NAME,
            Self::Earwax => "earwax",
            Self::Equalizer(_) => Equalizer::NAME,
            Self::Fade(_) => Fade::NAME,
            Self::Gain(_) => Gain::NAME,
            Self::Highpass(_) => Highpass::NAME,
            Self::Lowpass(_) => Lowpass::NAME,
            Self::Loudness(_) => Loudness::NAME,
            Self::Norm(_) => Norm::NAME,
            Self::Overdrive(_) => Overdrive::NAME,
            Self::Pad(_) => Pad::NAME,
            Self::Pitch(_) => Pitch::NAME,
            Self::Rate(_) => Rate::NAME,
            Self::Reverb(_) => Reverb::NAME,
            Self::Reverse => "reverse",
            Self::Silence(_) => Silence::NAME,
            Self::Swap => "swap",
            Self::Tempo(_) => Tempo::NAME,
            Self::Treble(_) => Treble::NAME,
            Self::Tremolo(_) => Tremolo::NAME,
            Self::Trim(_) => Trim::NAME,
            Self::Upsample(_) => Upsample::NAME,
            Self::Vad(_) => Vad::NAME,
            Self::Unsupported(u) => u.name(),
        }
    }

    /// Validate and render this effect's tokens.
    pub fn args(&self, ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        match self {
            Self::Allpass(fx) => fx.args(ctx),
            Self::Bandpass(fx) => fx.args(ctx),
            Self::Bandreject(fx) => fx.args(ctx),
            Self::Bass(fx) => fx.args(ctx),
            Self::Biquad(fx) => fx.args(ctx),
            Self::Channels(fx) => fx.args(ctx),
            Self::Chorus(fx) => fx.args(ctx),
            Self::Compand(fx) => fx.args(ctx),
            Self::Contrast(fx) => fx.args(ctx),
            Self::Dcshift(fx) => fx.args(ctx),
            Self::Deemph | Self::Earwax | Self::Reverse | Self::Swap => {
                Ok(vec![self.name().to_string()])
            }
            Self::Delay(fx) => fx.args(ctx),
            Self::Downsample(fx) => fx.args(ctx),
            Self::Equalizer(fx) => fx.args(ctx),
            Self::Fade(fx) => fx.args(ctx),
            Self::Gain(fx) => fx.args(ctx),
            Self::Highpass(fx) => fx.args(ctx),
            Self::Lowpass(fx) => fx.args(ctx),
            Self::Loudness(fx) => fx.args(ctx),
            Self::Norm(fx) => fx.args(ctx),
            Self::Overdrive(fx) => fx.args(ctx),
            Self::Pad(fx) => fx.args(ctx),
            Self::Pitch(fx) => fx.args(ctx),
            Self::Rate(fx) => fx.args(ctx),
            Self::Reverb(fx) => fx.args(ctx),
            Self::Silence(fx) => fx.args(ctx),
            Self::Tempo(fx) => fx.args(ctx),
            Self::Treble(fx) => fx.args(ctx),
            Self::Tremolo(fx) => fx.args(ctx),
            Self::Trim(fx) => fx.args(ctx),
            Self::Upsample(fx) => fx.args(ctx),
            Self::Vad(fx) => fx.args(ctx),
            Self::Unsupported(u) => Err(SoxError::unsupported(u.name())),
        }
    }
}

macro_rules! effect_from {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Effect {
                fn from(fx: $ty) -> Self {
                    Self::$ty(fx)
                }
            }
        )+
    };
}

effect_from!(
    Allpass, Bandpass, Bandreject, Bass, Biquad, Channels, Chorus, Compand, Contrast, Dcshift,
    Delay, Downsample, Equalizer, Fade, Gain, Highpass, Lowpass, Loudness, Norm, Overdrive, Pad,
    Pitch, Rate, Reverb, Silence, Tempo, Treble, Tremolo, Trim, Upsample, Vad, Unsupported,
);

/// `<n>q`, a Q-factor token.
pub(crate) fn q_token(n: Number) -> String {
    format!("{n}q")
}

/// `<n>s`, a shelf-slope token.
pub(crate) fn slope_token(n: Number) -> String {
    format!("{n}s")
}

/// `<n>%`, a percentage token.
pub(crate) fn percent_token(n: Number) -> String {
    format!("{n}%")
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;
