//! soxchain builds validated, ordered command lines for the SoX audio engine.
//!
//! A [`Transformer`] accumulates four sections: global options, an input format override, an
//! output format override, and an effect chain. Every builder call validates its parameters
//! completely before touching state, so a failed call leaves the chain as it was. Nothing here
//! processes audio; [`Transformer::build`] hands the finished argument list to an [`Engine`]
//! (the system `sox` by default) and [`Transformer::preview`] hands it to a [`Player`] (`play`).
//!
//! ```no_run
//! use soxchain::{FadeShape, Transformer};
//!
//! let mut tfm = Transformer::new();
//! tfm.highpass(80, 0.707, 2)?
//!     .fade(0.5, 1.0, FadeShape::QuarterSine)?
//!     .norm(-3.0)?;
//! tfm.build("in.wav".as_ref(), "out.wav".as_ref())?;
//! # Ok::<(), soxchain::SoxError>(())
//! ```
//!
//! Chains can also be described in JSON; see [`ChainSpec`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chain;
mod diagnostics;
mod effects;
mod engine;
mod file_info;
mod format;
mod foundation;
mod globals;
mod transform;

pub use chain::ChainSpec;
pub use diagnostics::{Diagnostics, Level, MemoryDiagnostics, TracingDiagnostics};
pub use effects::{
    Allpass, Bandpass, Bandreject, Bass, Biquad, Channels, Chorus, ChorusShape, Compand, Contrast,
    Dcshift, Delay, Downsample, Effect, EffectCtx, EffectSpec, Equalizer, Fade, FadeShape, Gain,
    GainBalance, Highpass, Loudness, Lowpass, Norm, Overdrive, Pad, Pitch, Rate, RateQuality,
    Reverb, Silence, Tempo, TempoAudioType, Treble, Tremolo, Trim, Unsupported, Upsample, Vad,
};
pub use engine::{Engine, EngineOutput, Player, SystemSox, is_sox_on_path};
pub use file_info::{validate_input_file, validate_output_file};
pub use format::{Encoding, FormatFields, InputFormat, OutputFormat, VALID_FORMATS};
pub use foundation::error::{SoxError, SoxResult};
pub use foundation::number::Number;
pub use globals::{GlobalOptions, VERBOSITY_VALS};
pub use transform::{CONVERT_BITDEPTHS, Transformer};
