use crate::effects::{EffectCtx, EffectSpec};
use crate::foundation::check;
use crate::foundation::error::SoxResult;
use crate::foundation::number::{Number, tok};

/// Freeverb-style reverberation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reverb {
    /// Tail length, percent.
    pub reverberance: Number,
    /// High-frequency damping, percent.
    pub high_freq_damping: Number,
    /// Room size, percent.
    pub room_scale: Number,
    /// Stereo spread, percent.
    pub stereo_depth: Number,
    /// Milliseconds before the reverb starts.
    pub pre_delay: Number,
    /// Wet signal gain in dB.
    pub wet_gain: Number,
    /// Output only the wet signal (`-w`).
    pub wet_only: bool,
}

impl Default for Reverb {
    fn default() -> Self {
        Self {
            reverberance: Number::Int(50),
            high_freq_damping: Number::Int(50),
            room_scale: Number::Int(100),
            stereo_depth: Number::Int(100),
            pre_delay: Number::Int(0),
            wet_gain: Number::Int(0),
            wet_only: false,
        }
    }
}

impl EffectSpec for Reverb {
    const NAME: &'static str = "reverb";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::in_closed("reverberance", self.reverberance, 0.0, 100.0)?;
        check::in_closed("high_freq_damping", self.high_freq_damping, 0.0, 100.0)?;
        check::in_closed("room_scale", self.room_scale, 0.0, 100.0)?;
        check::in_closed("stereo_depth", self.stereo_depth, 0.0, 100.0)?;
        check::non_negative("pre_delay", self.pre_delay)?;
        check::finite("wet_gain", self.wet_gain)?;

        let mut args = vec![Self::NAME.to_string()];
        if self.wet_only {
            args.push("-w".to_string());
        }
        args.extend([
            tok(self.reverberance),
            tok(self.high_freq_damping),
            tok(self.room_scale),
            tok(self.stereo_depth),
            tok(self.pre_delay),
            tok(self.wet_gain),
        ]);
        Ok(args)
    }
}
