use crate::foundation::error::{SoxError, SoxResult};

/// Accepted values for [`GlobalOptions::verbosity`].
pub const VERBOSITY_VALS: [u8; 5] = [0, 1, 2, 3, 4];

/// Global SoX options, placed before every other argument.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalOptions {
    /// Dither low bit-depth output. When off, `-D` disables SoX's automatic dithering.
    pub dither: bool,
    /// Guard against clipping (`-G`).
    pub guard: bool,
    /// Process channels in parallel inside the engine (`--multi-threaded`).
    pub multithread: bool,
    /// Apply track replay-gain from input metadata (`--replay-gain track`).
    pub replay_gain: bool,
    /// Engine verbosity, `0` (silent) to `4` (debug).
    pub verbosity: u8,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            dither: false,
            guard: false,
            multithread: false,
            replay_gain: false,
            verbosity: 2,
        }
    }
}

impl GlobalOptions {
    /// Check field ranges.
    pub fn validate(&self) -> SoxResult<()> {
        if !VERBOSITY_VALS.contains(&self.verbosity) {
            return Err(SoxError::validation(format!(
                "verbosity must be one of {VERBOSITY_VALS:?}"
            )));
        }
        Ok(())
    }

    /// Validate and render the global argument tokens.
    pub fn to_args(&self) -> SoxResult<Vec<String>> {
        self.validate()?;

        let mut args = Vec::new();
        if !self.dither {
            args.push("-D".to_string());
        }
        if self.guard {
            args.push("-G".to_string());
        }
        if self.multithread {
            args.push("--multi-threaded".to_string());
        }
        if self.replay_gain {
            args.push("--replay-gain".to_string());
            args.push("track".to_string());
        }
        args.push(format!("-V{}", self.verbosity));
        Ok(args)
    }
}

#[cfg(test)]
#[path = "../tests/unit/globals.rs"]
mod tests;
