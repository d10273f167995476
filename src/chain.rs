//! JSON description of a whole chain.
//!
//! ```json
//! {
//!   "globals": { "verbosity": 3 },
//!   "output_format": { "bits": 16 },
//!   "seed": 7,
//!   "effects": [
//!     { "effect": "highpass", "frequency": 80 },
//!     { "effect": "fade", "fade_in_len": 0.5 }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context as _;

use crate::effects::{Effect, Unsupported};
use crate::foundation::error::{SoxError, SoxResult};
use crate::format::{InputFormat, OutputFormat};
use crate::globals::GlobalOptions;
use crate::transform::Transformer;

/// Serialized chain: formats, globals, and an ordered effect list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainSpec {
    /// Global options.
    pub globals: GlobalOptions,
    /// Input format override.
    pub input_format: InputFormat,
    /// Output format override.
    pub output_format: OutputFormat,
    /// Seed for randomized effect defaults. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Effects in application order, each tagged with `"effect": "<name>"`.
    pub effects: Vec<serde_json::Value>,
}

impl ChainSpec {
    /// Parse a chain from JSON text.
    pub fn from_json_str(s: &str) -> SoxResult<Self> {
        serde_json::from_str(s).map_err(|e| SoxError::serde(e.to_string()))
    }

    /// Read and parse a chain file.
    pub fn from_path(path: &Path) -> SoxResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read chain file {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Decode the effect list without applying it.
    pub fn effects(&self) -> SoxResult<Vec<Effect>> {
        self.effects.iter().enumerate().map(|(i, v)| decode_effect(i, v)).collect()
    }

    /// Build a configured [`Transformer`] by replaying every section in order.
    pub fn into_transformer(self) -> SoxResult<Transformer> {
        let effects = self.effects()?;
        let mut tfm = match self.seed {
            Some(seed) => Transformer::new().with_seed(seed),
            None => Transformer::new(),
        };
        tfm.set_globals(&self.globals)?;
        tfm.set_input_format(&self.input_format)?;
        tfm.set_output_format(&self.output_format)?;
        for fx in effects {
            tfm.effect(fx)?;
        }
        Ok(tfm)
    }
}

fn decode_effect(index: usize, value: &serde_json::Value) -> SoxResult<Effect> {
    let name = value
        .get("effect")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| SoxError::serde(format!("effects[{index}]: missing \"effect\" name")))?;
    if let Some(u) = Unsupported::from_name(name) {
        return Err(SoxError::unsupported(u.name()));
    }
    serde_json::from_value(value.clone())
        .map_err(|e| SoxError::serde(format!("effects[{index}] ({name}): {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/chain.rs"]
mod tests;
