use crate::effects::{EffectCtx, EffectSpec};
use crate::foundation::check;
use crate::foundation::error::SoxResult;
use crate::foundation::number::tok;

/// Mix or duplicate to `n_channels` output channels.
///
/// Channel pair swapping has no parameters and is [`crate::Effect::Swap`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Channels {
    /// Output channel count.
    pub n_channels: u32,
}

impl EffectSpec for Channels {
    const NAME: &'static str = "channels";

    fn args(&self, _ctx: &mut EffectCtx<'_>) -> SoxResult<Vec<String>> {
        check::positive_count("n_channels", self.n_channels)?;
        Ok(vec![Self::NAME.to_string(), tok(self.n_channels)])
    }
}
