/// SoX effects that are recognised by name but have no builder.
///
/// Appending any of these fails with [`crate::SoxError::Unsupported`] instead of silently doing
/// nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unsupported {
    /// Pitch bend.
    Bend,
    /// Single-tap echo.
    Echo,
    /// Sequential echoes.
    Echos,
    /// FIR filter from coefficients.
    Fir,
    /// Flanger.
    Flanger,
    /// Hilbert transform filter.
    Hilbert,
    /// Multi-band compander.
    Mcompand,
    /// Profile-based noise reduction.
    Noisered,
    /// Out-of-phase stereo.
    Oops,
    /// Phaser.
    Phaser,
    /// Channel remix matrix.
    Remix,
    /// Repeat the audio.
    Repeat,
    /// Windowed-sinc filter.
    Sinc,
    /// Speed change (pitch and tempo together).
    Speed,
    /// Splice two segments.
    Splice,
    /// Time stretch (non-WSOLA).
    Stretch,
}

impl Unsupported {
    /// Every unsupported effect.
    pub const ALL: [Unsupported; 16] = [
        Self::Bend,
        Self::Echo,
        Self::Echos,
        Self::Fir,
        Self::Flanger,
        Self::Hilbert,
        Self::Mcompand,
        Self::Noisered,
        Self::Oops,
        Self::Phaser,
        Self::Remix,
        Self::Repeat,
        Self::Sinc,
        Self::Speed,
        Self::Splice,
        Self::Stretch,
    ];

    /// SoX effect name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bend => "bend",
            Self::Echo => "echo",
            Self::Echos => "echos",
            Self::Fir => "fir",
            Self::Flanger => "flanger",
            Self::Hilbert => "hilbert",
            Self::Mcompand => "mcompand",
            Self::Noisered => "noisered",
            Self::Oops => "oops",
            Self::Phaser => "phaser",
            Self::Remix => "remix",
            Self::Repeat => "repeat",
            Self::Sinc => "sinc",
            Self::Speed => "speed",
            Self::Splice => "splice",
            Self::Stretch => "stretch",
        }
    }

    /// Look up by SoX effect name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }
}
