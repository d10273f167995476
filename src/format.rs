use std::fmt;
use std::str::FromStr;

use crate::foundation::check;
use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::{Number, tok};

/// File types accepted by `-t`.
pub const VALID_FORMATS: &[&str] = &[
    "8svx", "aif", "aifc", "aiff", "aiffc", "al", "amb", "amr-nb", "amr-wb", "au", "avr", "caf",
    "cdda", "cdr", "cvs", "cvsd", "cvu", "dat", "dvms", "f32", "f4", "f64", "f8", "fap", "flac",
    "fssd", "gsm", "gsrt", "hcom", "htk", "ima", "ircam", "la", "lpc", "lpc10", "lu", "mat",
    "mat4", "mat5", "maud", "mp2", "mp3", "nist", "ogg", "opus", "paf", "prc", "pvf", "raw", "s1",
    "s16", "s2", "s24", "s3", "s32", "s4", "s8", "sb", "sd2", "sds", "sf", "sl", "sln", "smp",
    "snd", "sndfile", "sndr", "sndt", "sou", "sox", "sph", "sw", "txw", "u1", "u16", "u2", "u24",
    "u3", "u32", "u4", "u8", "ub", "ul", "uw", "vms", "voc", "vorbis", "vox", "w64", "wav",
    "wavpcm", "wv", "wve", "xa", "xi",
];

/// Sample encodings accepted by `-e`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    /// Two's complement PCM.
    SignedInteger,
    /// Offset-binary PCM.
    UnsignedInteger,
    /// IEEE 754 PCM.
    FloatingPoint,
    /// ITU G.711 A-law.
    ALaw,
    /// ITU G.711 μ-law.
    ULaw,
    /// OKI / VOX 4-bit ADPCM.
    OkiAdpcm,
    /// IMA / DVI 4-bit ADPCM.
    ImaAdpcm,
    /// Microsoft 4-bit ADPCM.
    MsAdpcm,
    /// GSM 06.10 full rate.
    GsmFullRate,
}

impl Encoding {
    /// Every encoding, in command-line documentation order.
    pub const ALL: [Encoding; 9] = [
        Self::SignedInteger,
        Self::UnsignedInteger,
        Self::FloatingPoint,
        Self::ALaw,
        Self::ULaw,
        Self::OkiAdpcm,
        Self::ImaAdpcm,
        Self::MsAdpcm,
        Self::GsmFullRate,
    ];

    /// Identifier as passed to `-e`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignedInteger => "signed-integer",
            Self::UnsignedInteger => "unsigned-integer",
            Self::FloatingPoint => "floating-point",
            Self::ALaw => "a-law",
            Self::ULaw => "u-law",
            Self::OkiAdpcm => "oki-adpcm",
            Self::ImaAdpcm => "ima-adpcm",
            Self::MsAdpcm => "ms-adpcm",
            Self::GsmFullRate => "gsm-full-rate",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = SoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|e| e.as_str()).collect();
                SoxError::validation(format!("invalid encoding '{s}', must be one of {names:?}"))
            })
    }
}

impl TryFrom<String> for Encoding {
    type Error = SoxError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Encoding> for String {
    fn from(e: Encoding) -> Self {
        e.as_str().to_string()
    }
}

/// Fields shared by input and output format specs.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormatFields {
    /// Container / codec identifier, one of [`VALID_FORMATS`].
    pub file_type: Option<String>,
    /// Sample rate in Hz.
    pub rate: Option<Number>,
    /// Bits per sample.
    pub bits: Option<u32>,
    /// Channel count.
    pub channels: Option<u32>,
    /// Sample encoding.
    pub encoding: Option<Encoding>,
}

impl FormatFields {
    fn validate(&self) -> SoxResult<()> {
        if let Some(ft) = self.file_type.as_deref()
            && !VALID_FORMATS.contains(&ft)
        {
            return Err(SoxError::validation(format!(
                "invalid file_type '{ft}', must be a SoX format such as wav, flac, mp3"
            )));
        }
        if let Some(rate) = self.rate {
            check::positive("rate", rate)?;
        }
        if let Some(bits) = self.bits {
            check::positive_count("bits", bits)?;
        }
        if let Some(channels) = self.channels {
            check::positive_count("channels", channels)?;
        }
        Ok(())
    }

    fn push_args(&self, args: &mut Vec<String>) {
        if let Some(ft) = &self.file_type {
            args.extend(["-t".to_string(), ft.clone()]);
        }
        if let Some(rate) = self.rate {
            args.extend(["-r".to_string(), tok(rate)]);
        }
        if let Some(bits) = self.bits {
            args.extend(["-b".to_string(), tok(bits)]);
        }
        if let Some(channels) = self.channels {
            args.extend(["-c".to_string(), tok(channels)]);
        }
        if let Some(encoding) = self.encoding {
            args.extend(["-e".to_string(), tok(encoding)]);
        }
    }
}

/// Input file format override. Leave everything unset to infer from the file itself.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputFormat {
    /// Shared format fields.
    #[serde(flatten)]
    pub fields: FormatFields,
    /// Ignore the length stored in the header and read until end of file.
    pub ignore_length: bool,
}

impl InputFormat {
    /// Validate and render the input format tokens.
    pub fn to_args(&self) -> SoxResult<Vec<String>> {
        self.fields.validate()?;
        let mut args = Vec::new();
        self.fields.push_args(&mut args);
        if self.ignore_length {
            args.push("--ignore-length".to_string());
        }
        Ok(args)
    }
}

/// Output file format override.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    /// Shared format fields.
    #[serde(flatten)]
    pub fields: FormatFields,
    /// Comment to write into the output header.
    pub comments: Option<String>,
    /// Append to the existing comments (`--add-comment`) rather than replace them (`--comment`).
    pub append_comments: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            fields: FormatFields::default(),
            comments: None,
            append_comments: true,
        }
    }
}

impl OutputFormat {
    /// Validate and render the output format tokens.
    pub fn to_args(&self) -> SoxResult<Vec<String>> {
        self.fields.validate()?;
        let mut args = Vec::new();
        self.fields.push_args(&mut args);
        if let Some(comments) = &self.comments {
            let flag = if self.append_comments {
                "--add-comment"
            } else {
                "--comment"
            };
            args.extend([flag.to_string(), comments.clone()]);
        }
        Ok(args)
    }
}

#[cfg(test)]
#[path = "../tests/unit/format.rs"]
mod tests;
