use std::fmt;

/// A numeric effect parameter.
///
/// SoX reads integers and decimals alike, but the token text is part of the command contract:
/// integers render bare (`2`) and floats always carry a decimal point (`2.0`). Keeping the two
/// apart lets callers decide how a value is spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integral value, rendered without a decimal point.
    Int(i64),
    /// Floating point value, rendered with at least one fractional digit.
    Float(f64),
}

impl Number {
    /// Numeric value as `f64` for range checks.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// `self - rhs`, staying integral when both sides are.
    pub fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_sub(b)
                .map(Self::Int)
                .unwrap_or(Self::Float(a as f64 - b as f64)),
            (a, b) => Self::Float(a.as_f64() - b.as_f64()),
        }
    }

    /// `self * factor` as a float.
    pub fn scale(self, factor: f64) -> Number {
        Self::Float(self.as_f64() * factor)
    }

    pub(crate) fn is_finite(self) -> bool {
        self.as_f64().is_finite()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&float_token(v)),
        }
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Render a float the way the engine command line expects it: plain decimal, `.` separator,
/// no exponent, and a trailing `.0` for integral values.
pub(crate) fn float_token(v: f64) -> String {
    // `{}` on f64 is locale-independent shortest round-trip and never uses an exponent.
    let s = format!("{v}");
    if v.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

/// Render any displayable value as one token.
pub(crate) fn tok(v: impl fmt::Display) -> String {
    v.to_string()
}
