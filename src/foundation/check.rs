//! Shared parameter checks.
//!
//! Every helper names the offending field in its error message so a failed builder call says
//! exactly which argument to fix.

use crate::foundation::error::{SoxError, SoxResult};
use crate::foundation::number::Number;

/// Any finite number.
pub(crate) fn finite(field: &str, v: Number) -> SoxResult<f64> {
    if !v.is_finite() {
        return Err(SoxError::validation(format!("{field} must be a number")));
    }
    Ok(v.as_f64())
}

/// `v > 0`.
pub(crate) fn positive(field: &str, v: Number) -> SoxResult<f64> {
    let x = finite(field, v)?;
    if x <= 0.0 {
        return Err(SoxError::validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(x)
}

/// `v >= 0`.
pub(crate) fn non_negative(field: &str, v: Number) -> SoxResult<f64> {
    let x = finite(field, v)?;
    if x < 0.0 {
        return Err(SoxError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(x)
}

/// `lo <= v <= hi`.
pub(crate) fn in_closed(field: &str, v: Number, lo: f64, hi: f64) -> SoxResult<f64> {
    let x = finite(field, v)?;
    if x < lo || x > hi {
        return Err(SoxError::validation(format!(
            "{field} must be a number between {lo} and {hi}"
        )));
    }
    Ok(x)
}

/// `0 < v <= hi`.
pub(crate) fn in_open_closed(field: &str, v: Number, hi: f64) -> SoxResult<f64> {
    let x = finite(field, v)?;
    if x <= 0.0 || x > hi {
        return Err(SoxError::validation(format!(
            "{field} must be a number greater than 0 and at most {hi}"
        )));
    }
    Ok(x)
}

/// Strictly positive integer count.
pub(crate) fn positive_count(field: &str, v: u32) -> SoxResult<u32> {
    if v == 0 {
        return Err(SoxError::validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(v)
}

/// `v` is one of `allowed`.
pub(crate) fn one_of<T: PartialEq + std::fmt::Debug>(
    field: &str,
    v: &T,
    allowed: &[T],
) -> SoxResult<()> {
    if !allowed.contains(v) {
        return Err(SoxError::validation(format!(
            "{field} must be one of {allowed:?}"
        )));
    }
    Ok(())
}
