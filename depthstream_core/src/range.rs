use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Distance bound `(min, max)` in the same unit as the depth samples.
///
/// The range is owned and mutated by the external pipeline/UI and handed to
/// the selected codec fresh on every call — codecs hold no range state.
/// `min < max` is the caller's invariant; codecs re-check it cheaply at the
/// top of each operation so a bad configuration fails loudly instead of
/// producing garbage frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    /// Near bound. Depth samples below it are clamped up.
    pub min: f64,
    /// Far bound. Depth samples above it (and no-data zeros, where the codec
    /// says so) are clamped down.
    pub max: f64,
}

impl DepthRange {
    /// Build a validated range.
    pub fn new(min: f64, max: f64) -> Result<Self, CodecError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Check the `min < max` invariant (both bounds finite).
    pub fn validate(&self) -> Result<(), CodecError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(CodecError::InvalidRange {
                min: self.min,
                max: self.max,
                reason: "bounds must be finite with min strictly below max",
            });
        }
        Ok(())
    }

    /// Reject a non-positive bound.
    ///
    /// Inverse-space transforms divide by both bounds; a zero bound would
    /// produce `inf` disparities. The caller is expected to raise the
    /// configured bound to a small positive epsilon and retry.
    pub fn require_positive(&self) -> Result<(), CodecError> {
        if self.min <= 0.0 || self.max <= 0.0 {
            return Err(CodecError::InvalidRange {
                min: self.min,
                max: self.max,
                reason: "bounds must be strictly positive for inverse-space transforms",
            });
        }
        Ok(())
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a sample into the bound.
    pub fn clamp(&self, d: f64) -> f64 {
        d.clamp(self.min, self.max)
    }
}
