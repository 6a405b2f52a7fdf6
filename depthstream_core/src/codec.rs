use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::frame::{DepthFrame, RgbFrame};
use crate::range::DepthRange;

/// Closed set of codec tags the external pipeline/UI can select.
///
/// Switching codec at runtime means discarding the old instance and
/// constructing a new one through the factory — no state crosses the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecKind {
    /// 16-bit depth code split across two 8-bit channels.
    Linear,
    /// 1529-step hue ramp, normalized in linear depth space.
    UniformHue,
    /// 1529-step hue ramp, normalized in disparity (inverse-distance) space.
    InverseHue,
    /// Encode delegated to a vendor colorizer; decode unsupported.
    HardwarePassthrough,
}

impl CodecKind {
    pub const ALL: [CodecKind; 4] = [
        CodecKind::Linear,
        CodecKind::UniformHue,
        CodecKind::InverseHue,
        CodecKind::HardwarePassthrough,
    ];
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecKind::Linear => "linear",
            CodecKind::UniformHue => "uniform-hue",
            CodecKind::InverseHue => "inverse-hue",
            CodecKind::HardwarePassthrough => "hardware-passthrough",
        };
        f.write_str(name)
    }
}

impl FromStr for CodecKind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "lin" => Ok(CodecKind::Linear),
            "uniform-hue" | "uniform" | "hue" => Ok(CodecKind::UniformHue),
            "inverse-hue" | "inverse" => Ok(CodecKind::InverseHue),
            "hardware-passthrough" | "hardware" | "passthrough" => {
                Ok(CodecKind::HardwarePassthrough)
            }
            other => Err(CodecError::UnknownCodec(other.to_string())),
        }
    }
}

/// Core depth-to-color abstraction.
///
/// Each `DepthCodec` implementation:
/// - Transforms whole frames pixel-by-pixel; no pixel's result depends on
///   any other pixel's, so bodies are free to parallelize internally.
/// - Is deterministic: identical input frame + range always yields an
///   identical output buffer.
/// - Owns its output buffers as reusable scratch, resized only when the
///   incoming frame dimensions change. The returned reference is valid until
///   the next call on the same instance; double-buffering across in-flight
///   frames is the caller's job.
/// - Reads the range fresh on every call and holds no range state.
pub trait DepthCodec: Send {
    /// Tag this instance was constructed for.
    fn kind(&self) -> CodecKind;

    /// Human-readable codec name for CLI display and error messages.
    fn name(&self) -> &'static str;

    /// Map a depth frame into a 3×8-bit color frame.
    ///
    /// Output has identical width/height to the input. Out-of-range samples
    /// are clamped into `range`, never rejected; zero (no-data) samples take
    /// the codec's documented sentinel mapping.
    fn encode(
        &mut self,
        depth: &DepthFrame,
        range: DepthRange,
    ) -> Result<&RgbFrame, CodecError>;

    /// Reconstruct a depth frame from a color frame produced by this codec's
    /// own `encode`, using the same `range`.
    ///
    /// The reconstruction is approximate, bounded by the codec's
    /// quantization step — never an exact inverse. Encode-only codecs fail
    /// with [`CodecError::UnsupportedOperation`] instead of returning a
    /// misleading result.
    fn decode(
        &mut self,
        image: &RgbFrame,
        range: DepthRange,
    ) -> Result<&DepthFrame, CodecError>;
}

/// Vendor-provided depth colorizer, e.g. a camera SDK's built-in scheme.
///
/// External collaborator interface: the pipeline owns the vendor handle and
/// hands it to the passthrough codec at construction. Implementations write
/// a full RGB frame for the given depth frame and range into `out`, which
/// the codec has already sized to match.
pub trait HardwareColorizer: Send {
    fn name(&self) -> &'static str;

    fn colorize(
        &mut self,
        depth: &DepthFrame,
        range: DepthRange,
        out: &mut RgbFrame,
    ) -> Result<(), CodecError>;
}
