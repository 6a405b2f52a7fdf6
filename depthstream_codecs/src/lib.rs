mod inverse_hue;
mod linear;
mod passthrough;
pub mod ramp;
mod uniform_hue;

pub use inverse_hue::InverseHueCodec;
pub use linear::LinearCodec;
pub use passthrough::HardwarePassthroughCodec;
pub use uniform_hue::UniformHueCodec;

use depthstream_core::{CodecError, CodecKind, DepthCodec, HardwareColorizer};
use tracing::debug;

/// Resolve a codec instance from its configuration tag.
///
/// Called by the pipeline whenever the selected codec changes; construction
/// is cheap and side-effect-free, so switching means dropping the old
/// instance and building a fresh one here.
///
/// `HardwarePassthrough` delegates to a vendor colorizer the pipeline owns —
/// selecting it without passing one fails with
/// [`CodecError::ColorizerUnavailable`]. The software codecs ignore
/// `colorizer`.
pub fn codec_for_kind(
    kind: CodecKind,
    colorizer: Option<Box<dyn HardwareColorizer>>,
) -> Result<Box<dyn DepthCodec>, CodecError> {
    debug!(%kind, "constructing depth codec");
    match kind {
        CodecKind::Linear => Ok(Box::new(LinearCodec::new())),
        CodecKind::UniformHue => Ok(Box::new(UniformHueCodec::new())),
        CodecKind::InverseHue => Ok(Box::new(InverseHueCodec::new())),
        CodecKind::HardwarePassthrough => match colorizer {
            Some(hw) => Ok(Box::new(HardwarePassthroughCodec::new(hw))),
            None => Err(CodecError::ColorizerUnavailable),
        },
    }
}
