use thiserror::Error;

/// Errors surfaced by codec construction and per-frame transforms.
///
/// Every failure is immediate and synchronous; codecs never retry or degrade
/// silently. Out-of-range depth samples are *not* errors — they are clamped
/// into the configured range by each codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// The supplied depth range cannot parameterize the transform
    /// (non-finite bound, `min >= max`, or a zero bound where the codec
    /// normalizes in inverse-distance space).
    #[error("invalid depth range [{min}, {max}]: {reason}")]
    InvalidRange {
        min: f64,
        max: f64,
        reason: &'static str,
    },

    /// The codec does not implement the requested operation.
    ///
    /// Raised instead of returning a misleading result, e.g. `decode` on the
    /// hardware passthrough codec.
    #[error("codec '{codec}' does not support {operation}")]
    UnsupportedOperation {
        codec: &'static str,
        operation: &'static str,
    },

    /// A zero-sized frame was passed to `encode` or `decode`.
    #[error("frame must be non-empty")]
    EmptyFrame,

    /// A sample buffer does not match the declared frame dimensions.
    #[error("buffer holds {actual} samples but a {width}x{height} frame needs {expected}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The hardware passthrough codec was selected without a vendor
    /// colorizer instance to delegate to.
    #[error("hardware passthrough requires a vendor colorizer instance")]
    ColorizerUnavailable,

    /// A codec tag string did not match any known codec.
    #[error("unknown codec '{0}'. Valid options: linear, uniform-hue, inverse-hue, hardware-passthrough")]
    UnknownCodec(String),
}
