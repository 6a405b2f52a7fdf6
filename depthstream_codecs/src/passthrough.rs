use depthstream_core::{
    CodecError, CodecKind, DepthCodec, DepthFrame, DepthRange, HardwareColorizer, RgbFrame,
};

/// Codec that delegates encoding to a vendor colorizer (e.g. a depth-camera
/// SDK's built-in scheme), configured per frame with the live range.
///
/// Exists to keep the codec interface uniform across all variants: the
/// vendor scheme is not reversible from this side, so `decode` always fails
/// with [`CodecError::UnsupportedOperation`].
pub struct HardwarePassthroughCodec {
    colorizer: Box<dyn HardwareColorizer>,
    encode_buf: RgbFrame,
}

impl HardwarePassthroughCodec {
    pub fn new(colorizer: Box<dyn HardwareColorizer>) -> Self {
        Self {
            colorizer,
            encode_buf: RgbFrame::new(0, 0),
        }
    }
}

impl DepthCodec for HardwarePassthroughCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::HardwarePassthrough
    }

    fn name(&self) -> &'static str {
        "hardware-passthrough"
    }

    fn encode(
        &mut self,
        depth: &DepthFrame,
        range: DepthRange,
    ) -> Result<&RgbFrame, CodecError> {
        if depth.is_empty() {
            return Err(CodecError::EmptyFrame);
        }
        range.validate()?;

        self.encode_buf.ensure_size(depth.width(), depth.height());
        self.colorizer.colorize(depth, range, &mut self.encode_buf)?;
        Ok(&self.encode_buf)
    }

    fn decode(
        &mut self,
        _image: &RgbFrame,
        _range: DepthRange,
    ) -> Result<&DepthFrame, CodecError> {
        Err(CodecError::UnsupportedOperation {
            codec: self.name(),
            operation: "decode",
        })
    }
}
