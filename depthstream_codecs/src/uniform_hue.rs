use rayon::prelude::*;

use depthstream_core::{CodecError, CodecKind, DepthCodec, DepthFrame, DepthRange, RgbFrame};

use crate::ramp::{index_to_rgb, rgb_to_index, RAMP_MAX};

/// Hue colorization codec, normalized in linear depth space.
///
/// Depth maps onto the shared 1529-step hue ramp, giving visually smooth,
/// compression-tolerant color bands with uniform depth resolution across the
/// whole range. Unlike [`LinearCodec`], zero (no-data) samples need no
/// substitution: clamping pins them to the near bound, which is the ramp's
/// start.
///
/// Quantization step: `(max - min) / 1529`.
///
/// [`LinearCodec`]: crate::LinearCodec
pub struct UniformHueCodec {
    encode_buf: RgbFrame,
    decode_buf: DepthFrame,
}

impl UniformHueCodec {
    pub fn new() -> Self {
        Self {
            encode_buf: RgbFrame::new(0, 0),
            decode_buf: DepthFrame::new(0, 0),
        }
    }
}

impl Default for UniformHueCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DepthCodec for UniformHueCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::UniformHue
    }

    fn name(&self) -> &'static str {
        "uniform-hue"
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
        let span = range.span();

        self.encode_buf
            .data_mut()
            .par_chunks_exact_mut(3)
            .zip(depth.samples().par_iter())
            .for_each(|(px, &sample)| {
                let d = range.clamp(f64::from(sample));
                let n = ((d - range.min) / span * f64::from(RAMP_MAX)).round() as u16;
                px.copy_from_slice(&index_to_rgb(n));
            });

        Ok(&self.encode_buf)
    }

    fn decode(
        &mut self,
        image: &RgbFrame,
        range: DepthRange,
    ) -> Result<&DepthFrame, CodecError> {
        if image.is_empty() {
            return Err(CodecError::EmptyFrame);
        }
        range.validate()?;

        self.decode_buf.ensure_size(image.width(), image.height());
        let span = range.span();

        self.decode_buf
            .samples_mut()
            .par_iter_mut()
            .zip(image.data().par_chunks_exact(3))
            .for_each(|(out, px)| {
                let n = rgb_to_index([px[0], px[1], px[2]]);
                *out = (range.min + span * f64::from(n) / f64::from(RAMP_MAX)) as f32;
            });

        Ok(&self.decode_buf)
    }
}
